use serde::{Deserialize, Serialize};

use super::{CampaignId, NewCampaign};

pub const MINIMUM_TARGET_AMOUNT: f64 = 1.0;

/// A number as it may arrive from a client: either a JSON number or a string
/// holding one.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    pub fn coerce(&self) -> Option<f64> {
        match self {
            Numeric::Number(number) => Some(*number),
            Numeric::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Unvalidated input for creating a campaign.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_amount: Option<Numeric>,
    pub image: Option<String>,
    pub parent_campaign_id: Option<CampaignId>,
}

/// Unvalidated input for a donation.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DonationDraft {
    pub amount: Option<Numeric>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> FieldError {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

#[tracing::instrument]
pub fn validate_campaign(draft: CampaignDraft) -> Result<NewCampaign, Vec<FieldError>> {
    let mut errors = vec![];

    let title = required_text(&mut errors, "title", draft.title);
    let description = required_text(&mut errors, "description", draft.description);
    let target_amount = match draft.target_amount {
        None => {
            errors.push(FieldError::new("targetAmount", "is required"));
            None
        }
        Some(value) => match value.coerce() {
            Some(amount) if !amount.is_finite() => {
                errors.push(FieldError::new("targetAmount", "must be a finite number"));
                None
            }
            Some(amount) if amount < MINIMUM_TARGET_AMOUNT => {
                errors.push(FieldError::new(
                    "targetAmount",
                    format!("must be at least {}", MINIMUM_TARGET_AMOUNT),
                ));
                None
            }
            Some(amount) => Some(amount),
            None => {
                errors.push(FieldError::new("targetAmount", "must be a number"));
                None
            }
        },
    };

    match (title, description, target_amount) {
        (Some(title), Some(description), Some(target_amount)) => {
            Ok(NewCampaign {
                title,
                description,
                target_amount,
                image: draft.image,
                parent_campaign_id: draft.parent_campaign_id,
            })
        }
        _ => Err(errors),
    }
}

#[tracing::instrument]
pub fn validate_donation(draft: DonationDraft) -> Result<f64, Vec<FieldError>> {
    let value = draft
        .amount
        .ok_or_else(|| vec![FieldError::new("amount", "is required")])?;

    match value.coerce() {
        None => Err(vec![FieldError::new("amount", "must be a number")]),
        Some(amount) if !amount.is_finite() => {
            Err(vec![FieldError::new("amount", "must be a finite number")])
        }
        Some(amount) if amount <= 0.0 => {
            Err(vec![FieldError::new("amount", "must be greater than 0")])
        }
        Some(amount) => Ok(amount),
    }
}

fn required_text(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<String>,
) -> Option<String> {
    match value {
        Some(text) if !text.is_empty() => Some(text),
        _ => {
            errors.push(FieldError::new(field, "is required"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CampaignDraft {
        CampaignDraft {
            title: Some("Clean water".into()),
            description: Some("Wells for the valley".into()),
            target_amount: Some(Numeric::Number(100.0)),
            image: None,
            parent_campaign_id: None,
        }
    }

    #[test]
    fn accepts_a_complete_draft() {
        let parent_id = CampaignId::new();
        let new_campaign = validate_campaign(CampaignDraft {
            image: Some("https://example.com/well.png".into()),
            parent_campaign_id: Some(parent_id),
            ..draft()
        })
        .unwrap();

        assert_eq!(new_campaign.title, "Clean water");
        assert_eq!(new_campaign.description, "Wells for the valley");
        assert_eq!(new_campaign.target_amount, 100.0);
        assert_eq!(
            new_campaign.image.as_deref(),
            Some("https://example.com/well.png")
        );
        assert_eq!(new_campaign.parent_campaign_id, Some(parent_id));
    }

    #[test]
    fn coerces_numeric_strings() {
        let new_campaign = validate_campaign(CampaignDraft {
            target_amount: Some(Numeric::Text(" 250.5 ".into())),
            ..draft()
        })
        .unwrap();

        assert_eq!(new_campaign.target_amount, 250.5);
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = validate_campaign(CampaignDraft::default()).unwrap_err();

        assert_eq!(
            errors,
            vec![
                FieldError::new("title", "is required"),
                FieldError::new("description", "is required"),
                FieldError::new("targetAmount", "is required"),
            ]
        );
    }

    #[test]
    fn rejects_empty_text() {
        let errors = validate_campaign(CampaignDraft {
            title: Some("".into()),
            ..draft()
        })
        .unwrap_err();

        assert_eq!(errors, vec![FieldError::new("title", "is required")]);
    }

    #[test]
    fn rejects_target_below_minimum() {
        let errors = validate_campaign(CampaignDraft {
            target_amount: Some(Numeric::Number(0.5)),
            ..draft()
        })
        .unwrap_err();

        assert_eq!(
            errors,
            vec![FieldError::new("targetAmount", "must be at least 1")]
        );
    }

    #[test]
    fn rejects_non_numeric_target() {
        let errors = validate_campaign(CampaignDraft {
            target_amount: Some(Numeric::Text("lots".into())),
            ..draft()
        })
        .unwrap_err();

        assert_eq!(
            errors,
            vec![FieldError::new("targetAmount", "must be a number")]
        );
    }

    #[test]
    fn accepts_positive_donations() {
        let amount = validate_donation(DonationDraft {
            amount: Some(Numeric::Text("50".into())),
        })
        .unwrap();

        assert_eq!(amount, 50.0);
    }

    #[test]
    fn rejects_bad_donations() {
        let cases = vec![
            (None, "is required"),
            (Some(Numeric::Text("abc".into())), "must be a number"),
            (Some(Numeric::Text("NaN".into())), "must be a finite number"),
            (Some(Numeric::Number(0.0)), "must be greater than 0"),
            (Some(Numeric::Number(-20.0)), "must be greater than 0"),
        ];

        for (amount, message) in cases {
            let errors = validate_donation(DonationDraft { amount }).unwrap_err();
            assert_eq!(errors, vec![FieldError::new("amount", message)]);
        }
    }
}
