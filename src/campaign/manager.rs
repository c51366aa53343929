use tracing::{debug, warn};

use crate::database::Database;
use crate::error::Error;

use super::db::CampaignFilter;
use super::validation::{self, CampaignDraft, FieldError};
use super::{Campaign, CampaignId};

#[tracing::instrument(skip(db))]
pub async fn create_campaign(db: &dyn Database, draft: CampaignDraft) -> Result<Campaign, Error> {
    let new_campaign = validation::validate_campaign(draft)
        .map_err(|errors| Error::CampaignValidationFailed { errors })?;

    if let Some(parent_id) = new_campaign.parent_campaign_id {
        let parent = db.campaigns().fetch_campaign_by_id(parent_id).await?;
        let problem = match parent {
            None => Some("does not reference an existing campaign"),
            Some(parent) if !parent.is_main() => {
                Some("references a sub-campaign, only main campaigns can have sub-campaigns")
            }
            Some(_) => None,
        };

        if let Some(problem) = problem {
            return Err(Error::CampaignValidationFailed {
                errors: vec![FieldError::new("parentCampaignId", problem)],
            });
        }
    }

    db.campaigns().insert_campaign(new_campaign).await
}

#[tracing::instrument(skip(db))]
pub async fn get_main_campaigns(db: &dyn Database) -> Result<Vec<Campaign>, Error> {
    let campaigns = db
        .campaigns()
        .fetch_campaigns(CampaignFilter::MainCampaigns)
        .await?;

    Ok(campaigns)
}

#[tracing::instrument(skip(db))]
pub async fn get_sub_campaigns(
    db: &dyn Database,
    campaign_id: CampaignId,
) -> Result<Vec<Campaign>, Error> {
    let campaigns = db
        .campaigns()
        .fetch_campaigns(CampaignFilter::SubCampaignsOf(campaign_id))
        .await?;

    Ok(campaigns)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: &dyn Database,
    campaign_id: CampaignId,
) -> Result<Campaign, Error> {
    let campaign = db
        .campaigns()
        .fetch_campaign_by_id(campaign_id)
        .await?
        .ok_or(Error::CampaignNotFound { campaign_id })?;

    Ok(campaign)
}

/// Adds a donation to a campaign and, for a sub-campaign, to its parent.
///
/// A parent that no longer exists is skipped.
#[tracing::instrument(skip(db))]
pub async fn donate_to_campaign(
    db: &dyn Database,
    campaign_id: CampaignId,
    amount: f64,
) -> Result<Campaign, Error> {
    let campaign = db
        .campaigns()
        .increment_campaign_amount(campaign_id, amount)
        .await?
        .ok_or(Error::CampaignNotFound { campaign_id })?;

    if let Some(parent_id) = campaign.parent_campaign_id {
        let parent = db
            .campaigns()
            .increment_campaign_amount(parent_id, amount)
            .await?;

        if parent.is_none() {
            warn!(%campaign_id, %parent_id, "parent campaign is missing, donation not aggregated");
        }
    }

    Ok(campaign)
}

/// Deletes a campaign. Deleting a main campaign deletes its sub-campaigns
/// with it; deleting a sub-campaign withdraws its total from the parent.
#[tracing::instrument(skip(db))]
pub async fn delete_campaign(db: &dyn Database, campaign_id: CampaignId) -> Result<(), Error> {
    let campaign = get_campaign_by_id(db, campaign_id).await?;

    match campaign.parent_campaign_id {
        None => {
            let deleted = db
                .campaigns()
                .delete_campaigns(CampaignFilter::SubCampaignsOf(campaign_id))
                .await?;
            debug!(%campaign_id, deleted, "deleted sub-campaigns");
        }
        Some(parent_id) => {
            let parent = db
                .campaigns()
                .increment_campaign_amount(parent_id, -campaign.current_amount)
                .await?;

            if parent.is_none() {
                warn!(%campaign_id, %parent_id, "parent campaign is missing, total not withdrawn");
            }
        }
    }

    db.campaigns().delete_campaign_by_id(campaign_id).await?;

    Ok(())
}
