use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::{Deserialize, Serialize};

pub mod db;
pub mod endpoints;
mod id;
pub mod manager;
pub mod validation;
pub use endpoints::*;
pub use id::{CampaignId, CampaignIdParseError};

use id::{object_id, option_object_id};

/// A stored campaign. A campaign without a parent is a main campaign; its
/// `current_amount` includes the totals of all of its sub-campaigns.
///
/// Stored with camelCase keys and ObjectId references, the layout of the
/// `campaigns` collection shared with the existing front-end deployment.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(rename = "_id", with = "object_id")]
    pub id: CampaignId,
    pub title: String,
    pub description: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, with = "option_object_id")]
    pub parent_campaign_id: Option<CampaignId>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    /// Assigns a fresh id and creation time to a validated campaign.
    ///
    /// The creation time is truncated to the millisecond precision of a BSON
    /// datetime so that the returned value matches what is read back later.
    pub fn create(new_campaign: NewCampaign) -> Campaign {
        Campaign {
            id: CampaignId::new(),
            title: new_campaign.title,
            description: new_campaign.description,
            target_amount: new_campaign.target_amount,
            current_amount: 0.0,
            image: new_campaign.image,
            parent_campaign_id: new_campaign.parent_campaign_id,
            created_at: bson::DateTime::now().to_chrono(),
        }
    }

    pub fn is_main(&self) -> bool {
        self.parent_campaign_id.is_none()
    }
}

/// A campaign that passed validation but has not been stored yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCampaign {
    pub title: String,
    pub description: String,
    pub target_amount: f64,
    pub image: Option<String>,
    pub parent_campaign_id: Option<CampaignId>,
}

#[cfg(test)]
mod tests {
    use mongodb::bson::oid::ObjectId;
    use mongodb::bson::{doc, Bson};

    use super::*;

    fn new_campaign(parent_campaign_id: Option<CampaignId>) -> NewCampaign {
        NewCampaign {
            title: "Books".into(),
            description: "Picture books".into(),
            target_amount: 100.0,
            image: None,
            parent_campaign_id,
        }
    }

    #[test]
    fn stores_ids_as_object_ids_with_camel_case_keys() {
        let parent_id = CampaignId::new();
        let campaign = Campaign::create(new_campaign(Some(parent_id)));

        let document = bson::to_document(&campaign).unwrap();

        assert_eq!(document.get("_id"), Some(&Bson::from(campaign.id)));
        assert!(matches!(document.get("_id"), Some(Bson::ObjectId(_))));
        assert_eq!(document.get("parentCampaignId"), Some(&Bson::from(parent_id)));
        assert_eq!(document.get_f64("targetAmount").unwrap(), 100.0);
        assert_eq!(document.get_f64("currentAmount").unwrap(), 0.0);
        assert!(document.get_datetime("createdAt").is_ok());
    }

    #[test]
    fn main_campaigns_store_a_null_parent() {
        let campaign = Campaign::create(new_campaign(None));

        let document = bson::to_document(&campaign).unwrap();

        assert_eq!(document.get("parentCampaignId"), Some(&Bson::Null));
    }

    #[test]
    fn reads_existing_documents() {
        let id = ObjectId::new();
        let parent_id = ObjectId::new();
        let document = doc! {
            "_id": id,
            "title": "Books",
            "description": "Picture books",
            "targetAmount": 100,
            "currentAmount": 30,
            "parentCampaignId": parent_id,
            "createdAt": bson::DateTime::now(),
            "__v": 0,
        };

        let campaign: Campaign = bson::from_document(document).unwrap();

        assert_eq!(campaign.id.to_string(), id.to_hex());
        assert_eq!(
            campaign.parent_campaign_id.map(|id| id.to_string()),
            Some(parent_id.to_hex())
        );
        assert_eq!(campaign.target_amount, 100.0);
        assert_eq!(campaign.current_amount, 30.0);
        assert_eq!(campaign.image, None);
    }
}
