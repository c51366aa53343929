use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, Document};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::Database;

use crate::database::MongoCampaignStore;
use crate::error::Error;

use super::{Campaign, CampaignId, NewCampaign};

pub const CAMPAIGNS: &str = "campaigns";

pub async fn initialize(db: &Database) -> Result<(), Error> {
    db.run_command(
        bson::doc! {
            "createIndexes": CAMPAIGNS,
            "indexes": [
                { "key": { "parentCampaignId": 1 }, "name": "by_parent_campaign_id" },
            ]
        },
        None,
    )
    .await?;

    Ok(())
}

/// Selects a set of campaigns by their place in the hierarchy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CampaignFilter {
    MainCampaigns,
    SubCampaignsOf(CampaignId),
}

impl CampaignFilter {
    pub fn to_document(&self) -> Document {
        match *self {
            // matches both an explicit null and a missing field
            CampaignFilter::MainCampaigns => bson::doc! { "parentCampaignId": null },
            CampaignFilter::SubCampaignsOf(parent_id) => {
                bson::doc! { "parentCampaignId": parent_id }
            }
        }
    }
}

#[async_trait]
pub trait CampaignStore: Send + Sync {
    /// Stores a new campaign, assigning its id and creation time.
    async fn insert_campaign(&self, new_campaign: NewCampaign) -> Result<Campaign, Error>;

    async fn fetch_campaigns(&self, filter: CampaignFilter) -> Result<Vec<Campaign>, Error>;

    async fn fetch_campaign_by_id(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Campaign>, Error>;

    /// Atomically adds `amount` (which may be negative) to the campaign's
    /// current amount and returns the updated campaign, or `None` if it does
    /// not exist.
    async fn increment_campaign_amount(
        &self,
        campaign_id: CampaignId,
        amount: f64,
    ) -> Result<Option<Campaign>, Error>;

    async fn delete_campaign_by_id(&self, campaign_id: CampaignId) -> Result<bool, Error>;

    async fn delete_campaigns(&self, filter: CampaignFilter) -> Result<u64, Error>;
}

#[async_trait]
impl CampaignStore for MongoCampaignStore {
    #[tracing::instrument(skip(self))]
    async fn insert_campaign(&self, new_campaign: NewCampaign) -> Result<Campaign, Error> {
        let campaign = Campaign::create(new_campaign);
        self.insert_one(&campaign, None).await?;

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaigns(&self, filter: CampaignFilter) -> Result<Vec<Campaign>, Error> {
        let options = FindOptions::builder()
            .sort(bson::doc! { "createdAt": 1 })
            .build();

        let campaigns: Vec<Campaign> = self
            .find(filter.to_document(), options)
            .await?
            .try_collect()
            .await?;

        Ok(campaigns)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaign_by_id(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Campaign>, Error> {
        let campaign: Option<Campaign> = self
            .find_one(bson::doc! { "_id": campaign_id }, None)
            .await?;

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    async fn increment_campaign_amount(
        &self,
        campaign_id: CampaignId,
        amount: f64,
    ) -> Result<Option<Campaign>, Error> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let campaign: Option<Campaign> = self
            .find_one_and_update(
                bson::doc! { "_id": campaign_id },
                bson::doc! { "$inc": { "currentAmount": amount } },
                options,
            )
            .await?;

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_campaign_by_id(&self, campaign_id: CampaignId) -> Result<bool, Error> {
        let result = self
            .delete_one(bson::doc! { "_id": campaign_id }, None)
            .await?;

        Ok(result.deleted_count > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_campaigns(&self, filter: CampaignFilter) -> Result<u64, Error> {
        let result = self.delete_many(filter.to_document(), None).await?;

        Ok(result.deleted_count)
    }
}
