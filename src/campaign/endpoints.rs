use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;

use super::validation::{self, CampaignDraft, DonationDraft};
use super::{manager, Campaign, CampaignId};

pub type CreateCampaignBody = CampaignDraft;
pub type DonateBody = DonationDraft;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignBody {
    #[serde(rename = "_id")]
    pub id: CampaignId,
    pub title: String,
    pub description: String,
    pub target_amount: f64,
    pub current_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub parent_campaign_id: Option<CampaignId>,
    pub created_at: DateTime<Utc>,
}

impl CampaignBody {
    pub fn render(campaign: Campaign) -> CampaignBody {
        CampaignBody {
            id: campaign.id,
            title: campaign.title,
            description: campaign.description,
            target_amount: campaign.target_amount,
            current_amount: campaign.current_amount,
            image: campaign.image,
            parent_campaign_id: campaign.parent_campaign_id,
            created_at: campaign.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[get("/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn get_campaigns(
    db: Data<Box<dyn Database>>,
) -> Result<Json<Vec<CampaignBody>>, Error> {
    let campaigns = manager::get_main_campaigns(&***db).await?;

    let body = campaigns.into_iter().map(CampaignBody::render).collect();

    Ok(Json(body))
}

#[get("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: Data<Box<dyn Database>>,
    params: Path<CampaignId>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();
    let campaign = manager::get_campaign_by_id(&***db, campaign_id).await?;

    Ok(Json(CampaignBody::render(campaign)))
}

#[get("/campaigns/{campaign_id}/sub-campaigns")]
#[tracing::instrument(skip(db))]
pub async fn get_sub_campaigns(
    db: Data<Box<dyn Database>>,
    params: Path<CampaignId>,
) -> Result<Json<Vec<CampaignBody>>, Error> {
    let campaign_id = params.into_inner();
    let campaigns = manager::get_sub_campaigns(&***db, campaign_id).await?;

    let body = campaigns.into_iter().map(CampaignBody::render).collect();

    Ok(Json(body))
}

#[post("/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn create_campaign(
    db: Data<Box<dyn Database>>,
    body: Json<CreateCampaignBody>,
) -> Result<HttpResponse, Error> {
    let body = body.into_inner();
    let campaign = manager::create_campaign(&***db, body).await?;

    Ok(HttpResponse::Created().json(CampaignBody::render(campaign)))
}

#[delete("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn delete_campaign(
    db: Data<Box<dyn Database>>,
    params: Path<CampaignId>,
) -> Result<Json<MessageBody>, Error> {
    let campaign_id = params.into_inner();
    manager::delete_campaign(&***db, campaign_id).await?;

    Ok(Json(MessageBody {
        message: "Campaign deleted successfully".to_string(),
    }))
}

#[post("/campaigns/{campaign_id}/donate")]
#[tracing::instrument(skip(db))]
pub async fn donate_to_campaign(
    db: Data<Box<dyn Database>>,
    params: Path<CampaignId>,
    body: Json<DonateBody>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();
    let amount = validation::validate_donation(body.into_inner())
        .map_err(|errors| Error::DonationValidationFailed { errors })?;

    let campaign = manager::donate_to_campaign(&***db, campaign_id, amount).await?;

    Ok(Json(CampaignBody::render(campaign)))
}
