use mongodb::bson;
use mongodb::{Client, Collection};
use tracing::info;

use crate::campaign::db::{self as campaign_db, CampaignStore, CAMPAIGNS};
use crate::campaign::Campaign;
use crate::error::Error;

pub const DEFAULT_DATABASE: &str = "fundraisingnew";

pub type MongoCampaignStore = Collection<Campaign>;

pub trait Database: Send + Sync {
    fn campaigns(&self) -> &dyn CampaignStore;
}

/// The MongoDB connection shared by every request handler.
#[derive(Debug, Clone)]
pub struct MongoDatabase {
    client: Client,
    campaigns: MongoCampaignStore,
}

impl MongoDatabase {
    /// Connects to the deployment at `uri`, using the database named in the
    /// uri or [`DEFAULT_DATABASE`] when it names none.
    pub async fn connect(uri: &str) -> Result<MongoDatabase, Error> {
        let client = Client::with_uri_str(uri).await?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        info!("connecting to db: {}", db.name());

        // ping the database to ensure connection is established
        db.run_command(bson::doc! { "ping": 1 }, None).await?;

        campaign_db::initialize(&db).await?;

        Ok(MongoDatabase {
            campaigns: db.collection(CAMPAIGNS),
            client,
        })
    }

    pub async fn shutdown(self) {
        info!("closing db connection");
        self.client.shutdown().await;
    }
}

impl Database for MongoDatabase {
    fn campaigns(&self) -> &dyn CampaignStore {
        &self.campaigns
    }
}
