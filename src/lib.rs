use actix_cors::Cors;
use actix_web::web::{self, Data, JsonConfig, PathConfig, ServiceConfig};
use actix_web::{App, HttpResponse, HttpServer};
use tracing::info;
use tracing_actix_web::TracingLogger;

pub mod campaign;
pub mod database;
pub mod error;
pub mod settings;

pub use campaign::{CampaignBody, CreateCampaignBody, DonateBody, MessageBody};
pub use error::Error;
pub use settings::Settings;

use crate::database::{Database, MongoDatabase};

/// Registers the extractor error handlers and every route of the api.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(JsonConfig::default().error_handler(|err, _req| {
        // format json errors with custom format
        Error::InvalidJson(err).into()
    }))
    .app_data(PathConfig::default().error_handler(|err, _req| {
        // format path errors with custom format
        Error::InvalidPath(err).into()
    }))
    .service(
        web::scope("/api")
            .service(campaign::endpoints::get_campaigns)
            .service(campaign::endpoints::get_campaign_by_id)
            .service(campaign::endpoints::get_sub_campaigns)
            .service(campaign::endpoints::create_campaign)
            .service(campaign::endpoints::delete_campaign)
            .service(campaign::endpoints::donate_to_campaign),
    )
    .default_service(web::to(|| async {
        Err::<HttpResponse, _>(Error::PathNotFound)
    }));
}

/// Connects to the database, serves the api until the server is stopped and
/// then closes the connection.
pub async fn run(settings: Settings) -> Result<(), Error> {
    let db = MongoDatabase::connect(&settings.mongodb_uri).await?;

    let server_db = db.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(Data::new(Box::new(server_db.clone()) as Box<dyn Database>))
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .configure(configure)
    })
    .bind((settings.bind_address.as_str(), settings.port))?;

    info!("listening on {}:{}", settings.bind_address, settings.port);
    server.run().await?;

    db.shutdown().await;

    Ok(())
}
