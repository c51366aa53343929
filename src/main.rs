use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use fundraising::{Error, Settings};

#[actix_web::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::NEW)
        .compact()
        .init();

    let settings = Settings::load()?;

    fundraising::run(settings).await
}
