use std::error::Error;

use tracing::{error, info};

mod telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; variables may come from the process environment.
    let dotenv = dotenvy::dotenv();

    telemetry::init()?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => info!("no .env file, using process environment"),
        Err(e) => return Err(e.into()),
    }

    if let Err(e) = api::start().await {
        error!(error = %e, "server failed");
        return Err(e.into());
    }

    Ok(())
}
