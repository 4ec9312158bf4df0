use std::process::ExitCode;

use tracing::{error, info};
use tuvalix::{Config, app, logging};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    if let Err(e) = logging::init() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    info!("🐙 Starting...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "⚙️ ❌ Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = app::run(config).await {
        error!(error = %e, "❌ Server stopped");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
