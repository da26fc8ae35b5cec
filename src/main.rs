use std::process::ExitCode;

use squash_bot::{build_state, router, Settings};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "squash_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting squash bot");

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            error!(error = %err, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let state = match build_state(&settings) {
        Ok(state) => state,
        Err(err) => {
            error!(error = %err, "Could not build application state");
            return ExitCode::FAILURE;
        }
    };

    let address = format!("0.0.0.0:{}", settings.port);
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(error = %err, address = %address, "Could not bind");
            return ExitCode::FAILURE;
        }
    };

    info!("Server running on http://{address}");
    if let Err(err) = axum::serve(listener, router(state)).await {
        error!(error = %err, "Server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
