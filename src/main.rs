use std::sync::Arc;

use cookable_api::{create_router, AppState, Config};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cookable_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Missing dataset or a failed fit aborts startup
    let state = AppState::from_config(&config).inspect_err(|e| {
        tracing::error!(
            error = %e,
            path = %config.recipes_csv_path,
            "Failed to initialise recipe engine"
        );
    })?;

    let app = create_router(Arc::new(state));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
