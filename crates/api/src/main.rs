//! Hearth service binary

use hearth_api::{build_router, AppContext};
use hearth_domain::Vendor;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = hearth_infra::config::load()?;
    let bind_addr = config.server.bind_addr.clone();
    let context = AppContext::new(config)?;

    // Shark needs a sign-in before its first listing; failure degrades to
    // the mock robot rather than aborting startup.
    if !context.credentials.is_configured(Vendor::Shark)
        && context.config.shark.username.is_some()
        && context.config.shark.password.is_some()
    {
        if let Err(err) = context.shark.sign_in().await {
            warn!(error = %err, "Shark sign-in failed; serving mock robot");
        }
    }

    let router = build_router(context);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(%bind_addr, "hearth listening");
    axum::serve(listener, router).await?;

    Ok(())
}
