use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wedding_rsvp_server::{
    create_router,
    db::{import_guests, load_guest_list},
    open_database, AppState, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wedding_rsvp_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Wedding RSVP Server...");

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Environment: {}, Server: {}",
        config.environment,
        config.server_address()
    );

    let db = open_database(&config.database_path)?;

    // Seed guests from the guest list, if one is configured
    if let Some(path) = &config.guest_list_path {
        tracing::info!("Importing guest list from {}", path);
        let guests = load_guest_list(path)?;
        let db = db.clone();
        tokio::task::spawn_blocking(move || import_guests(&db, guests)).await??;
    }

    let state = AppState::from_config(db, config.clone());
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = config.server_address().parse()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
