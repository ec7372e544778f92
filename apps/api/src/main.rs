use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use intake_api::auth::ensure_admin_user;
use intake_api::config::Config;
use intake_api::db::create_pool;
use intake_api::notifier::{EmailNotifier, NoopNotifier, Notifier};
use intake_api::routes::build_router;
use intake_api::state::AppState;
use intake_api::storage::fs::FsResumeStore;
use intake_api::store::postgres::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting intake API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;

    let store = Arc::new(PgStore::new(db));
    let resumes = Arc::new(FsResumeStore::new(config.upload_dir.clone()));
    info!("Resume storage root: {}", config.upload_dir.display());

    let notifier: Arc<dyn Notifier> = match (
        config.sendgrid_api_key.clone(),
        config.notify_from.clone(),
        config.notify_inbox.clone(),
    ) {
        (Some(api_key), Some(from), Some(inbox)) => {
            info!("Email notifications enabled");
            Arc::new(EmailNotifier::new(api_key, from, inbox))
        }
        _ => {
            info!("Email notifications disabled (mail provider not configured)");
            Arc::new(NoopNotifier)
        }
    };

    ensure_admin_user(store.as_ref(), &config).await?;

    let state = AppState {
        leads: store.clone(),
        users: store,
        resumes,
        notifier,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
