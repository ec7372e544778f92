#![allow(dead_code)]

use std::sync::Arc;

use axum::response::Response;
use axum::Router;

use intake_api::auth::password::hash_password;
use intake_api::auth::token::mint_token;
use intake_api::config::Config;
use intake_api::notifier::NoopNotifier;
use intake_api::routes::build_router;
use intake_api::state::AppState;
use intake_api::storage::memory::InMemoryResumeStore;
use intake_api::store::memory::InMemoryStore;
use intake_api::store::UserStore;

pub const JWT_SECRET: &str = "test-secret";
pub const STAFF_EMAIL: &str = "staff@example.com";
pub const STAFF_PASSWORD: &str = "s3cret-password";

/// Router plus handles on the in-memory stores so tests can assert on
/// persisted state directly.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub resumes: Arc<InMemoryResumeStore>,
    pub config: Config,
}

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        jwt_secret: JWT_SECRET.to_string(),
        token_ttl_hours: 24,
        upload_dir: "uploads".into(),
        max_upload_bytes: 5 * 1024 * 1024,
        max_page_size: 100,
        default_page_size: 20,
        admin_email: None,
        admin_password: None,
        sendgrid_api_key: None,
        notify_from: None,
        notify_inbox: None,
        notify_timeout_secs: 1,
        port: 0,
        rust_log: "info".to_string(),
    }
}

pub fn build_app(config: Config) -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let resumes = Arc::new(InMemoryResumeStore::new());
    let state = AppState {
        leads: store.clone(),
        users: store.clone(),
        resumes: resumes.clone(),
        notifier: Arc::new(NoopNotifier),
        config: config.clone(),
    };
    TestApp {
        router: build_router(state),
        store,
        resumes,
        config,
    }
}

/// Registers the standard staff user so login tests have someone to be.
pub async fn seed_staff_user(app: &TestApp) {
    let hash = hash_password(STAFF_PASSWORD).unwrap();
    app.store.create_user(STAFF_EMAIL, &hash).await.unwrap();
}

pub fn staff_token() -> String {
    mint_token(STAFF_EMAIL, 24, JWT_SECRET).unwrap()
}

pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}
