use std::sync::Arc;

use crate::config::Config;
use crate::notifier::Notifier;
use crate::storage::ResumeStore;
use crate::store::{LeadStore, UserStore};

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The store and storage seams are trait objects so the integration tests can
/// run the full router against in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    pub leads: Arc<dyn LeadStore>,
    pub users: Arc<dyn UserStore>,
    pub resumes: Arc<dyn ResumeStore>,
    pub notifier: Arc<dyn Notifier>,
    pub config: Config,
}
