pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::lead::{Lead, LeadStatus, NewLead};
use crate::models::user::StaffUser;

/// Filters applied to the lead list, combined conjunctively.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    /// Case-insensitive substring match against first or last name.
    pub name: Option<String>,
    /// Case-insensitive substring match against the email address.
    pub email: Option<String>,
    pub status: Option<LeadStatus>,
}

/// A page of leads ordered by `created_at` descending, plus the total count
/// of rows matching the filter.
#[derive(Debug, Clone)]
pub struct LeadPage {
    pub items: Vec<Lead>,
    pub total: i64,
}

/// Persistence seam for leads. Implemented by Postgres in production and by
/// an in-memory store in tests.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn insert_lead(&self, new: NewLead) -> Result<Lead, AppError>;

    async fn get_lead(&self, id: Uuid) -> Result<Option<Lead>, AppError>;

    async fn list_leads(
        &self,
        filter: &LeadFilter,
        limit: i64,
        offset: i64,
    ) -> Result<LeadPage, AppError>;

    /// Transitions the lead to `reached_out` if it is still pending, refreshing
    /// `updated_at` only on that first transition. Returns `None` for unknown
    /// ids; already-transitioned leads are returned unchanged.
    async fn mark_reached_out(&self, id: Uuid) -> Result<Option<Lead>, AppError>;
}

/// Persistence seam for staff users.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<StaffUser>, AppError>;

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<StaffUser, AppError>;
}
