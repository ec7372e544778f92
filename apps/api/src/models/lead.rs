use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Position of a lead in the outreach workflow.
///
/// The only legal transition is `Pending -> ReachedOut`; re-marking a lead
/// that has already been reached out to is an idempotent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "lead_status", rename_all = "snake_case")]
pub enum LeadStatus {
    Pending,
    ReachedOut,
}

impl LeadStatus {
    /// Parses a status filter value, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("pending") {
            Some(LeadStatus::Pending)
        } else if raw.eq_ignore_ascii_case("reached_out") {
            Some(LeadStatus::ReachedOut)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lead {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Storage key of the resume blob: `{id}.{ext}` under the upload root.
    pub resume_key: String,
    pub resume_original_filename: String,
    pub resume_mime_type: String,
    pub resume_size: i64,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields persisted for a freshly submitted lead. The id is generated by the
/// service before the row exists so the resume key can be derived from it.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub resume_key: String,
    pub resume_original_filename: String,
    pub resume_mime_type: String,
    pub resume_size: i64,
}
