use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::lead::{Lead, NewLead};
use crate::models::user::StaffUser;
use crate::store::{LeadFilter, LeadPage, LeadStore, UserStore};

/// Postgres-backed store. All lead mutations are single statements, so
/// concurrent calls on the same row cannot observe a half-applied transition.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const LEAD_COLUMNS: &str = "id, first_name, last_name, email, resume_key, \
     resume_original_filename, resume_mime_type, resume_size, status, created_at, updated_at";

#[async_trait]
impl LeadStore for PgStore {
    async fn insert_lead(&self, new: NewLead) -> Result<Lead, AppError> {
        let lead: Lead = sqlx::query_as(&format!(
            "INSERT INTO leads \
                 (id, first_name, last_name, email, resume_key, \
                  resume_original_filename, resume_mime_type, resume_size) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {LEAD_COLUMNS}"
        ))
        .bind(new.id)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.resume_key)
        .bind(&new.resume_original_filename)
        .bind(&new.resume_mime_type)
        .bind(new.resume_size)
        .fetch_one(&self.pool)
        .await?;

        Ok(lead)
    }

    async fn get_lead(&self, id: Uuid) -> Result<Option<Lead>, AppError> {
        let lead: Option<Lead> =
            sqlx::query_as(&format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(lead)
    }

    async fn list_leads(
        &self,
        filter: &LeadFilter,
        limit: i64,
        offset: i64,
    ) -> Result<LeadPage, AppError> {
        const WHERE_CLAUSE: &str = "($1::text IS NULL \
                 OR first_name ILIKE '%' || $1 || '%' \
                 OR last_name ILIKE '%' || $1 || '%') \
            AND ($2::text IS NULL OR email ILIKE '%' || $2 || '%') \
            AND ($3::lead_status IS NULL OR status = $3)";

        let items: Vec<Lead> = sqlx::query_as(&format!(
            "SELECT {LEAD_COLUMNS} FROM leads \
             WHERE {WHERE_CLAUSE} \
             ORDER BY created_at DESC \
             LIMIT $4 OFFSET $5"
        ))
        .bind(&filter.name)
        .bind(&filter.email)
        .bind(filter.status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let (total,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM leads WHERE {WHERE_CLAUSE}"))
                .bind(&filter.name)
                .bind(&filter.email)
                .bind(filter.status)
                .fetch_one(&self.pool)
                .await?;

        Ok(LeadPage { items, total })
    }

    async fn mark_reached_out(&self, id: Uuid) -> Result<Option<Lead>, AppError> {
        // Conditional update: refreshes updated_at only when the row is still
        // pending. Zero rows means the lead is either absent or already
        // reached_out, which the follow-up select disambiguates.
        let updated: Option<Lead> = sqlx::query_as(&format!(
            "UPDATE leads \
             SET status = 'reached_out', updated_at = now() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING {LEAD_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(lead) => Ok(Some(lead)),
            None => self.get_lead(id).await,
        }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<StaffUser>, AppError> {
        let user: Option<StaffUser> = sqlx::query_as(
            "SELECT id, email, password_hash, created_at FROM staff_users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<StaffUser, AppError> {
        let user: StaffUser = sqlx::query_as(
            "INSERT INTO staff_users (id, email, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING id, email, password_hash, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
