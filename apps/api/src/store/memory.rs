use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::lead::{Lead, LeadStatus, NewLead};
use crate::models::user::StaffUser;
use crate::store::{LeadFilter, LeadPage, LeadStore, UserStore};

/// In-memory store used by the integration tests. Mirrors the filtering,
/// ordering and transition semantics of the Postgres implementation.
#[derive(Default)]
pub struct InMemoryStore {
    leads: Mutex<Vec<Lead>>,
    users: Mutex<Vec<StaffUser>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lead_count(&self) -> usize {
        self.leads.lock().unwrap().len()
    }
}

fn matches(lead: &Lead, filter: &LeadFilter) -> bool {
    if let Some(name) = &filter.name {
        let needle = name.to_lowercase();
        if !lead.first_name.to_lowercase().contains(&needle)
            && !lead.last_name.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    if let Some(email) = &filter.email {
        if !lead.email.to_lowercase().contains(&email.to_lowercase()) {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if lead.status != status {
            return false;
        }
    }
    true
}

#[async_trait]
impl LeadStore for InMemoryStore {
    async fn insert_lead(&self, new: NewLead) -> Result<Lead, AppError> {
        let now = Utc::now();
        let lead = Lead {
            id: new.id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            resume_key: new.resume_key,
            resume_original_filename: new.resume_original_filename,
            resume_mime_type: new.resume_mime_type,
            resume_size: new.resume_size,
            status: LeadStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.leads.lock().unwrap().push(lead.clone());
        Ok(lead)
    }

    async fn get_lead(&self, id: Uuid) -> Result<Option<Lead>, AppError> {
        Ok(self
            .leads
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    async fn list_leads(
        &self,
        filter: &LeadFilter,
        limit: i64,
        offset: i64,
    ) -> Result<LeadPage, AppError> {
        let leads = self.leads.lock().unwrap();
        let mut matched: Vec<Lead> = leads.iter().filter(|l| matches(l, filter)).cloned().collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matched.len() as i64;
        let items = matched
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();

        Ok(LeadPage { items, total })
    }

    async fn mark_reached_out(&self, id: Uuid) -> Result<Option<Lead>, AppError> {
        let mut leads = self.leads.lock().unwrap();
        let Some(lead) = leads.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        if lead.status == LeadStatus::Pending {
            lead.status = LeadStatus::ReachedOut;
            lead.updated_at = Utc::now();
        }
        Ok(Some(lead.clone()))
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<StaffUser>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<StaffUser, AppError> {
        let user = StaffUser {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_lead(first: &str, last: &str, email: &str) -> NewLead {
        let id = Uuid::new_v4();
        NewLead {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            resume_key: format!("{id}.pdf"),
            resume_original_filename: "resume.pdf".to_string(),
            resume_mime_type: "application/pdf".to_string(),
            resume_size: 1024,
        }
    }

    #[tokio::test]
    async fn insert_starts_pending_with_fresh_id() {
        let store = InMemoryStore::new();
        let a = store
            .insert_lead(new_lead("Jane", "Doe", "jane@example.com"))
            .await
            .unwrap();
        let b = store
            .insert_lead(new_lead("John", "Roe", "john@example.com"))
            .await
            .unwrap();

        assert_eq!(a.status, LeadStatus::Pending);
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn mark_reached_out_is_idempotent() {
        let store = InMemoryStore::new();
        let lead = store
            .insert_lead(new_lead("Jane", "Doe", "jane@example.com"))
            .await
            .unwrap();

        let first = store.mark_reached_out(lead.id).await.unwrap().unwrap();
        assert_eq!(first.status, LeadStatus::ReachedOut);

        let second = store.mark_reached_out(lead.id).await.unwrap().unwrap();
        assert_eq!(second.status, LeadStatus::ReachedOut);
        assert_eq!(second.updated_at, first.updated_at);
    }

    #[tokio::test]
    async fn mark_reached_out_unknown_id_is_none() {
        let store = InMemoryStore::new();
        assert!(store
            .mark_reached_out(Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn name_filter_matches_either_name_case_insensitively() {
        let store = InMemoryStore::new();
        store
            .insert_lead(new_lead("Jane", "Doe", "jane@example.com"))
            .await
            .unwrap();
        store
            .insert_lead(new_lead("John", "Smith", "john@example.com"))
            .await
            .unwrap();

        let filter = LeadFilter {
            name: Some("doe".to_string()),
            ..Default::default()
        };
        let page = store.list_leads(&filter, 10, 0).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].first_name, "Jane");
    }

    #[tokio::test]
    async fn email_filter_matches_substring_case_insensitively() {
        let store = InMemoryStore::new();
        store
            .insert_lead(new_lead("Jane", "Doe", "jane@corp-a.example.com"))
            .await
            .unwrap();
        store
            .insert_lead(new_lead("John", "Roe", "john@corp-b.example.com"))
            .await
            .unwrap();

        let filter = LeadFilter {
            email: Some("CORP-A".to_string()),
            ..Default::default()
        };
        let page = store.list_leads(&filter, 10, 0).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].email, "jane@corp-a.example.com");
    }

    #[tokio::test]
    async fn list_pages_and_counts_independently() {
        let store = InMemoryStore::new();
        for i in 0..5 {
            store
                .insert_lead(new_lead("Lead", "Num", &format!("lead{i}@example.com")))
                .await
                .unwrap();
        }

        let page = store
            .list_leads(&LeadFilter::default(), 2, 2)
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
    }
}
