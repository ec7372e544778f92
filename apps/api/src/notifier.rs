use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use crate::models::lead::Lead;

/// Best-effort outbound notifications. Failures are logged by the caller and
/// never surfaced to the submitting client.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn lead_submitted(&self, lead: &Lead) -> Result<()>;
}

/// Sends confirmation/notification mail through the SendGrid v3 API.
pub struct EmailNotifier {
    http: reqwest::Client,
    api_key: String,
    from: String,
    /// Internal inbox notified about every new lead.
    team_inbox: String,
}

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

impl EmailNotifier {
    pub fn new(api_key: String, from: String, team_inbox: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            from,
            team_inbox,
        }
    }

    async fn send(&self, payload: serde_json::Value) -> Result<()> {
        let response = self
            .http
            .post(SENDGRID_SEND_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("mail provider returned {status}: {body}");
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn lead_submitted(&self, lead: &Lead) -> Result<()> {
        // Confirmation to the prospect and a heads-up to the team, as one call.
        self.send(mail_payload(lead, &self.from, &self.team_inbox))
            .await
    }
}

/// Builds the SendGrid personalization payload for a new lead: a
/// confirmation to the prospect plus an internal notification.
pub fn mail_payload(lead: &Lead, from: &str, team_inbox: &str) -> serde_json::Value {
    json!({
        "from": { "email": from },
        "personalizations": [
            {
                "to": [{ "email": lead.email }],
                "subject": "We received your application"
            },
            {
                "to": [{ "email": team_inbox }],
                "subject": format!("New lead: {} {}", lead.first_name, lead.last_name)
            }
        ],
        "content": [{
            "type": "text/plain",
            "value": format!(
                "Thanks {}, your application has been received and is pending review.",
                lead.first_name
            )
        }]
    })
}

/// No-op notifier used when mail is not configured, and by tests.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn lead_submitted(&self, lead: &Lead) -> Result<()> {
        tracing::debug!("Notifications disabled; skipping mail for lead {}", lead.id);
        Ok(())
    }
}

/// Hands the notification to a detached task bounded by `timeout`. The HTTP
/// response does not wait on it; outcomes are only logged.
pub fn spawn_notification(notifier: Arc<dyn Notifier>, lead: Lead, timeout: Duration) {
    tokio::spawn(async move {
        match tokio::time::timeout(timeout, notifier.lead_submitted(&lead)).await {
            Ok(Ok(())) => tracing::debug!("Notification sent for lead {}", lead.id),
            Ok(Err(e)) => tracing::warn!("Notification failed for lead {}: {e}", lead.id),
            Err(_) => tracing::warn!(
                "Notification timed out after {timeout:?} for lead {}",
                lead.id
            ),
        }
    });
}
