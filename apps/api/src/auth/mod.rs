pub mod handlers;
pub mod middleware;
pub mod password;
pub mod token;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::store::UserStore;

/// Creates the bootstrap admin user on startup when `ADMIN_EMAIL` and
/// `ADMIN_PASSWORD` are configured and no such user exists yet.
pub async fn ensure_admin_user(users: &dyn UserStore, config: &Config) -> Result<()> {
    let (Some(email), Some(admin_password)) = (&config.admin_email, &config.admin_password) else {
        return Ok(());
    };

    if users.find_user_by_email(email).await?.is_some() {
        return Ok(());
    }

    let hash = password::hash_password(admin_password)?;
    users.create_user(email, &hash).await?;
    info!("Bootstrapped admin user {email}");
    Ok(())
}
