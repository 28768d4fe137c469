//! Seeds the administrator account. Run with: cargo run --bin create-admin
//!
//! This is the only path that creates a user with the admin flag set; the
//! registration endpoint always inserts regular accounts.

use catalog_api::{auth::password::hash_password, auth::repo_types::User, state::AppState};

const ADMIN_NAME: &str = "Administrador";
const ADMIN_EMAIL: &str = "admin@nueltech.com";
const ADMIN_PASSWORD: &str = "admin123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "create_admin=info,catalog_api=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let state = AppState::init().await?;

    if let Some(existing) = User::find_by_email(&state.db, ADMIN_EMAIL).await? {
        tracing::info!(user_id = %existing.id, email = ADMIN_EMAIL, "admin user already exists");
        return Ok(());
    }

    let hash = hash_password(ADMIN_PASSWORD)?;
    let admin = User::create_admin(&state.db, ADMIN_NAME, ADMIN_EMAIL, &hash).await?;

    tracing::info!(
        user_id = %admin.id,
        email = %admin.email,
        password = ADMIN_PASSWORD,
        "admin user created"
    );
    Ok(())
}
