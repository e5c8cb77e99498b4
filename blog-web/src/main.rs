use anyhow::Result;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::password::PasswordHasher;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url, settings.db_max_connections).await?;
    run_migrations(&pool).await?;
    info!("migrations applied");

    let jwt = JwtService::new(&settings.session_secret, settings.session_ttl_seconds);
    let hasher = PasswordHasher::new(
        settings.password_hash_memory_kib,
        settings.password_hash_iterations,
    )?;

    let state = AppState::new(pool, jwt, hasher, settings.cookie_secure);
    server::run_http(&settings, state).await
}
