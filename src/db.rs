use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::auth::password;
use crate::config::AppConfig;
use crate::models::user;

pub async fn init_pool(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Create the `admin` account when no user exists yet. Safe to run on every start.
pub async fn seed_admin(pool: &PgPool, admin_password: &str) -> Result<(), sqlx::Error> {
    if user::count(pool).await? > 0 {
        return Ok(());
    }
    let hash = match password::hash_password(admin_password) {
        Ok(h) => h,
        Err(e) => {
            log::error!("Could not hash the admin password, skipping seed: {}", e);
            return Ok(());
        }
    };
    user::create(pool, "admin", &hash, "Administrator").await?;
    log::warn!("Seeded default 'admin' account; change ADMIN_PASSWORD for production");
    Ok(())
}
