use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

/// Establishes a connection pool to the MySQL database.
///
/// The pool is shared by every repository and every concurrent request; no
/// repository keeps a connection between calls.
pub async fn connect(settings: &DatabaseSettings) -> Result<MySqlPool, DbError> {
    if settings.url.trim().is_empty() {
        return Err(DbError::ConnectionConfigError(
            "database.url must be set.".to_string(),
        ));
    }

    let pool = MySqlPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout())
        .connect(&settings.url)
        .await
        .map_err(DbError::Unavailable)?;

    tracing::info!(max_connections = settings.max_connections, "Connected to the database.");
    Ok(pool)
}
