use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use crate::config::DatabaseConfig;

/// Database connection wrapper for MySQL
///
/// Owns the `sqlx` connection pool shared by every request. The pool
/// enforces its own connection reuse; handlers only borrow connections
/// for the duration of one query.
#[derive(Clone)]
pub struct Database {
    /// Connection pool for the account store
    pub pool: MySqlPool,
}

impl Database {
    /// Create a new connection pool to MySQL
    ///
    /// Establishes at least one connection up front so a bad DSN or an
    /// unreachable server fails at startup rather than on the first login.
    ///
    /// # Parameters
    /// - `config`: DSN, pool size and acquire timeout
    ///
    /// # Returns
    /// - `Ok(Database)`: Pool created and connected
    /// - `Err(sqlx::Error)`: Connection failed
    ///
    /// # Example
    /// ```no_run
    /// # async fn run() -> Result<(), sqlx::Error> {
    /// use login_server::{config::AppConfig, services::database::Database};
    ///
    /// let db = Database::connect(&AppConfig::default().database).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        info!(
            max_connections = config.max_connections,
            "Connecting to MySQL"
        );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.dsn)
            .await?;

        info!("MySQL connection established successfully");

        Ok(Self { pool })
    }

    /// Close every pooled connection, waiting for checked-out ones to return.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("MySQL connection pool closed");
    }
}
