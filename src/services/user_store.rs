use std::time::Instant;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

use crate::models::user::{Credential, LoginUser};
use crate::services::database::Database;

/// Selects accounts whose login name and stored password both equal the
/// submitted values. Plaintext comparison; ordered so the lowest id comes
/// first. No `LIMIT`: every match is fetched.
pub const FIND_BY_CREDENTIAL_SQL: &str = "SELECT `id`, `department`, `purview`, `logname` \
     FROM `loguser` WHERE `logname` = ? AND `logpassword` = ? ORDER BY `id`";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the account table.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All accounts matching `credential`, ascending by id, unlimited.
    /// One round trip.
    async fn find_by_credential(&self, credential: &Credential)
        -> Result<Vec<LoginUser>, StoreError>;
}

#[async_trait]
impl UserStore for Database {
    async fn find_by_credential(
        &self,
        credential: &Credential,
    ) -> Result<Vec<LoginUser>, StoreError> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, LoginUser>(FIND_BY_CREDENTIAL_SQL)
            .bind(&credential.login_name)
            .bind(&credential.password)
            .fetch_all(&self.pool)
            .await;

        match result {
            Ok(users) => {
                info!(
                    duration_ms = started.elapsed().as_millis() as u64,
                    sql = FIND_BY_CREDENTIAL_SQL,
                    rows = users.len(),
                    "DB query successful"
                );
                Ok(users)
            }
            Err(e) => {
                error!(sql = FIND_BY_CREDENTIAL_SQL, "DB query error: {}", e);
                Err(StoreError::Query(e))
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryUserStore;


#[cfg(any(test, feature = "test-support"))]
mod memory {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{StoreError, UserStore};
    use crate::models::user::{Credential, LoginUser, UserRecord};

    /// In-process stand-in for the `loguser` table.
    #[derive(Default)]
    pub struct MemoryUserStore {
        records: Mutex<Vec<UserRecord>>,
        failing: AtomicBool,
        queries: AtomicUsize,
    }

    impl MemoryUserStore {
        pub fn with_records(records: Vec<UserRecord>) -> Self {
            Self {
                records: Mutex::new(records),
                ..Self::default()
            }
        }

        pub fn insert(&self, record: UserRecord) {
            self.records
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(record);
        }

        /// Make every subsequent query fail as if the database were down.
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub fn query_count(&self) -> usize {
            self.queries.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn find_by_credential(
            &self,
            credential: &Credential,
        ) -> Result<Vec<LoginUser>, StoreError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable("connection refused".to_string()));
            }

            let records = self
                .records
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let mut users: Vec<LoginUser> = records
                .iter()
                .filter(|record| record.matches(credential))
                .map(LoginUser::from)
                .collect();
            users.sort_by_key(|user| user.id);
            Ok(users)
        }
    }
}
