use std::sync::Arc;

use tracing::warn;

use crate::{
    models::user::{Credential, LoginUser},
    services::user_store::{StoreError, UserStore},
};

/// Result of checking a credential against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(LoginUser),
    Rejected,
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Issue exactly one lookup and map its rows.
    ///
    /// The lowest id wins when several accounts share a login name and
    /// password, whatever order the store returned them in. Store errors are
    /// returned as-is; the store already logged them with the query text.
    pub async fn authenticate(&self, credential: &Credential) -> Result<LoginOutcome, StoreError> {
        let users = self.store.find_by_credential(credential).await?;

        if users.len() > 1 {
            warn!(
                login_name = %credential.login_name,
                matches = users.len(),
                "Multiple accounts match one credential, using lowest id"
            );
        }

        Ok(match users.into_iter().min_by_key(|user| user.id) {
            Some(user) => LoginOutcome::Authenticated(user),
            None => LoginOutcome::Rejected,
        })
    }
}
