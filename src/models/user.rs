use serde::{Deserialize, Serialize};

/// Credential pair submitted by a client.
///
/// Empty strings are legal and simply match no stored account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential {
    pub login_name: String,
    pub password: String,
}

impl Credential {
    pub fn new(login_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login_name: login_name.into(),
            password: password.into(),
        }
    }
}

/// Full `loguser` row. Owned by the store; this service never writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub department: String,
    pub purview: String,
    pub logname: String,
    pub logpassword: String,
}

impl UserRecord {
    pub fn matches(&self, credential: &Credential) -> bool {
        self.logname == credential.login_name && self.logpassword == credential.password
    }
}

/// Columns read by the credential lookup. The password column is only
/// filtered on, never selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LoginUser {
    pub id: i64,
    pub department: String,
    pub purview: String,
    pub logname: String,
}

impl From<&UserRecord> for LoginUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id,
            department: record.department.clone(),
            purview: record.purview.clone(),
            logname: record.logname.clone(),
        }
    }
}
