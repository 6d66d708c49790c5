use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::models::user::{Credential, LoginUser};

pub const LOGIN_MISMATCH_MESSAGE: &str = "Loginname or password not correct.";

/// Body of `POST /v1/login`.
///
/// Unknown fields are ignored; a missing field decodes as `""`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(rename = "loginname", default)]
    pub login_name: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    /// Decode a raw request body.
    ///
    /// A `null` body decodes to empty fields, and keys match
    /// case-insensitively (`LoginName`, `PASSWORD`), with an exact-case key
    /// taking precedence over a folded one.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Null => Ok(Self::default()),
            Value::Object(fields) => serde_json::from_value(Value::Object(fold_keys(fields))),
            other => serde_json::from_value(other),
        }
    }
}

fn fold_keys(fields: Map<String, Value>) -> Map<String, Value> {
    let mut folded = Map::new();
    let mut exact = Map::new();
    for (key, value) in fields {
        match ["loginname", "password"]
            .into_iter()
            .find(|name| key.eq_ignore_ascii_case(name))
        {
            Some(name) if key == name => {
                exact.insert(key, value);
            }
            Some(name) => {
                folded.insert(name.to_string(), value);
            }
            None => {
                folded.insert(key, value);
            }
        }
    }
    folded.extend(exact);
    folded
}

impl From<LoginRequest> for Credential {
    fn from(request: LoginRequest) -> Self {
        Self {
            login_name: request.login_name,
            password: request.password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub id: i64,
    pub department: String,
    pub purview: String,
    pub logname: String,
}

impl From<LoginUser> for LoginResponse {
    fn from(user: LoginUser) -> Self {
        Self {
            id: user.id,
            department: user.department,
            purview: user.purview,
            logname: user.logname,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginErrorResponse {
    pub error: String,
}

impl LoginErrorResponse {
    pub fn mismatch() -> Self {
        Self {
            error: LOGIN_MISMATCH_MESSAGE.to_string(),
        }
    }
}

/// What the login endpoint writes. Success and mismatch share a status code
/// by default, so the body shape is the only discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoginResult {
    Success(LoginResponse),
    Failure(LoginErrorResponse),
}
