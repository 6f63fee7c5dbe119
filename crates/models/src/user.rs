use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Registered account. `password` holds the argon2 PHC string, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    /// Keys this service does not know about, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { id: id.into(), username: username.into(), password: password.into(), extra: Map::new() }
    }
}
