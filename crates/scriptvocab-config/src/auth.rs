use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    /// User signed in at startup, if any
    pub default_user: Option<String>,
}
