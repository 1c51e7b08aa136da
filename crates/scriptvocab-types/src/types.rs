use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a signed-in user, as handed out by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: UserId,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl AuthUser {
    pub fn new(uid: impl Into<UserId>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
        }
    }
}

/// A single vocabulary entry keyed by its original-language text.
///
/// Everything besides `original_text` is backend-defined and kept verbatim,
/// in the order the backend sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabRecord {
    pub original_text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VocabRecord {
    pub fn new(original_text: impl Into<String>) -> Self {
        Self {
            original_text: original_text.into(),
            extra: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Identifier used for selection and removal
    pub fn id(&self) -> &str {
        &self.original_text
    }
}

/// Record list as returned by backends: either `{"data": [...]}` or a bare array
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecordsBody {
    Wrapped { data: Vec<VocabRecord> },
    Bare(Vec<VocabRecord>),
}

impl RecordsBody {
    pub fn into_records(self) -> Vec<VocabRecord> {
        match self {
            RecordsBody::Wrapped { data } => data,
            RecordsBody::Bare(data) => data,
        }
    }
}
