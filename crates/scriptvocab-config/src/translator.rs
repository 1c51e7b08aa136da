use serde::{Deserialize, Serialize};

fn default_from_lang() -> String {
    "auto".to_string()
}

fn default_to_lang() -> String {
    "en".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Endpoint receiving the multipart submission. Submissions fail while unset.
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
