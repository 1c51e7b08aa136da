use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::LanguageCode;
use crate::languages::SourceLanguage;

/// Filtering threshold applied server-side, always within `[MIN, MAX]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Threshold(u8);

impl Threshold {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 20;

    pub const DEFAULT_MIN_WORD_SIZE: Threshold = Threshold(2);
    pub const DEFAULT_MIN_APPEARANCE: Threshold = Threshold(1);

    /// Clamp `value` into range
    pub fn new(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<i64> for Threshold {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<Threshold> for u8 {
    fn from(value: Threshold) -> Self {
        value.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl UploadFile {
    /// Wrap file contents, guessing the mime type from the name's extension
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = guess_mime(&name).map(str::to_string);
        Self { name, bytes, mime }
    }
}

fn guess_mime(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "srt" => Some("application/x-subrip"),
        "vtt" => Some("text/vtt"),
        "ass" | "ssa" => Some("text/x-ssa"),
        "txt" => Some("text/plain"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionInput {
    Text(String),
    File(UploadFile),
}

/// Everything sent to the translation API in one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub input: SubmissionInput,
    pub subs_language: SourceLanguage,
    pub target_language: LanguageCode,
    pub min_word_size: Threshold,
    pub min_appearance: Threshold,
}

impl SubmissionPayload {
    /// Plain form fields, in submission order. The `text` field is included
    /// for text input; file content travels as a separate part.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("subs_language", self.subs_language.as_str().to_string()),
            ("target_language", self.target_language.clone()),
            ("min_word_size", self.min_word_size.to_string()),
            ("min_appearance", self.min_appearance.to_string()),
        ];

        if let SubmissionInput::Text(text) = &self.input {
            fields.push(("text", text.clone()));
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_clamps_to_bounds() {
        assert_eq!(Threshold::new(0).get(), 1);
        assert_eq!(Threshold::new(-7).get(), 1);
        assert_eq!(Threshold::new(7).get(), 7);
        assert_eq!(Threshold::new(21).get(), 20);
        assert_eq!(Threshold::new(i64::MAX).get(), 20);
    }

    #[test]
    fn threshold_deserializes_clamped() {
        let t: Threshold = serde_json::from_str("99").unwrap();
        assert_eq!(t.get(), 20);
        assert_eq!(serde_json::to_string(&t).unwrap(), "20");
    }

    #[test]
    fn text_payload_fields_with_defaults() {
        let payload = SubmissionPayload {
            input: SubmissionInput::Text("hola mundo".to_string()),
            subs_language: SourceLanguage::Auto,
            target_language: "en".to_string(),
            min_word_size: Threshold::DEFAULT_MIN_WORD_SIZE,
            min_appearance: Threshold::DEFAULT_MIN_APPEARANCE,
        };

        assert_eq!(
            payload.fields(),
            vec![
                ("subs_language", "auto".to_string()),
                ("target_language", "en".to_string()),
                ("min_word_size", "2".to_string()),
                ("min_appearance", "1".to_string()),
                ("text", "hola mundo".to_string()),
            ]
        );
    }

    #[test]
    fn file_payload_has_no_text_field() {
        let payload = SubmissionPayload {
            input: SubmissionInput::File(UploadFile::new("ep1.srt", b"1\n".to_vec())),
            subs_language: SourceLanguage::Code("es".to_string()),
            target_language: "en".to_string(),
            min_word_size: Threshold::new(4),
            min_appearance: Threshold::new(3),
        };

        assert!(payload.fields().iter().all(|(name, _)| *name != "text"));
    }

    #[test]
    fn upload_guesses_subtitle_mime() {
        assert_eq!(
            UploadFile::new("Show.S01E01.SRT", vec![]).mime.as_deref(),
            Some("application/x-subrip")
        );
        assert_eq!(UploadFile::new("notes", vec![]).mime, None);
    }
}
