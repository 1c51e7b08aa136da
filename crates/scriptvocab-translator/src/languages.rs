use crate::LanguageCode;

/// Source language value asking the API to detect the language itself
pub const AUTO_DETECT: &str = "auto";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub label: &'static str,
}

/// Languages offered by the translation form
pub const LANGUAGES: &[Language] = &[
    Language { code: "en", label: "English" },
    Language { code: "es", label: "Spanish" },
    Language { code: "fr", label: "French" },
    Language { code: "de", label: "German" },
    Language { code: "it", label: "Italian" },
    Language { code: "pt", label: "Portuguese" },
    Language { code: "nl", label: "Dutch" },
    Language { code: "pl", label: "Polish" },
    Language { code: "sv", label: "Swedish" },
    Language { code: "tr", label: "Turkish" },
    Language { code: "ru", label: "Russian" },
    Language { code: "ar", label: "Arabic" },
    Language { code: "hi", label: "Hindi" },
    Language { code: "ja", label: "Japanese" },
    Language { code: "ko", label: "Korean" },
    Language { code: "zh", label: "Chinese" },
];

pub fn find_language(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.code.eq_ignore_ascii_case(code.trim()))
}

/// Input language selection: detect, or one of [`LANGUAGES`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceLanguage {
    #[default]
    Auto,
    Code(LanguageCode),
}

impl SourceLanguage {
    /// Parse a selector value, rejecting codes outside the catalogue
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case(AUTO_DETECT) {
            return Some(Self::Auto);
        }
        find_language(value).map(|l| Self::Code(l.code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            SourceLanguage::Auto => AUTO_DETECT,
            SourceLanguage::Code(code) => code,
        }
    }
}

/// Target language parse; `auto` is not a valid target
pub fn parse_target(value: &str) -> Option<LanguageCode> {
    find_language(value).map(|l| l.code.to_string())
}
