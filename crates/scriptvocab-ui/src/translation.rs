use std::fmt;
use std::str::FromStr;

use scriptvocab_translator::languages::parse_target;
use scriptvocab_translator::{
    LanguageCode, SourceLanguage, SubmissionInput, SubmissionPayload, Threshold, TranslateError,
    TranslationResponse, UploadFile,
};

use crate::ResultsTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Text,
    File,
}

impl FromStr for InputMode {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "file" => Ok(Self::File),
            other => Err(FormError::UnknownInputMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Loading,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please provide input text or select a file")]
    MissingInput,

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Unknown input type: {0}")]
    UnknownInputMode(String),

    #[error("A submission is already in progress")]
    Busy,
}

/// Translation submission form state
#[derive(Debug, Clone)]
pub struct TranslationForm {
    mode: InputMode,
    text: String,
    file: Option<UploadFile>,
    input_language: SourceLanguage,
    output_language: LanguageCode,
    min_word_size: Threshold,
    min_appearance: Threshold,
    status: SubmitStatus,
    response: Option<TranslationResponse>,
}

impl Default for TranslationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslationForm {
    pub fn new() -> Self {
        Self {
            mode: InputMode::Text,
            text: String::new(),
            file: None,
            input_language: SourceLanguage::Auto,
            output_language: "en".to_string(),
            min_word_size: Threshold::DEFAULT_MIN_WORD_SIZE,
            min_appearance: Threshold::DEFAULT_MIN_APPEARANCE,
            status: SubmitStatus::Idle,
            response: None,
        }
    }

    /// Form preset with the given default languages
    pub fn with_languages(input: &str, output: &str) -> Result<Self, FormError> {
        let mut form = Self::new();
        form.set_input_language(input)?;
        form.set_output_language(output)?;
        Ok(form)
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_file(&mut self, file: Option<UploadFile>) {
        self.file = file;
    }

    pub fn input_language(&self) -> &SourceLanguage {
        &self.input_language
    }

    pub fn set_input_language(&mut self, code: &str) -> Result<(), FormError> {
        self.input_language = SourceLanguage::parse(code)
            .ok_or_else(|| FormError::UnknownLanguage(code.to_string()))?;
        Ok(())
    }

    pub fn output_language(&self) -> &str {
        &self.output_language
    }

    pub fn set_output_language(&mut self, code: &str) -> Result<(), FormError> {
        self.output_language =
            parse_target(code).ok_or_else(|| FormError::UnknownLanguage(code.to_string()))?;
        Ok(())
    }

    pub fn min_word_size(&self) -> Threshold {
        self.min_word_size
    }

    /// Set the word size floor, clamped into range
    pub fn set_min_word_size(&mut self, value: i64) -> Threshold {
        self.min_word_size = Threshold::new(value);
        self.min_word_size
    }

    pub fn min_appearance(&self) -> Threshold {
        self.min_appearance
    }

    /// Set the appearance floor, clamped into range
    pub fn set_min_appearance(&mut self, value: i64) -> Threshold {
        self.min_appearance = Threshold::new(value);
        self.min_appearance
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn response(&self) -> Option<&TranslationResponse> {
        self.response.as_ref()
    }

    /// Validate and package the form. On success the form is loading until
    /// [`submission_completed`](Self::submission_completed) is called.
    pub fn submit(&mut self) -> Result<SubmissionPayload, FormError> {
        if self.status == SubmitStatus::Loading {
            return Err(FormError::Busy);
        }

        let input = match self.mode {
            InputMode::Text if !self.text.is_empty() => SubmissionInput::Text(self.text.clone()),
            InputMode::File => match &self.file {
                Some(file) => SubmissionInput::File(file.clone()),
                None => return Err(Self::reject(FormError::MissingInput)),
            },
            InputMode::Text => return Err(Self::reject(FormError::MissingInput)),
        };

        self.status = SubmitStatus::Loading;

        Ok(SubmissionPayload {
            input,
            subs_language: self.input_language.clone(),
            target_language: self.output_language.clone(),
            min_word_size: self.min_word_size,
            min_appearance: self.min_appearance,
        })
    }

    pub fn submission_completed(&mut self, result: Result<TranslationResponse, TranslateError>) {
        self.status = SubmitStatus::Idle;
        match result {
            Ok(response) => {
                tracing::info!("Received {} vocabulary rows", response.data.len());
                self.response = Some(response);
            }
            Err(e) => {
                tracing::error!("Translation request failed: {}", e);
            }
        }
    }

    pub fn view(&self) -> TranslationView<'_> {
        TranslationView {
            loading: self.status == SubmitStatus::Loading,
            response: self.response.as_ref(),
        }
    }

    fn reject(err: FormError) -> FormError {
        tracing::error!("{}", err);
        err
    }
}

/// Render state of the translation screen
#[derive(Debug, PartialEq)]
pub struct TranslationView<'a> {
    pub loading: bool,
    pub response: Option<&'a TranslationResponse>,
}

impl fmt::Display for TranslationView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.loading {
            writeln!(f, "Translating...")?;
        }
        match self.response {
            Some(response) if response.data.is_empty() => writeln!(f, "No vocabulary found."),
            Some(response) => write!(f, "{}", ResultsTable::new(&response.data)),
            None => Ok(()),
        }
    }
}
