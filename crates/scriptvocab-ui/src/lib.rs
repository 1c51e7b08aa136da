pub mod confirm;
pub mod dictionary;
pub mod selection;
pub mod table;
pub mod translation;

pub use confirm::{ConfirmPrompt, REMOVE_CONFIRMATION};
pub use dictionary::{DictionaryView, DictionaryViewer, FetchRequest, RemovalRequest, ViewerError};
pub use selection::Selection;
pub use table::ResultsTable;
pub use translation::{FormError, InputMode, SubmitStatus, TranslationForm};
