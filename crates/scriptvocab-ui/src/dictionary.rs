use std::fmt;

use scriptvocab_core::StoreError;
use scriptvocab_types::{AuthUser, UserId, VocabRecord};

use crate::{ConfirmPrompt, REMOVE_CONFIRMATION, ResultsTable, Selection};

/// Fetch the viewer wants run after a sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub user: UserId,
}

/// Confirmed deletion, to be handed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalRequest {
    pub user: UserId,
    pub ids: Vec<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ViewerError {
    #[error("User ID is missing.")]
    MissingIdentity,

    #[error("Not in edit mode")]
    NotEditing,

    #[error("No record named {0:?}")]
    UnknownRecord(String),
}

/// What the dictionary screen currently shows
#[derive(Debug, PartialEq)]
pub enum DictionaryView<'a> {
    Loading,
    SignedOut,
    Empty,
    Records {
        records: &'a [VocabRecord],
        edit_mode: bool,
        selection: &'a Selection,
    },
}

/// Personal dictionary screen state.
///
/// Async work is not done here: [`auth_changed`](Self::auth_changed) and
/// [`request_removal`](Self::request_removal) return the request to run, and
/// the caller reports back through the matching `*_completed` method.
#[derive(Debug)]
pub struct DictionaryViewer {
    user: Option<UserId>,
    records: Option<Vec<VocabRecord>>,
    loading: bool,
    edit_mode: bool,
    selection: Selection,
}

impl Default for DictionaryViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryViewer {
    /// Starts out loading until the first auth state arrives
    pub fn new() -> Self {
        Self {
            user: None,
            records: None,
            loading: true,
            edit_mode: false,
            selection: Selection::new(),
        }
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn records(&self) -> Option<&[VocabRecord]> {
        self.records.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn auth_changed(&mut self, user: Option<AuthUser>) -> Option<FetchRequest> {
        match user {
            Some(user) => {
                if self.user.as_ref() != Some(&user.uid) {
                    self.records = None;
                    self.reset_edit();
                }
                self.user = Some(user.uid.clone());
                self.loading = true;
                Some(FetchRequest { user: user.uid })
            }
            None => {
                self.user = None;
                self.records = None;
                self.loading = false;
                self.reset_edit();
                None
            }
        }
    }

    pub fn fetch_completed(
        &mut self,
        user: &UserId,
        result: Result<Vec<VocabRecord>, StoreError>,
    ) {
        if self.user.as_ref() != Some(user) {
            tracing::debug!("Discarding dictionary fetched for {}", user);
            return;
        }

        self.loading = false;
        match result {
            Ok(records) => {
                tracing::debug!("Dictionary for {} has {} records", user, records.len());
                self.selection
                    .retain(|id| records.iter().any(|r| r.id() == id));
                self.records = Some(records);
            }
            Err(e) => {
                tracing::error!("Error fetching dictionary for {}: {}", user, e);
            }
        }
    }

    /// Reveal checkboxes. Ignored when there is nothing to edit.
    pub fn enter_edit_mode(&mut self) -> bool {
        if self.records.as_ref().is_some_and(|r| !r.is_empty()) {
            self.edit_mode = true;
        }
        self.edit_mode
    }

    pub fn cancel_edit_mode(&mut self) {
        self.reset_edit();
    }

    /// Flip selection of a record. Returns whether it is now selected.
    pub fn toggle_record(&mut self, id: &str) -> Result<bool, ViewerError> {
        if !self.edit_mode {
            return Err(ViewerError::NotEditing);
        }

        let known = self
            .records
            .as_ref()
            .is_some_and(|records| records.iter().any(|r| r.id() == id));
        if !known {
            return Err(ViewerError::UnknownRecord(id.to_string()));
        }

        Ok(self.selection.toggle(id))
    }

    /// Ask for confirmation and produce the deletion to run.
    ///
    /// `Ok(None)` means nothing should happen: the selection is empty or the
    /// user declined.
    pub async fn request_removal(
        &mut self,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Result<Option<RemovalRequest>, ViewerError> {
        let Some(user) = self.user.clone() else {
            tracing::error!("{}", ViewerError::MissingIdentity);
            return Err(ViewerError::MissingIdentity);
        };

        if self.selection.is_empty() {
            tracing::debug!("Nothing selected for removal");
            return Ok(None);
        }

        if !prompt.confirm(REMOVE_CONFIRMATION).await {
            tracing::debug!("Removal declined");
            return Ok(None);
        }

        Ok(Some(RemovalRequest {
            user,
            ids: self.selection.ids().to_vec(),
        }))
    }

    pub fn removal_completed(&mut self, request: &RemovalRequest, result: Result<(), StoreError>) {
        if let Err(e) = result {
            tracing::error!("Error removing selected records: {}", e);
            return;
        }

        if self.user.as_ref() != Some(&request.user) {
            tracing::debug!("Removal finished after {} signed out", request.user);
            return;
        }

        if let Some(records) = self.records.as_mut() {
            records.retain(|record| !request.ids.iter().any(|id| id == record.id()));
        }
        self.reset_edit();
    }

    pub fn view(&self) -> DictionaryView<'_> {
        if self.loading {
            return DictionaryView::Loading;
        }
        if self.user.is_none() {
            return DictionaryView::SignedOut;
        }

        match self.records.as_deref() {
            Some(records) if !records.is_empty() => DictionaryView::Records {
                records,
                edit_mode: self.edit_mode,
                selection: &self.selection,
            },
            _ => DictionaryView::Empty,
        }
    }

    fn reset_edit(&mut self) {
        self.selection.clear();
        self.edit_mode = false;
    }
}

impl fmt::Display for DictionaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionaryView::Loading => writeln!(f, "Loading..."),
            DictionaryView::SignedOut => writeln!(f, "Sign in to see your personal dictionary."),
            DictionaryView::Empty => writeln!(f, "Your personal dictionary is empty."),
            DictionaryView::Records {
                records,
                edit_mode,
                selection,
            } => {
                writeln!(f, "Personal Dictionary")?;
                writeln!(f)?;
                if *edit_mode {
                    write!(f, "{}", ResultsTable::new(records).with_selection(selection))?;
                    writeln!(f)?;
                    writeln!(f, "{} selected. Actions: toggle <word>, remove, cancel", selection.len())
                } else {
                    write!(f, "{}", ResultsTable::new(records))?;
                    writeln!(f)?;
                    writeln!(f, "Actions: edit")
                }
            }
        }
    }
}
