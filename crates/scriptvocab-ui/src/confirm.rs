/// Prompt shown before records are deleted
pub const REMOVE_CONFIRMATION: &str =
    "Are you sure you want to delete these records? This cannot be undone.";

/// Yes/no question put to the user
#[async_trait::async_trait]
pub trait ConfirmPrompt: Send {
    async fn confirm(&mut self, message: &str) -> bool;
}
