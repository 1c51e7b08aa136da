pub mod auth;
pub mod store;

pub use auth::{AuthProvider, AuthSubscription, SessionAuth};
pub use store::{DictionaryStore, StoreError};
