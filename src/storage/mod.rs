pub mod db;
mod memory;
pub mod models;

pub use db::{Database, DatabaseError};
pub use memory::MemoryStore;

use models::RefreshRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("No refresh record for user")]
    NotFound,
}

/// Persistence contract for refresh-secret records.
///
/// Exactly one live record per user: `save` is an insert-or-replace keyed by
/// user id, and `fetch` returns the current record or [`StoreError::NotFound`].
/// Implementations must make the upsert atomic; callers rely on last-writer-wins
/// when two rotations for the same user race.
pub trait CredentialStore: Send + Sync {
    fn save(&self, user_id: &str, secret_hash: &str, origin: &str) -> Result<(), StoreError>;
    fn fetch(&self, user_id: &str) -> Result<RefreshRecord, StoreError>;
}
