use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;

use super::models::RefreshRecord;
use super::{CredentialStore, StoreError};

/// In-memory credential store. Used as a test double and for ephemeral runs
/// where durability across restarts is not wanted.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, RefreshRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn save(&self, user_id: &str, secret_hash: &str, origin: &str) -> Result<(), StoreError> {
        let record = RefreshRecord {
            origin: origin.to_string(),
            rotated_at: Utc::now(),
            secret_hash: secret_hash.to_string(),
            user_id: user_id.to_string(),
        };
        self.records
            .write()
            .expect("credential map lock poisoned")
            .insert(user_id.to_string(), record);
        Ok(())
    }

    fn fetch(&self, user_id: &str) -> Result<RefreshRecord, StoreError> {
        self.records
            .read()
            .expect("credential map lock poisoned")
            .get(user_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}
