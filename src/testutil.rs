//! Shared test helpers — available to all `#[cfg(test)]` modules in the crate.

use std::sync::Arc;

use tempfile::TempDir;

use crate::config::{Config, NodeConfig, TokenConfig};
use crate::notify::testing::RecordingNotifier;
use crate::storage::{Database, MemoryStore};
use crate::tokens::TokenAuthority;

pub const TEST_SIGNING_KEY: &str = "unit-test-signing-key-0123456789abcdef";

/// Open a fresh database in a temporary directory.
///
/// Returns both the `Database` and the `TempDir` guard — the caller must
/// keep the `TempDir` alive for the duration of the test.
pub fn setup_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db = Database::open(temp_dir.path()).unwrap();
    (db, temp_dir)
}

/// Token parameters suitable for unit tests: minimum bcrypt cost so the
/// slow-hash step doesn't dominate the test run.
pub fn test_token_config() -> TokenConfig {
    TokenConfig {
        access_ttl_minutes: 30,
        bcrypt_cost: 4,
        signing_key: TEST_SIGNING_KEY.to_string(),
    }
}

/// A minimal `Config` suitable for unit tests.
pub fn test_config() -> Config {
    Config {
        node: NodeConfig {
            bind_address: "127.0.0.1:8080".to_string(),
            data_dir: "/tmp/test".to_string(),
        },
        tokens: test_token_config(),
    }
}

/// Build a `TokenAuthority` over an in-memory store and a recording
/// notifier, returning all three so tests can inspect the collaborators.
pub fn test_authority() -> (TokenAuthority, Arc<MemoryStore>, Arc<RecordingNotifier>) {
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let authority = TokenAuthority::new(
        &test_token_config(),
        Arc::clone(&store) as _,
        Arc::clone(&notifier) as _,
    );
    (authority, store, notifier)
}
