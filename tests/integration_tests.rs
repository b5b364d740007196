//! End-to-end credential lifecycle tests against the on-disk store

use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use token_mint::config::TokenConfig;
use token_mint::notify::MismatchNotifier;
use token_mint::storage::{CredentialStore, Database};
use token_mint::tokens::{AuthorityError, TokenAuthority};

/// Records every origin-mismatch alert for later assertions
#[derive(Default)]
struct RecordingNotifier {
    notified: Mutex<Vec<String>>,
}

impl MismatchNotifier for RecordingNotifier {
    fn origin_mismatch(&self, user_id: &str) {
        self.notified.lock().unwrap().push(user_id.to_string());
    }
}

fn setup_authority() -> (TokenAuthority, Arc<Database>, Arc<RecordingNotifier>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db = Arc::new(Database::open(temp_dir.path()).unwrap());
    let notifier = Arc::new(RecordingNotifier::default());

    let tokens = TokenConfig {
        access_ttl_minutes: 30,
        bcrypt_cost: 4, // minimum cost; the hash strength isn't under test
        signing_key: "integration-test-key-0123456789abcdef".to_string(),
    };

    let authority = TokenAuthority::new(
        &tokens,
        Arc::clone(&db) as Arc<dyn CredentialStore>,
        Arc::clone(&notifier) as Arc<dyn MismatchNotifier>,
    );
    (authority, db, notifier, temp_dir)
}

#[test]
fn test_issue_then_rotate_lifecycle() {
    let (authority, db, notifier, _temp) = setup_authority();

    // Issue for user "u1" from origin "10.0.0.1"
    let first = authority.issue("u1", "10.0.0.1").unwrap();
    let claims = authority.verify(&first.access_token).unwrap();
    assert_eq!(claims.sub, "u1");
    assert_eq!(claims.origin, "10.0.0.1");

    // Rotate with the correct secret from the same origin
    let second = authority
        .rotate(&first.access_token, &first.refresh_secret, "10.0.0.1")
        .unwrap();
    assert_ne!(second.access_token, first.access_token);
    assert_ne!(second.refresh_secret, first.refresh_secret);
    assert!(notifier.notified.lock().unwrap().is_empty());

    // The store holds the hash of the new secret only
    let record = db.fetch("u1").unwrap();
    assert!(bcrypt::verify(&second.refresh_secret, &record.secret_hash).unwrap());
    assert!(!bcrypt::verify(&first.refresh_secret, &record.secret_hash).unwrap());
}

#[test]
fn test_rotation_is_single_use() {
    let (authority, _db, _notifier, _temp) = setup_authority();

    let first = authority.issue("u1", "10.0.0.1").unwrap();
    let second = authority
        .rotate(&first.access_token, &first.refresh_secret, "10.0.0.1")
        .unwrap();

    // Replaying the consumed secret fails, with either the old or new token
    for token in [&first.access_token, &second.access_token] {
        let err = authority
            .rotate(token, &first.refresh_secret, "10.0.0.1")
            .unwrap_err();
        assert!(matches!(err, AuthorityError::InvalidRefreshToken));
    }
}

#[test]
fn test_rotation_from_new_origin_notifies_once() {
    let (authority, db, notifier, _temp) = setup_authority();

    let pair = authority.issue("u1", "10.0.0.1").unwrap();
    authority
        .rotate(&pair.access_token, &pair.refresh_secret, "198.51.100.23")
        .unwrap();

    assert_eq!(notifier.notified.lock().unwrap().as_slice(), ["u1"]);

    // The new origin is recorded with the new secret
    assert_eq!(db.fetch("u1").unwrap().origin, "198.51.100.23");
}

#[test]
fn test_users_rotate_independently() {
    let (authority, _db, _notifier, _temp) = setup_authority();

    let a = authority.issue("alice", "10.0.0.1").unwrap();
    let b = authority.issue("bob", "10.0.0.2").unwrap();

    // Rotating alice's credentials leaves bob's untouched
    authority
        .rotate(&a.access_token, &a.refresh_secret, "10.0.0.1")
        .unwrap();
    authority
        .rotate(&b.access_token, &b.refresh_secret, "10.0.0.2")
        .unwrap();
}

#[test]
fn test_wrong_secret_rejected() {
    let (authority, _db, _notifier, _temp) = setup_authority();

    let pair = authority.issue("u1", "10.0.0.1").unwrap();
    let other = authority.issue("u2", "10.0.0.1").unwrap();

    // u2's secret against u1's token fails the stored-hash comparison
    let err = authority
        .rotate(&pair.access_token, &other.refresh_secret, "10.0.0.1")
        .unwrap_err();
    assert!(matches!(err, AuthorityError::InvalidRefreshToken));
}
