use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{DecodingKey, EncodingKey};
use serde::Serialize;
use thiserror::Error;

use crate::config::TokenConfig;
use crate::notify::MismatchNotifier;
use crate::storage::{CredentialStore, StoreError};

use super::claims::{self, AccessClaims};
use super::secret::generate_refresh_secret;

#[derive(Debug, Error)]
pub enum AuthorityError {
    #[error("User identifier must not be empty")]
    EmptyUserId,
    #[error("Access token has expired")]
    ExpiredAccessToken,
    #[error("Hashing failure: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
    #[error("Invalid access token")]
    InvalidAccessToken,
    #[error("Invalid refresh token")]
    InvalidRefreshToken,
    #[error("Random source failure: {0}")]
    RandomSource(#[from] rand::Error),
    #[error("Token signing failure: {0}")]
    Signing(jsonwebtoken::errors::Error),
    #[error("Store failure: {0}")]
    Store(StoreError),
    #[error("Unknown user")]
    UnknownUser,
}

impl AuthorityError {
    /// Whether the failure was caused by the credentials the client presented
    /// (as opposed to a server-side fault). Client failures map to 401/400 at
    /// the transport and are never retried; neither are server faults.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthorityError::EmptyUserId
                | AuthorityError::ExpiredAccessToken
                | AuthorityError::InvalidAccessToken
                | AuthorityError::InvalidRefreshToken
                | AuthorityError::UnknownUser
        )
    }
}

/// A freshly minted access token and refresh secret.
///
/// The refresh secret appears in plaintext exactly here; the server keeps
/// only its bcrypt hash.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_secret: String,
}

/// Owns the signing key and the credential lifecycle protocol.
///
/// Stateless per call: the only shared state is the immutable key material
/// and the credential store behind its own synchronization. Concurrent
/// rotations for the same user resolve last-writer-wins through the store's
/// atomic upsert.
pub struct TokenAuthority {
    access_ttl: Duration,
    bcrypt_cost: u32,
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    notifier: Arc<dyn MismatchNotifier>,
    store: Arc<dyn CredentialStore>,
}

impl TokenAuthority {
    pub fn new(
        tokens: &TokenConfig,
        store: Arc<dyn CredentialStore>,
        notifier: Arc<dyn MismatchNotifier>,
    ) -> Self {
        let key_bytes = tokens.signing_key.as_bytes();
        Self {
            access_ttl: Duration::minutes(tokens.access_ttl_minutes),
            bcrypt_cost: tokens.bcrypt_cost,
            decoding_key: DecodingKey::from_secret(key_bytes),
            encoding_key: EncodingKey::from_secret(key_bytes),
            notifier,
            store,
        }
    }

    /// Issue a fresh credential pair for a user.
    ///
    /// Persists the bcrypt hash of the new refresh secret (replacing any
    /// prior record for the user) before returning. No partial success: if
    /// the store write fails the caller gets no credentials.
    pub fn issue(&self, user_id: &str, origin: &str) -> Result<CredentialPair, AuthorityError> {
        if user_id.is_empty() {
            return Err(AuthorityError::EmptyUserId);
        }

        let claims = AccessClaims::new(user_id, origin, self.access_ttl);
        let access_token =
            claims::sign(&claims, &self.encoding_key).map_err(AuthorityError::Signing)?;

        let refresh_secret = generate_refresh_secret()?;
        let secret_hash = bcrypt::hash(&refresh_secret, self.bcrypt_cost)?;

        self.store
            .save(user_id, &secret_hash, origin)
            .map_err(AuthorityError::Store)?;

        tracing::debug!(user_id = %user_id, origin = %origin, "Issued credential pair");

        Ok(CredentialPair {
            access_token,
            refresh_secret,
        })
    }

    /// Exchange a refresh secret for a new credential pair.
    ///
    /// The presented access token may be expired; only its signature and
    /// claim shape are checked here. An origin differing from the one the
    /// token was bound to raises a notification but never blocks the
    /// rotation. On success the stored record is overwritten, so the old
    /// refresh secret is permanently unusable.
    pub fn rotate(
        &self,
        access_token: &str,
        refresh_secret: &str,
        origin: &str,
    ) -> Result<CredentialPair, AuthorityError> {
        let claims = claims::decode_ignore_expiry(access_token, &self.decoding_key)
            .map_err(|_| AuthorityError::InvalidAccessToken)?;

        if claims.origin != origin {
            // Advisory only; the notifier swallows its own failures.
            self.notifier.origin_mismatch(&claims.sub);
        }

        let record = match self.store.fetch(&claims.sub) {
            Ok(record) => record,
            Err(StoreError::NotFound) => return Err(AuthorityError::UnknownUser),
            Err(e) => return Err(AuthorityError::Store(e)),
        };

        if !bcrypt::verify(refresh_secret, &record.secret_hash)? {
            return Err(AuthorityError::InvalidRefreshToken);
        }

        tracing::debug!(user_id = %claims.sub, "Rotating credentials");

        self.issue(&claims.sub, origin)
    }

    /// Validate an access token, returning its claims.
    ///
    /// Unlike [`rotate`](Self::rotate), this checks expiry.
    pub fn verify(&self, access_token: &str) -> Result<AccessClaims, AuthorityError> {
        claims::decode(access_token, &self.decoding_key).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AuthorityError::ExpiredAccessToken
            }
            _ => AuthorityError::InvalidAccessToken,
        })
    }
}
