//! token-mint - A small credential issuance and rotation service
//!
//! This crate issues short-lived signed access tokens paired with long-lived,
//! single-use refresh secrets:
//! - HS512-signed access tokens carrying {subject, client origin, iat, exp}
//! - 256-bit refresh secrets, stored server-side only as bcrypt hashes
//! - Single-record-per-user rotation: each refresh overwrites the prior hash,
//!   permanently invalidating the old secret
//! - Origin-change detection during rotation (advisory notification, never a
//!   rejection)
//! - redb embedded database (ACID, crash-safe) or in-memory store
//! - REST API

pub mod api;
pub mod config;
pub mod notify;
pub mod storage;
#[cfg(test)]
pub mod testutil;
pub mod tokens;

use config::Config;
use tokens::TokenAuthority;

/// Shared application state
pub struct AppState {
    pub authority: TokenAuthority,
    pub config: Config,
}
