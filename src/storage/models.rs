use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single stored refresh record for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRecord {
    /// Client origin recorded when the secret was issued
    pub origin: String,
    /// When this record was written (issuance or last rotation)
    pub rotated_at: DateTime<Utc>,
    /// bcrypt hash of the current refresh secret (never the plaintext)
    pub secret_hash: String,
    /// The owning principal
    pub user_id: String,
}
