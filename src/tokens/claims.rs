use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Client origin at issuance time (advisory signal, not authorization data)
    pub origin: String,
    /// The user identifier this token was issued to
    pub sub: String,
}

impl AccessClaims {
    /// Build claims for a token issued now with the given validity window
    pub fn new(user_id: &str, origin: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            origin: origin.to_string(),
            sub: user_id.to_string(),
        }
    }
}

/// Sign claims into a compact HS512 token
pub fn sign(
    claims: &AccessClaims,
    key: &EncodingKey,
) -> Result<String, jsonwebtoken::errors::Error> {
    jsonwebtoken::encode(&Header::new(Algorithm::HS512), claims, key)
}

/// Decode and fully validate a token, including expiry
pub fn decode(
    token: &str,
    key: &DecodingKey,
) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS512);
    Ok(jsonwebtoken::decode::<AccessClaims>(token, key, &validation)?.claims)
}

/// Decode a token checking signature and claim shape but not expiry.
///
/// Rotation accepts expired access tokens: the refresh secret is the
/// credential being exchanged, the token only names the subject.
pub fn decode_ignore_expiry(
    token: &str,
    key: &DecodingKey,
) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS512);
    validation.validate_exp = false;
    Ok(jsonwebtoken::decode::<AccessClaims>(token, key, &validation)?.claims)
}
