use rand::rngs::OsRng;
use rand::RngCore;

/// Raw entropy per refresh secret (256 bits)
pub const SECRET_BYTES: usize = 32;

/// Generate a refresh secret: 32 bytes from the OS CSPRNG, hex encoded
/// (64 characters). The plaintext is handed to the caller exactly once;
/// only a bcrypt hash of it is ever stored.
pub fn generate_refresh_secret() -> Result<String, rand::Error> {
    let mut bytes = [0u8; SECRET_BYTES];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(hex::encode(bytes))
}
