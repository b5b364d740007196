pub mod authority;
pub mod claims;
pub mod secret;

pub use authority::{AuthorityError, CredentialPair, TokenAuthority};
pub use claims::AccessClaims;
