//! Security notification port.
//!
//! Rotation from an origin other than the one the access token was bound to is
//! a signal worth surfacing, but never a reason to refuse the rotation (NAT,
//! mobile networks, and proxies make client origins unreliable).

/// Receives origin-mismatch alerts raised during rotation.
///
/// Fire-and-forget: implementations must swallow their own delivery failures.
/// The authority never inspects an outcome.
pub trait MismatchNotifier: Send + Sync {
    fn origin_mismatch(&self, user_id: &str);
}

/// Notifier that emits a structured warning log
pub struct LogNotifier;

impl MismatchNotifier for LogNotifier {
    fn origin_mismatch(&self, user_id: &str) {
        tracing::warn!(user_id = %user_id, "Client origin changed since token issuance");
    }
}
