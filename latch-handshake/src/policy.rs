//! Caller policy: size ceilings enforced by the orchestrator.
//!
//! The encoder itself never enforces these. The handshake checks them
//! before handing data to the encoder, and checks the certificate and
//! credentials ceilings again on every decoded peer message before
//! committing it.

use latch_core::constants::{
    MAX_CERTIFICATE_LEN, MAX_CREDENTIALS_LEN, MAX_LOGIN_LEN, MAX_MESSAGE_LEN, MAX_PASSWORD_LEN,
};

/// Size ceilings for one handshake, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandshakePolicy {
    /// Maximum serialized challenge or response.
    pub max_message_len: usize,
    /// Maximum login.
    pub max_login_len: usize,
    /// Maximum password.
    pub max_password_len: usize,
    /// Maximum sealed credentials blob. Values above `MAX_CREDENTIALS_LEN`
    /// are ineffective; the wire decoder caps the blob there.
    pub max_credentials_len: usize,
    /// Maximum compressed certificate.
    pub max_certificate_len: usize,
}

impl Default for HandshakePolicy {
    fn default() -> Self {
        Self {
            max_message_len: MAX_MESSAGE_LEN,
            max_login_len: MAX_LOGIN_LEN,
            max_password_len: MAX_PASSWORD_LEN,
            max_credentials_len: MAX_CREDENTIALS_LEN,
            max_certificate_len: MAX_CERTIFICATE_LEN,
        }
    }
}
