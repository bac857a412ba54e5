//! Error types for latch operations.
//!
//! One enum covers the whole handshake stack: decoding untrusted bytes,
//! curve lookups, crypto failures and caller policy. Each variant has a
//! stable code string for diagnostics that cross a process boundary.

/// Unified error type for all latch operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LatchError {
    /// Decoder ran out of bytes.
    #[error("End of stream")]
    EndOfStream,

    /// Length prefix inconsistent with available or maximum bytes, or a
    /// structurally impossible value.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Unrecognized curve name.
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Underlying EC, AEAD or KDF primitive failed.
    #[error("Crypto failure: {0}")]
    CryptoFailure(String),

    /// A size ceiling was exceeded.
    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    /// Deflate or inflate of a blob failed.
    #[error("Compression error: {0}")]
    Compression(String),

    /// Operation called out of role or before its prerequisite state.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result alias used throughout the latch crates.
pub type LatchResult<T> = Result<T, LatchError>;

impl LatchError {
    /// Stable diagnostic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            LatchError::EndOfStream => "END_OF_STREAM",
            LatchError::InvalidEncoding(_) => "INVALID_ENCODING",
            LatchError::UnknownAlgorithm(_) => "UNKNOWN_ALGORITHM",
            LatchError::CryptoFailure(_) => "CRYPTO_FAILURE",
            LatchError::PolicyViolation(_) => "POLICY_VIOLATION",
            LatchError::Compression(_) => "COMPRESSION_FAILED",
            LatchError::InvalidState(_) => "INVALID_STATE",
        }
    }

    /// `true` for errors caused by bytes received from the peer.
    pub fn is_peer_input(&self) -> bool {
        matches!(
            self,
            LatchError::EndOfStream | LatchError::InvalidEncoding(_) | LatchError::Compression(_)
        )
    }
}

/// Every code `LatchError::code` can return, in variant order.
pub const ERROR_CODES: [&str; 7] = [
    "END_OF_STREAM",
    "INVALID_ENCODING",
    "UNKNOWN_ALGORITHM",
    "CRYPTO_FAILURE",
    "POLICY_VIOLATION",
    "COMPRESSION_FAILED",
    "INVALID_STATE",
];

/// Returns `true` if the given string is a latch error code.
pub fn is_valid_error_code(code: &str) -> bool {
    ERROR_CODES.contains(&code)
}
