//! Protocol constants: wire alignment and policy ceilings.
//!
//! Every value here is part of the handshake wire contract. Peers that
//! disagree on any of them will reject each other's messages.

/// XDR alignment unit in bytes. Every item on the wire is padded to it.
pub const XDR_ALIGN: usize = 4;

/// Internal page size of an XDR buffer (bytes).
pub const XDR_PAGE_SIZE: usize = 1024;

/// Maximum length of a curve/algorithm name on the wire (bytes).
pub const MAX_ALGORITHM_NAME_LEN: usize = 63;

/// Maximum magnitude length accepted when decoding a big number (bytes).
pub const MAX_BIGNUM_LEN: usize = 1024;

/// Maximum number of candidate keys carried by a challenge.
pub const MAX_CHALLENGE_KEYS: usize = 3;

/// Flag word preceding a certificate blob: "certificate is compressed".
pub const CERT_COMPRESSED_FLAG: u32 = 1;

/// Maximum serialized challenge or response message (bytes).
pub const MAX_MESSAGE_LEN: usize = 2048;

/// Maximum compressed certificate blob (bytes).
pub const MAX_CERTIFICATE_LEN: usize = 4096;

/// Maximum inflated certificate size (bytes). Guards against deflate bombs.
pub const MAX_INFLATED_LEN: usize = 64 * 1024;

/// Maximum login length (bytes).
pub const MAX_LOGIN_LEN: usize = 64;

/// Maximum password length (bytes).
pub const MAX_PASSWORD_LEN: usize = 64;

/// Maximum encrypted-credentials blob (bytes).
pub const MAX_CREDENTIALS_LEN: usize = 128;

/// Sealed blob header: the XSalsa20 nonce.
pub const SEAL_HEADER_LEN: usize = 24;

/// Sealed blob trailer: the Poly1305 MAC.
pub const SEAL_MAC_LEN: usize = 16;

/// Session key length in bytes (HKDF-SHA256 output).
pub const SESSION_KEY_LEN: usize = 32;
