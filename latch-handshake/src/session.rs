//! Session key derivation.
//!
//! ```text
//! session_key = HKDF-SHA256(salt = none,
//!                           ikm  = ECDH shared x-coordinate,
//!                           info = "latch/ecdh-session/v1:" || canonical curve name)
//! ```
//! Both peers feed the same shared point and the same curve name, so the
//! derivation is symmetric. The canonical name (not the wire spelling) is
//! used, so alias spellings on either side derive the same key.

use hkdf::Hkdf;
use latch_core::constants::SESSION_KEY_LEN;
use latch_core::encoding::to_hex;
use latch_core::errors::{LatchError, LatchResult};
use sha2::{Digest, Sha256};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::curve::NamedCurve;

/// HKDF info prefix; the canonical curve name follows it.
pub const SESSION_INFO_PREFIX: &[u8] = b"latch/ecdh-session/v1:";

/// Derived 32-byte session key. Wiped on drop; compared in constant time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SessionKey([u8; SESSION_KEY_LEN]);

impl ConstantTimeEq for SessionKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for SessionKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SessionKey {}

impl SessionKey {
    /// Derive from the raw shared x-coordinate.
    pub fn derive(curve: NamedCurve, shared_x: &[u8]) -> LatchResult<Self> {
        let mut info = SESSION_INFO_PREFIX.to_vec();
        info.extend_from_slice(curve.name().as_bytes());

        let hk = Hkdf::<Sha256>::new(None, shared_x);
        let mut okm = [0u8; SESSION_KEY_LEN];
        hk.expand(&info, &mut okm)
            .map_err(|e| LatchError::CryptoFailure(format!("HKDF expand failed: {e}")))?;
        Ok(Self(okm))
    }

    pub fn as_bytes(&self) -> &[u8; SESSION_KEY_LEN] {
        &self.0
    }

    /// Lowercase hex of the full key. For debugging only.
    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }

    /// Short identifier safe to log: first 8 bytes of SHA-256(key), hex.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0);
        to_hex(&digest[..8])
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionKey({})", self.fingerprint())
    }
}
