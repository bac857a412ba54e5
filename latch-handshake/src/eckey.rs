//! EC Diffie-Hellman public key.
//!
//! An `EcKey` is an algorithm name plus two big-number coordinates. A key
//! carrying only the name means "this algorithm is supported" and has no
//! data yet; coordinates arrive either from generation or from a peer's
//! wire message.
//!
//! ## Wire form
//! ```text
//! u32 name_len || name || pad     (name_len <= 63)
//! BigNum x
//! BigNum y
//! ```

use latch_core::bignum::BigNum;
use latch_core::constants::MAX_ALGORITHM_NAME_LEN;
use latch_core::errors::{LatchError, LatchResult};
use latch_core::xdr::{XdrBuf, XdrDecode, XdrEncode};

use crate::curve::{self, NamedCurve};
use crate::session::SessionKey;

/// Public EC key: algorithm name and affine coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EcKey {
    algorithm: String,
    x: BigNum,
    y: BigNum,
}

impl EcKey {
    /// Key with only an algorithm name set.
    pub fn new(algorithm: &str) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            ..Self::default()
        }
    }

    /// Key with explicit coordinates (big-endian magnitudes).
    pub fn from_coordinates(algorithm: &str, x: &[u8], y: &[u8]) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            x: BigNum::from_bytes(x),
            y: BigNum::from_bytes(y),
        }
    }

    /// Store the curve identifier. Not checked against the registry here;
    /// unknown names fail at generation time.
    ///
    /// # Errors
    /// `PolicyViolation` if `name` is longer than 63 bytes.
    pub fn set_algorithm(&mut self, name: &str) -> LatchResult<()> {
        check_name_len(name)?;
        self.algorithm = name.to_string();
        Ok(())
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn x(&self) -> &BigNum {
        &self.x
    }

    pub fn y(&self) -> &BigNum {
        &self.y
    }

    /// `true` iff the name and both coordinates are present.
    pub fn has_data(&self) -> bool {
        !self.algorithm.is_empty() && !self.x.is_empty() && !self.y.is_empty()
    }

    /// Resolve the algorithm name against the curve registry.
    pub fn curve(&self) -> LatchResult<NamedCurve> {
        self.algorithm.parse()
    }

    /// Group order bit length of this key's curve, 0 if unrecognized.
    pub fn strength_bits(&self) -> u32 {
        curve::strength_bits(&self.algorithm)
    }

    /// Generate a fresh keypair on this key's curve.
    ///
    /// Returns the public key (same algorithm spelling as `self`) and the
    /// private scalar. The caller owns the scalar and must keep it secret.
    ///
    /// # Errors
    /// - `UnknownAlgorithm` if the name is not a registered curve.
    /// - `CryptoFailure` if the curve library cannot produce a key.
    pub fn generate_keypair(&self) -> LatchResult<(EcKey, BigNum)> {
        let raw = self.curve()?.generate()?;
        let public = EcKey::from_coordinates(&self.algorithm, &raw.x, &raw.y);
        Ok((public, BigNum::from_bytes(&raw.scalar)))
    }

    /// ECDH between this (peer) public key and `own_private`, run through
    /// the session KDF.
    ///
    /// # Errors
    /// - `CryptoFailure` if either key lacks data or the point is invalid.
    /// - `UnknownAlgorithm` if the name is not a registered curve.
    pub fn derive_shared_secret(&self, own_private: &BigNum) -> LatchResult<SessionKey> {
        if !self.has_data() || own_private.is_empty() {
            return Err(LatchError::CryptoFailure("key lacks data".into()));
        }
        let curve = self.curve()?;
        let shared = curve.shared_point(self.x.as_bytes(), self.y.as_bytes(), own_private.as_bytes())?;
        SessionKey::derive(curve, &shared)
    }
}

fn check_name_len(name: &str) -> LatchResult<()> {
    if name.len() > MAX_ALGORITHM_NAME_LEN {
        return Err(LatchError::PolicyViolation(format!(
            "algorithm name is {} bytes, limit {MAX_ALGORITHM_NAME_LEN}",
            name.len()
        )));
    }
    Ok(())
}

impl XdrEncode for EcKey {
    fn to_xdr(&self, buf: &mut XdrBuf) -> LatchResult<()> {
        check_name_len(&self.algorithm)?;
        buf.put_string(&self.algorithm)?;
        self.x.to_xdr(buf)?;
        self.y.to_xdr(buf)
    }
}

impl XdrDecode for EcKey {
    fn from_xdr(buf: &mut XdrBuf) -> LatchResult<Self> {
        let algorithm = buf.get_string(MAX_ALGORITHM_NAME_LEN)?;
        let x = BigNum::from_xdr(buf)?;
        let y = BigNum::from_xdr(buf)?;
        Ok(Self { algorithm, x, y })
    }
}
