//! Challenge message: offerer to responder.
//!
//! Carries up to three candidate public keys and an optional certificate.
//!
//! ## Wire form
//! ```text
//! u32 key_count                   (<= 3)
//! key_count x EcKey               (populated slots, in slot order)
//! u32 compressed_flag             (always 1, unchecked on decode)
//! u32 cert_len || cert || pad     (raw deflate)
//! ```
//! Empty slots are never transmitted; on decode the keys fill slots
//! `0..key_count` and the rest stay empty.

use latch_core::constants::{CERT_COMPRESSED_FLAG, MAX_CERTIFICATE_LEN, MAX_CHALLENGE_KEYS};
use latch_core::errors::{LatchError, LatchResult};
use latch_core::xdr::{XdrBuf, XdrDecode, XdrEncode};
use latch_core::zblob::ZBlob;

use crate::eckey::EcKey;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Challenge {
    keys: [Option<EcKey>; MAX_CHALLENGE_KEYS],
    certificate: ZBlob,
}

impl Challenge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `key` in `slot`, replacing whatever was there.
    ///
    /// # Errors
    /// `PolicyViolation` if `slot >= MAX_CHALLENGE_KEYS`.
    pub fn set_key(&mut self, slot: usize, key: EcKey) -> LatchResult<()> {
        let entry = self.keys.get_mut(slot).ok_or_else(|| {
            LatchError::PolicyViolation(format!("challenge slot {slot} out of range"))
        })?;
        *entry = Some(key);
        Ok(())
    }

    /// Place `key` in the first empty slot and return its index.
    pub fn push_key(&mut self, key: EcKey) -> LatchResult<usize> {
        let slot = self
            .keys
            .iter()
            .position(Option::is_none)
            .ok_or_else(|| LatchError::PolicyViolation("all challenge slots in use".into()))?;
        self.keys[slot] = Some(key);
        Ok(slot)
    }

    pub fn key(&self, slot: usize) -> Option<&EcKey> {
        self.keys.get(slot).and_then(Option::as_ref)
    }

    /// Populated keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = &EcKey> {
        self.keys.iter().flatten()
    }

    pub fn key_count(&self) -> usize {
        self.keys().count()
    }

    pub fn certificate(&self) -> &ZBlob {
        &self.certificate
    }

    pub fn certificate_mut(&mut self) -> &mut ZBlob {
        &mut self.certificate
    }
}

impl XdrEncode for Challenge {
    fn to_xdr(&self, buf: &mut XdrBuf) -> LatchResult<()> {
        buf.put_u32(self.key_count() as u32);
        for key in self.keys() {
            key.to_xdr(buf)?;
        }
        buf.put_u32(CERT_COMPRESSED_FLAG);
        buf.put_opaque(&self.certificate.zdata()?)
    }
}

impl XdrDecode for Challenge {
    fn from_xdr(buf: &mut XdrBuf) -> LatchResult<Self> {
        let count = buf.get_u32()? as usize;
        if count > MAX_CHALLENGE_KEYS {
            return Err(LatchError::InvalidEncoding(format!(
                "challenge key count {count} exceeds {MAX_CHALLENGE_KEYS}"
            )));
        }

        let mut challenge = Challenge::new();
        for slot in challenge.keys.iter_mut().take(count) {
            *slot = Some(EcKey::from_xdr(buf)?);
        }
        let _compressed_flag = buf.get_u32()?;
        let cert = buf.get_opaque(MAX_CERTIFICATE_LEN)?;
        challenge.certificate.put_zdata(&cert);
        Ok(challenge)
    }
}
