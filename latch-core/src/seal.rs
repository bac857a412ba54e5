//! Symmetric sealing: XSalsa20-Poly1305 secretbox.
//!
//! Used to carry the responder's credentials inside a response, keyed by
//! the ECDH session key.
//!
//! ## Wire format
//! ```text
//! nonce (SEAL_HEADER_LEN) || mac (SEAL_MAC_LEN) || ciphertext
//! ```
//! A fresh nonce is drawn from the OS CSPRNG for every seal. Opening a
//! tampered, truncated or wrongly-keyed blob fails with `CryptoFailure`.

use crypto_secretbox::aead::generic_array::GenericArray;
use crypto_secretbox::aead::{Aead, KeyInit};
use crypto_secretbox::XSalsa20Poly1305;
use rand_core::{OsRng, RngCore};
use zeroize::Zeroizing;

use crate::constants::{SEAL_HEADER_LEN, SEAL_MAC_LEN, SESSION_KEY_LEN};
use crate::errors::{LatchError, LatchResult};

/// Bytes a sealed blob adds on top of its plaintext.
pub const SEAL_OVERHEAD: usize = SEAL_HEADER_LEN + SEAL_MAC_LEN;

/// Seal `plaintext` under `key` with a random nonce.
pub fn seal(key: &[u8; SESSION_KEY_LEN], plaintext: &[u8]) -> LatchResult<Vec<u8>> {
    let mut nonce = [0u8; SEAL_HEADER_LEN];
    OsRng.fill_bytes(&mut nonce);
    seal_with_nonce(key, &nonce, plaintext)
}

/// Seal `plaintext` under `key` with a caller-chosen nonce.
///
/// The nonce MUST NOT repeat under the same key. Only deterministic
/// fixtures should call this directly.
pub fn seal_with_nonce(
    key: &[u8; SESSION_KEY_LEN],
    nonce: &[u8; SEAL_HEADER_LEN],
    plaintext: &[u8],
) -> LatchResult<Vec<u8>> {
    let ciphertext = cipher(key)?
        .encrypt(GenericArray::from_slice(nonce), plaintext)
        .map_err(|_| LatchError::CryptoFailure("seal failed".into()))?;

    let mut sealed = Vec::with_capacity(SEAL_HEADER_LEN + ciphertext.len());
    sealed.extend_from_slice(nonce);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

fn cipher(key: &[u8; SESSION_KEY_LEN]) -> LatchResult<XSalsa20Poly1305> {
    XSalsa20Poly1305::new_from_slice(key)
        .map_err(|_| LatchError::CryptoFailure("invalid key length".into()))
}

/// Open a sealed blob. The plaintext is wiped when the result is dropped.
pub fn open(key: &[u8; SESSION_KEY_LEN], sealed: &[u8]) -> LatchResult<Zeroizing<Vec<u8>>> {
    if sealed.len() < SEAL_OVERHEAD {
        return Err(LatchError::CryptoFailure("sealed blob too short".into()));
    }
    let (nonce, ciphertext) = sealed.split_at(SEAL_HEADER_LEN);

    cipher(key)?
        .decrypt(GenericArray::from_slice(nonce), ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| LatchError::CryptoFailure("MAC mismatch".into()))
}
