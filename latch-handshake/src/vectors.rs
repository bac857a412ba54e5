//! Deterministic wire vectors.
//!
//! Every vector is built from fixed inputs (coordinates, certificate
//! bytes, session key, nonce), so the output is byte-for-byte stable and
//! can be checked into another implementation's test suite.
//!
//! Coordinates here are fixtures, not points on the curve; the vectors
//! pin the encoding, not the arithmetic.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use latch_core::bignum::BigNum;
use latch_core::constants::{SEAL_HEADER_LEN, SESSION_KEY_LEN};
use latch_core::encoding::to_hex;
use latch_core::errors::{LatchError, LatchResult};
use latch_core::seal;
use latch_core::xdr::{XdrBuf, XdrEncode};
use serde::{Deserialize, Serialize};

use crate::challenge::Challenge;
use crate::eckey::EcKey;
use crate::response::Response;

/// Raw-deflate stored block wrapping `b"CERT"`.
pub const FIXTURE_CERT_ZDATA: [u8; 9] = [0x01, 0x04, 0x00, 0xfb, 0xff, b'C', b'E', b'R', b'T'];

/// Session key used to seal fixture credentials.
pub const FIXTURE_SESSION_KEY: [u8; SESSION_KEY_LEN] = [0x42; SESSION_KEY_LEN];

/// Nonce used to seal fixture credentials.
pub const FIXTURE_NONCE: [u8; SEAL_HEADER_LEN] = [0x24; SEAL_HEADER_LEN];

/// One encoded message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireVector {
    pub id: String,
    pub description: String,
    pub hex: String,
    pub base64: String,
}

impl WireVector {
    fn new(id: &str, description: &str, bytes: &[u8]) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            hex: to_hex(bytes),
            base64: STANDARD.encode(bytes),
        }
    }

    /// Wire bytes, decoded from the base64 rendering.
    pub fn bytes(&self) -> LatchResult<Vec<u8>> {
        STANDARD
            .decode(&self.base64)
            .map_err(|e| LatchError::InvalidEncoding(format!("vector {}: {e}", self.id)))
    }
}

/// A full vector file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireVectors {
    pub description: String,
    pub vectors: Vec<WireVector>,
}

impl WireVectors {
    pub fn find(&self, id: &str) -> Option<&WireVector> {
        self.vectors.iter().find(|v| v.id == id)
    }
}

fn fixture_key(algorithm: &str, len: usize, seed: u8) -> EcKey {
    let x: Vec<u8> = (0..len).map(|i| seed.wrapping_add(i as u8)).collect();
    let y: Vec<u8> = (0..len).map(|i| seed ^ (i as u8)).collect();
    EcKey::from_coordinates(algorithm, &x, &y)
}

/// Build every wire vector.
pub fn generate_wire_vectors() -> LatchResult<WireVectors> {
    let mut vectors = Vec::new();

    let bignum = BigNum::from_bytes(&[0x01, 0x02, 0x03]);
    vectors.push(WireVector::new(
        "bignum-3",
        "three-byte magnitude, one pad byte",
        &bignum.encode_to_vec()?,
    ));
    vectors.push(WireVector::new(
        "bignum-empty",
        "absent value, bare length word",
        &BigNum::new().encode_to_vec()?,
    ));

    let p256 = fixture_key("P-256", 32, 0x10);
    vectors.push(WireVector::new(
        "eckey-p256",
        "P-256 key, 32-byte coordinates",
        &p256.encode_to_vec()?,
    ));
    let p521 = fixture_key("P-521", 66, 0x30);
    vectors.push(WireVector::new(
        "eckey-p521",
        "P-521 key, 66-byte coordinates with padding",
        &p521.encode_to_vec()?,
    ));

    vectors.push(WireVector::new(
        "challenge-empty",
        "no keys, no certificate",
        &Challenge::new().encode_to_vec()?,
    ));

    let mut challenge = Challenge::new();
    challenge.push_key(p256.clone())?;
    challenge.push_key(fixture_key("secp256k1", 32, 0x20))?;
    challenge.push_key(p521)?;
    challenge.certificate_mut().put_zdata(&FIXTURE_CERT_ZDATA);
    vectors.push(WireVector::new(
        "challenge-three-keys-cert",
        "three keys and a stored-block certificate",
        &challenge.encode_to_vec()?,
    ));

    let mut response = Response::new();
    response.set_key(fixture_key("P-256", 32, 0x50));
    vectors.push(WireVector::new(
        "response-bare",
        "key only, no certificate, no credentials",
        &response.encode_to_vec()?,
    ));

    let mut plaintext = XdrBuf::new();
    plaintext.put_string("alice")?;
    plaintext.put_string("secret")?;
    let sealed = seal::seal_with_nonce(&FIXTURE_SESSION_KEY, &FIXTURE_NONCE, &plaintext.to_vec())?;
    response.certificate_mut().put_zdata(&FIXTURE_CERT_ZDATA);
    response.set_credentials(sealed)?;
    vectors.push(WireVector::new(
        "response-cert-credentials",
        "key, certificate and credentials sealed under the fixture key",
        &response.encode_to_vec()?,
    ));

    Ok(WireVectors {
        description: "latch XDR-buf wire vectors".into(),
        vectors,
    })
}

/// Pretty-printed JSON of `vectors`.
pub fn to_json(vectors: &WireVectors) -> LatchResult<String> {
    serde_json::to_string_pretty(vectors)
        .map_err(|e| LatchError::InvalidEncoding(format!("vector serialization failed: {e}")))
}
