//! Named curve registry and raw ECDH.
//!
//! Maps wire algorithm names onto RustCrypto curve implementations and
//! runs key generation / point multiplication generically over them.
//! Coordinates and scalars cross this boundary as big-endian byte
//! strings; shorter inputs are left-padded to the field size.
//!
//! | Canonical | Aliases | Strength (bits) |
//! |-----------|---------|-----------------|
//! | `P-256` | `prime256v1`, `secp256r1` | 256 |
//! | `P-384` | `secp384r1` | 384 |
//! | `P-521` | `secp521r1` | 521 |
//! | `secp256k1` | | 256 |

use std::str::FromStr;

use elliptic_curve::ecdh::diffie_hellman;
use elliptic_curve::sec1::{EncodedPoint, FromEncodedPoint, ModulusSize, ToEncodedPoint};
use elliptic_curve::{AffinePoint, Curve, CurveArithmetic, FieldBytes, FieldBytesSize};
use elliptic_curve::{PublicKey, SecretKey};
use latch_core::errors::{LatchError, LatchResult};
use rand_core::OsRng;
use zeroize::Zeroizing;

/// Curves the handshake can negotiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedCurve {
    P256,
    P384,
    P521,
    Secp256k1,
}

/// Freshly generated keypair in wire form.
pub(crate) struct RawKeyPair {
    pub x: Vec<u8>,
    pub y: Vec<u8>,
    pub scalar: Zeroizing<Vec<u8>>,
}

impl NamedCurve {
    /// Every supported curve, weakest first.
    pub const ALL: [NamedCurve; 4] = [
        NamedCurve::P256,
        NamedCurve::Secp256k1,
        NamedCurve::P384,
        NamedCurve::P521,
    ];

    /// Resolve a wire name (canonical or alias, ASCII case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "p-256" | "prime256v1" | "secp256r1" => Some(NamedCurve::P256),
            "p-384" | "secp384r1" => Some(NamedCurve::P384),
            "p-521" | "secp521r1" => Some(NamedCurve::P521),
            "secp256k1" => Some(NamedCurve::Secp256k1),
            _ => None,
        }
    }

    /// Canonical wire name.
    pub fn name(self) -> &'static str {
        match self {
            NamedCurve::P256 => "P-256",
            NamedCurve::P384 => "P-384",
            NamedCurve::P521 => "P-521",
            NamedCurve::Secp256k1 => "secp256k1",
        }
    }

    /// Bit length of the group order.
    pub fn strength_bits(self) -> u32 {
        match self {
            NamedCurve::P256 | NamedCurve::Secp256k1 => 256,
            NamedCurve::P384 => 384,
            NamedCurve::P521 => 521,
        }
    }

    /// Size of one coordinate (and of a scalar) in bytes.
    pub fn field_len(self) -> usize {
        match self {
            NamedCurve::P256 | NamedCurve::Secp256k1 => 32,
            NamedCurve::P384 => 48,
            NamedCurve::P521 => 66,
        }
    }

    pub(crate) fn generate(self) -> LatchResult<RawKeyPair> {
        match self {
            NamedCurve::P256 => generate::<p256::NistP256>(),
            NamedCurve::P384 => generate::<p384::NistP384>(),
            NamedCurve::P521 => generate::<p521::NistP521>(),
            NamedCurve::Secp256k1 => generate::<k256::Secp256k1>(),
        }
    }

    /// Multiply the peer point `(x, y)` by `scalar`; returns the shared
    /// x-coordinate.
    pub(crate) fn shared_point(
        self,
        x: &[u8],
        y: &[u8],
        scalar: &[u8],
    ) -> LatchResult<Zeroizing<Vec<u8>>> {
        // Scalars are always produced at full field length.
        if scalar.len() != self.field_len() {
            return Err(LatchError::CryptoFailure(format!(
                "private scalar is {} bytes, {self} needs {}",
                scalar.len(),
                self.field_len()
            )));
        }
        match self {
            NamedCurve::P256 => shared_point::<p256::NistP256>(x, y, scalar),
            NamedCurve::P384 => shared_point::<p384::NistP384>(x, y, scalar),
            NamedCurve::P521 => shared_point::<p521::NistP521>(x, y, scalar),
            NamedCurve::Secp256k1 => shared_point::<k256::Secp256k1>(x, y, scalar),
        }
    }
}

impl FromStr for NamedCurve {
    type Err = LatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| LatchError::UnknownAlgorithm(s.to_string()))
    }
}

impl std::fmt::Display for NamedCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Group order bit length for `algorithm_name`, 0 if unrecognized.
pub fn strength_bits(algorithm_name: &str) -> u32 {
    NamedCurve::from_name(algorithm_name).map_or(0, NamedCurve::strength_bits)
}

fn generate<C>() -> LatchResult<RawKeyPair>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let secret = SecretKey::<C>::random(&mut OsRng);
    let point = secret.public_key().to_encoded_point(false);
    let (x, y) = point
        .x()
        .zip(point.y())
        .ok_or_else(|| LatchError::CryptoFailure("public key has no affine coordinates".into()))?;

    Ok(RawKeyPair {
        x: x.to_vec(),
        y: y.to_vec(),
        scalar: Zeroizing::new(secret.to_bytes().to_vec()),
    })
}

fn shared_point<C>(x: &[u8], y: &[u8], scalar: &[u8]) -> LatchResult<Zeroizing<Vec<u8>>>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let encoded = EncodedPoint::<C>::from_affine_coordinates(
        &field_bytes::<C>(x)?,
        &field_bytes::<C>(y)?,
        false,
    );
    let public = Option::<PublicKey<C>>::from(PublicKey::<C>::from_encoded_point(&encoded))
        .ok_or_else(|| LatchError::CryptoFailure("peer point is not on the curve".into()))?;

    let secret = SecretKey::<C>::from_slice(scalar)
        .map_err(|_| LatchError::CryptoFailure("private scalar out of range".into()))?;

    let shared = diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());
    Ok(Zeroizing::new(shared.raw_secret_bytes().to_vec()))
}

/// Left-pad a big-endian value to the curve's field size.
fn field_bytes<C: Curve>(value: &[u8]) -> LatchResult<FieldBytes<C>> {
    let mut out = FieldBytes::<C>::default();
    if value.len() > out.len() {
        return Err(LatchError::CryptoFailure(format!(
            "{} bytes exceed {}-byte field",
            value.len(),
            out.len()
        )));
    }
    let offset = out.len() - value.len();
    out[offset..].copy_from_slice(value);
    Ok(out)
}
