//! Latch Core — wire encoding and primitives for the latch handshake.
//!
//! This crate holds the leaves of the handshake stack: everything the
//! `latch-handshake` crate builds its messages and key exchange on.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`constants`] | Wire alignment and policy ceilings |
//! | [`errors`] | `LatchError` taxonomy and diagnostic codes |
//! | [`encoding`] | Hex helpers |
//! | [`xdr`] | Paged XDR-buf encoder/decoder |
//! | [`bignum`] | Magnitude + sign container |
//! | [`zblob`] | Lazily (de)compressed certificate blob |
//! | [`seal`] | XSalsa20-Poly1305 sealing of credentials |

/// Protocol constants.
pub mod constants;

/// Error types for latch operations.
pub mod errors;

/// Hex helpers.
pub mod encoding;

/// XDR-buf binary encoding.
pub mod xdr;

/// Arbitrary-precision magnitude container.
pub mod bignum;

/// Compressed certificate blobs.
pub mod zblob;

/// Symmetric sealing primitive.
pub mod seal;

pub use bignum::BigNum;
pub use errors::{LatchError, LatchResult};
pub use xdr::{XdrBuf, XdrDecode, XdrEncode};
pub use zblob::ZBlob;
