//! BigNum: arbitrary-precision non-negative magnitude plus a sign bit.
//!
//! The magnitude is raw big-endian bytes with no implied sign. An empty
//! magnitude means "absent", which is distinct from zero.
//!
//! ## Wire form
//! ```text
//! u32 magnitude_len || magnitude || pad
//! ```
//! The sign is NOT transmitted. EC coordinates and scalars are always
//! non-negative, and existing peers expect the magnitude alone.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::MAX_BIGNUM_LEN;
use crate::encoding::to_hex;
use crate::errors::LatchResult;
use crate::xdr::{XdrBuf, XdrDecode, XdrEncode};

/// Big number container. Wiped on drop (it also carries private scalars).
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct BigNum {
    magnitude: Vec<u8>,
    negative: bool,
}

impl BigNum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from big-endian magnitude bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut n = Self::new();
        n.set(bytes);
        n
    }

    /// Reserve exactly `len` zeroed bytes and return them for writing.
    pub fn allocate(&mut self, len: usize) -> &mut [u8] {
        self.magnitude.zeroize();
        self.magnitude.resize(len, 0);
        &mut self.magnitude
    }

    /// Replace the magnitude with a copy of `bytes`.
    pub fn set(&mut self, bytes: &[u8]) {
        self.allocate(bytes.len()).copy_from_slice(bytes);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.magnitude
    }

    pub fn len(&self) -> usize {
        self.magnitude.len()
    }

    /// `true` when no magnitude is present.
    pub fn is_empty(&self) -> bool {
        self.magnitude.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn set_negative(&mut self, negative: bool) {
        self.negative = negative;
    }

    /// Drop the magnitude and sign.
    pub fn clear(&mut self) {
        self.zeroize();
    }
}

impl std::fmt::Debug for BigNum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Length only; private scalars travel in this type.
        f.debug_struct("BigNum")
            .field("len", &self.magnitude.len())
            .field("negative", &self.negative)
            .finish()
    }
}

impl std::fmt::LowerHex for BigNum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&to_hex(&self.magnitude))
    }
}

impl XdrEncode for BigNum {
    fn to_xdr(&self, buf: &mut XdrBuf) -> LatchResult<()> {
        buf.put_opaque(&self.magnitude)
    }
}

impl XdrDecode for BigNum {
    fn from_xdr(buf: &mut XdrBuf) -> LatchResult<Self> {
        let magnitude = buf.get_opaque(MAX_BIGNUM_LEN)?;
        Ok(Self {
            magnitude,
            negative: false,
        })
    }
}
