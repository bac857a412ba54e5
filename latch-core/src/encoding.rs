//! Hex rendering for fingerprints, vectors and diagnostics.
//!
//! Wire encoding lives in [`crate::xdr`].

use crate::errors::{LatchError, LatchResult};

/// Lowercase hex, two digits per byte.
pub fn to_hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse hex (either case) back into bytes.
///
/// # Errors
/// `InvalidEncoding` for an odd number of digits or a non-hex character.
pub fn from_hex(encoded: &str) -> LatchResult<Vec<u8>> {
    let digits = encoded.as_bytes();
    if digits.len() % 2 != 0 {
        return Err(LatchError::InvalidEncoding(format!(
            "hex string has odd length {}",
            digits.len()
        )));
    }
    digits
        .chunks_exact(2)
        .map(|pair| Ok((nibble(pair[0])? << 4) | nibble(pair[1])?))
        .collect()
}

fn nibble(c: u8) -> LatchResult<u8> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(LatchError::InvalidEncoding(format!(
            "invalid hex digit 0x{c:02x}"
        ))),
    }
}
