//! Conformance: XDR-buf Layout
//!
//! Byte-exact checks of the primitive wire forms every message is built
//! from: big-endian words, length-prefixed opaque data and zero padding
//! to a 4-byte boundary.

use latch_core::bignum::BigNum;
use latch_core::constants::XDR_PAGE_SIZE;
use latch_core::errors::LatchError;
use latch_core::xdr::{padding, XdrBuf, XdrDecode, XdrEncode};

#[test]
fn conformance_every_length_pads_to_alignment() {
    for len in 0..=64usize {
        let mut buf = XdrBuf::new();
        buf.put_opaque(&vec![0xa5; len]).unwrap();
        assert_eq!(buf.len(), 4 + len + padding(len), "len {len}");
        assert_eq!(buf.len() % 4, 0, "len {len}");
    }
}

#[test]
fn conformance_string_layout() {
    let mut buf = XdrBuf::new();
    buf.put_string("P-521").unwrap();
    assert_eq!(
        buf.to_vec(),
        [0, 0, 0, 5, b'P', b'-', b'5', b'2', b'1', 0, 0, 0]
    );
}

#[test]
fn conformance_bignum_layout() {
    let n = BigNum::from_bytes(&[0xde, 0xad, 0xbe, 0xef, 0x01]);
    assert_eq!(
        n.encode_to_vec().unwrap(),
        [0, 0, 0, 5, 0xde, 0xad, 0xbe, 0xef, 0x01, 0, 0, 0]
    );
}

/// The sign bit is never transmitted.
#[test]
fn conformance_bignum_sign_not_on_wire() {
    let mut neg = BigNum::from_bytes(&[7]);
    neg.set_negative(true);
    let bytes = neg.encode_to_vec().unwrap();
    assert_eq!(bytes, BigNum::from_bytes(&[7]).encode_to_vec().unwrap());
    assert!(!BigNum::decode_exact(&bytes).unwrap().is_negative());
}

/// Values straddling page boundaries decode intact.
#[test]
fn conformance_multi_page_payload() {
    let payload: Vec<u8> = (0..XDR_PAGE_SIZE * 3 + 7).map(|i| i as u8).collect();
    let mut buf = XdrBuf::new();
    buf.put_u32(1);
    buf.put_opaque(&payload).unwrap();
    buf.put_u32(2);
    assert!(buf.page_count() >= 3);

    buf.rewind();
    assert_eq!(buf.get_u32().unwrap(), 1);
    assert_eq!(buf.get_opaque(payload.len()).unwrap(), payload);
    assert_eq!(buf.get_u32().unwrap(), 2);
    assert!(buf.expect_end().is_ok());
}

#[test]
fn conformance_short_word_is_end_of_stream() {
    let mut buf = XdrBuf::from_bytes(&[0, 0, 1]);
    assert_eq!(buf.get_u32(), Err(LatchError::EndOfStream));
}

#[test]
fn conformance_length_beyond_buffer_is_invalid_encoding() {
    let mut buf = XdrBuf::from_bytes(&[0, 0, 0, 9, 1, 2, 3, 4]);
    assert!(matches!(
        buf.get_opaque(64),
        Err(LatchError::InvalidEncoding(_))
    ));
}
