//! Conformance: Idempotent Rewind
//!
//! Encoding once, then rewinding and decoding twice yields identical values.

use latch_core::xdr::{XdrBuf, XdrDecode, XdrEncode};
use latch_handshake::{Challenge, EcKey, Response};

#[test]
fn conformance_rewind_decodes_identically() {
    let (key, _) = EcKey::new("P-384").generate_keypair().unwrap();
    let mut challenge = Challenge::new();
    challenge.push_key(key.clone()).unwrap();
    challenge.certificate_mut().put_data(b"certificate");
    let mut response = Response::new();
    response.set_key(key.clone());

    let mut buf = XdrBuf::new();
    key.to_xdr(&mut buf).unwrap();
    challenge.to_xdr(&mut buf).unwrap();
    response.to_xdr(&mut buf).unwrap();

    let decode = |buf: &mut XdrBuf| {
        buf.rewind();
        let k = EcKey::from_xdr(buf).unwrap();
        let c = Challenge::from_xdr(buf).unwrap();
        let r = Response::from_xdr(buf).unwrap();
        buf.expect_end().unwrap();
        (k, c, r)
    };
    let first = decode(&mut buf);
    let second = decode(&mut buf);

    assert_eq!(first, second);
    assert_eq!(first, (key, challenge, response));
}

#[test]
fn conformance_rewind_does_not_alter_content() {
    let (key, _) = EcKey::new("secp256k1").generate_keypair().unwrap();
    let mut buf = XdrBuf::new();
    key.to_xdr(&mut buf).unwrap();
    let before = buf.to_vec();

    EcKey::from_xdr(&mut buf).unwrap();
    buf.rewind();
    assert_eq!(buf.position(), 0);
    assert_eq!(buf.to_vec(), before);
}
