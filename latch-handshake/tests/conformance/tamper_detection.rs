//! Conformance: Tamper Detection
//!
//! Any flipped byte inside the sealed credentials makes the offerer's
//! import fail with a crypto error instead of yielding credentials.

use latch_core::errors::LatchError;
use latch_handshake::HandshakeState;

/// `alice`/`secret` encodes to 24 plaintext bytes; sealed that is 64, a
/// multiple of 4, so the blob is the unpadded tail of the response.
const SEALED_LEN: usize = 64;

fn exchange() -> (latch_handshake::Handshake, Vec<u8>) {
    let mut offerer = crate::offerer(&["P-256"], 100, 300);
    let challenge = offerer.export_challenge_bytes().unwrap();
    let mut responder = crate::responder(&challenge, &["P-256"], 100, 300);
    responder.attach_credentials("alice", "secret").unwrap();
    assert_eq!(responder.response().credentials().len(), SEALED_LEN);
    (offerer, responder.export_response_bytes().unwrap())
}

#[test]
fn conformance_flipped_credentials_byte_rejected() {
    crate::init_tracing();
    let (mut offerer, mut response) = exchange();
    let at = response.len() - 10;
    response[at] ^= 0x01;

    assert!(matches!(
        offerer.import_response_bytes(&response),
        Err(LatchError::CryptoFailure(_))
    ));
    assert_eq!(offerer.peer_login(), None);
    assert_eq!(offerer.peer_password(), None);
    assert!(offerer.session_key().is_none());
    assert_eq!(offerer.state(), HandshakeState::ChallengeSent);
}

#[test]
fn conformance_every_credentials_byte_is_covered() {
    let (mut offerer, response) = exchange();
    let start = response.len() - SEALED_LEN;
    for at in start..response.len() {
        let mut tampered = response.clone();
        tampered[at] ^= 0x80;
        assert!(
            offerer.import_response_bytes(&tampered).is_err(),
            "byte {at} not covered"
        );
    }
    // The untouched response still completes afterwards.
    offerer.import_response_bytes(&response).unwrap();
    assert_eq!(offerer.peer_login(), Some("alice"));
}
