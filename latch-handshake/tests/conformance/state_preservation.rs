//! Conformance: State Preservation on Failure
//!
//! A rejected peer message leaves previously established state untouched.

use latch_core::xdr::XdrEncode;
use latch_handshake::{EcKey, HandshakeState, Response};

#[test]
fn conformance_failed_import_keeps_responder_session_key() {
    let mut offerer = crate::offerer(&["P-256"], 0, 1000);
    let challenge = offerer.export_challenge_bytes().unwrap();
    let mut responder = crate::responder(&challenge, &["P-256"], 0, 1000);
    let key = responder.session_key().cloned();

    // Out of role, out of order: rejected and nothing moves.
    assert!(responder.import_challenge_bytes(&challenge).is_err());
    assert!(responder.import_response_bytes(&[0; 16]).is_err());
    assert_eq!(responder.session_key().cloned(), key);
    assert_eq!(responder.state(), HandshakeState::ResponseKeyChosen);
}

#[test]
fn conformance_bad_response_then_good_response() {
    let mut offerer = crate::offerer(&["P-256"], 0, 1000);
    let challenge = offerer.export_challenge_bytes().unwrap();

    // A response on a curve never offered.
    let mut forged = Response::new();
    forged.set_key(EcKey::new("P-384").generate_keypair().unwrap().0);
    assert!(offerer
        .import_response_bytes(&forged.encode_to_vec().unwrap())
        .is_err());

    // A response whose point is not on the curve.
    let mut off_curve = Response::new();
    off_curve.set_key(EcKey::from_coordinates("P-256", &[1; 32], &[2; 32]));
    assert!(offerer
        .import_response_bytes(&off_curve.encode_to_vec().unwrap())
        .is_err());
    assert!(offerer.session_key().is_none());

    let mut responder = crate::responder(&challenge, &["P-256"], 0, 1000);
    offerer
        .import_response_bytes(&responder.export_response_bytes().unwrap())
        .unwrap();
    assert_eq!(offerer.session_key(), responder.session_key());
}

#[test]
fn conformance_completed_offerer_rejects_second_response() {
    let mut offerer = crate::offerer(&["P-256"], 0, 1000);
    let challenge = offerer.export_challenge_bytes().unwrap();
    let mut responder = crate::responder(&challenge, &["P-256"], 0, 1000);
    let response = responder.export_response_bytes().unwrap();

    offerer.import_response_bytes(&response).unwrap();
    let key = offerer.session_key().cloned();
    assert!(offerer.import_response_bytes(&response).is_err());
    assert_eq!(offerer.session_key().cloned(), key);
}
