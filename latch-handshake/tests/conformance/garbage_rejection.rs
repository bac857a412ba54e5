//! Conformance: Garbage Rejection
//!
//! Random buffers must fail to decode as any message type, cleanly.

use latch_core::bignum::BigNum;
use latch_core::xdr::XdrDecode;
use latch_handshake::{Challenge, EcKey, Handshake, HandshakeState, Response};
use rand_core::{OsRng, RngCore};

const LENGTHS: [usize; 11] = [
    15, 27, 99, 119, 279, 589, 1123, 1934, 28901, 31965, 112678,
];

fn random(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

#[test]
fn conformance_random_bytes_rejected_by_every_type() {
    for len in LENGTHS {
        for _ in 0..8 {
            let bytes = random(len);
            assert!(BigNum::decode_exact(&bytes).is_err(), "BigNum, {len}");
            assert!(EcKey::decode_exact(&bytes).is_err(), "EcKey, {len}");
            assert!(Challenge::decode_exact(&bytes).is_err(), "Challenge, {len}");
            assert!(Response::decode_exact(&bytes).is_err(), "Response, {len}");
        }
    }
}

/// Plausible-looking prefixes: small length words followed by noise.
#[test]
fn conformance_small_prefix_garbage_rejected() {
    for len in LENGTHS {
        let mut bytes = random(len);
        bytes[..4].copy_from_slice(&[0, 0, 0, 2]);
        assert!(Challenge::decode_exact(&bytes).is_err(), "{len}");
        bytes[..4].copy_from_slice(&[0, 0, 0, 5]);
        assert!(EcKey::decode_exact(&bytes).is_err(), "{len}");
        assert!(Response::decode_exact(&bytes).is_err(), "{len}");
    }
}

#[test]
fn conformance_orchestrator_rejects_garbage() {
    crate::init_tracing();
    for len in LENGTHS {
        let mut responder = Handshake::new();
        responder.set_supported_algorithms(["P-256"]).unwrap();
        assert!(responder.import_challenge_bytes(&random(len)).is_err());
        assert_eq!(responder.state(), HandshakeState::AlgorithmsSet);

        let mut offerer = crate::offerer(&["P-256"], 0, 1000);
        offerer.export_challenge_bytes().unwrap();
        assert!(offerer.import_response_bytes(&random(len)).is_err());
        assert_eq!(offerer.state(), HandshakeState::ChallengeSent);
        assert!(offerer.session_key().is_none());
    }
}
