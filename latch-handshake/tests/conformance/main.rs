//! Latch Handshake Conformance Harness
//!
//! Invariant coverage:
//! - Wire round trip for EcKey, Challenge and Response
//! - Shared secret symmetry on every registered curve
//! - Garbage rejection for every decodable type
//! - Idempotent rewind of an encoded buffer
//! - End-to-end offerer/responder scenario
//! - Tamper detection on sealed credentials
//! - Challenge slot limit
//! - Failed peer input leaves orchestrator state untouched

mod challenge_slot_limit;
mod garbage_rejection;
mod idempotent_rewind;
mod state_preservation;
mod tamper_detection;

use latch_handshake::Handshake;

/// Install a test subscriber once; `RUST_LOG=latch_handshake=debug` shows
/// orchestrator transitions.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Offerer with `algorithms` whose challenge keys are chosen in `min..=max`.
pub fn offerer(algorithms: &[&str], min: u32, max: u32) -> Handshake {
    let mut hs = Handshake::new();
    hs.set_supported_algorithms(algorithms).unwrap();
    hs.select_keys_for_challenge(min, max).unwrap();
    hs
}

/// Responder that has imported `challenge` and answered in `min..=max`.
pub fn responder(challenge: &[u8], algorithms: &[&str], min: u32, max: u32) -> Handshake {
    let mut hs = Handshake::new();
    hs.set_supported_algorithms(algorithms).unwrap();
    hs.import_challenge_bytes(challenge).unwrap();
    hs.select_key_for_response(min, max).unwrap();
    hs
}
