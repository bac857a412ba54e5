//! Conformance: Challenge Slot Limit
//!
//! At most three challenge slots are populated, however many algorithms
//! qualify.

use latch_handshake::Handshake;

#[test]
fn conformance_four_qualifying_algorithms_fill_three_slots() {
    let mut hs = Handshake::new();
    hs.set_supported_algorithms(["P-256", "secp256k1", "P-384", "P-521"])
        .unwrap();
    assert_eq!(hs.select_keys_for_challenge(200, 600).unwrap(), 3);
    assert_eq!(hs.challenge().key_count(), 3);

    let algs: Vec<&str> = hs.challenge().keys().map(|k| k.algorithm()).collect();
    assert_eq!(algs, ["P-256", "secp256k1", "P-384"]);
}

#[test]
fn conformance_aliases_count_as_separate_entries() {
    let mut hs = Handshake::new();
    hs.set_supported_algorithms(["P-256", "prime256v1", "secp256r1", "secp256k1"])
        .unwrap();
    assert_eq!(hs.select_keys_for_challenge(0, 1000).unwrap(), 3);
    assert!(hs.export_challenge_bytes().is_ok());
}

#[test]
fn conformance_strength_window_filters_slots() {
    let mut hs = Handshake::new();
    hs.set_supported_algorithms(["P-256", "secp256k1", "P-384", "P-521"])
        .unwrap();
    assert_eq!(hs.select_keys_for_challenge(384, 521).unwrap(), 2);
    let algs: Vec<&str> = hs.challenge().keys().map(|k| k.algorithm()).collect();
    assert_eq!(algs, ["P-384", "P-521"]);
}
