//! Conformance: Error Code Registry
//!
//! Asserts the `LatchError` taxonomy and its diagnostic codes are stable.
//! Peers and log pipelines match on these strings, so any change here is
//! a breaking change.

use latch_core::errors::{is_valid_error_code, LatchError, ERROR_CODES};

fn one_of_each() -> [LatchError; 7] {
    [
        LatchError::EndOfStream,
        LatchError::InvalidEncoding("x".into()),
        LatchError::UnknownAlgorithm("x".into()),
        LatchError::CryptoFailure("x".into()),
        LatchError::PolicyViolation("x".into()),
        LatchError::Compression("x".into()),
        LatchError::InvalidState("x".into()),
    ]
}

// ── Conformance: Registry ───────────────────────────────────────

/// Exact list and order.
#[test]
fn conformance_error_registry_exact_list() {
    let expected: [&str; 7] = [
        "END_OF_STREAM",
        "INVALID_ENCODING",
        "UNKNOWN_ALGORITHM",
        "CRYPTO_FAILURE",
        "POLICY_VIOLATION",
        "COMPRESSION_FAILED",
        "INVALID_STATE",
    ];
    assert_eq!(ERROR_CODES, expected, "ERROR_CODES drift");
}

#[test]
fn conformance_error_registry_unique() {
    let mut seen = std::collections::HashSet::new();
    for code in &ERROR_CODES {
        assert!(seen.insert(code), "duplicate error code: {code}");
    }
}

/// Every variant maps to its registry entry, in order.
#[test]
fn conformance_variant_codes_match_registry() {
    for (err, code) in one_of_each().iter().zip(ERROR_CODES) {
        assert_eq!(err.code(), code);
        assert!(is_valid_error_code(err.code()));
    }
}

#[test]
fn conformance_validator_rejects_unknown() {
    assert!(!is_valid_error_code("NOT_A_REAL_CODE"));
    assert!(!is_valid_error_code(""));
    assert!(!is_valid_error_code("end_of_stream")); // case-sensitive
}

// ── Conformance: LatchError Surface ─────────────────────────────

#[test]
fn conformance_error_display_format_stable() {
    let cases: Vec<(LatchError, &str)> = vec![
        (LatchError::EndOfStream, "End of stream"),
        (
            LatchError::InvalidEncoding("key count 7".into()),
            "Invalid encoding: key count 7",
        ),
        (
            LatchError::UnknownAlgorithm("ed448".into()),
            "Unknown algorithm: ed448",
        ),
        (
            LatchError::CryptoFailure("MAC mismatch".into()),
            "Crypto failure: MAC mismatch",
        ),
        (
            LatchError::PolicyViolation("login too long".into()),
            "Policy violation: login too long",
        ),
    ];
    for (error, expected) in &cases {
        assert_eq!(error.to_string(), *expected, "LatchError display drift");
    }
}

#[test]
fn conformance_error_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LatchError>();
}

#[test]
fn conformance_error_is_std_error() {
    let err = LatchError::EndOfStream;
    let _: &dyn std::error::Error = &err;
}

/// Only decoder-side variants count as peer input.
#[test]
fn conformance_peer_input_classification() {
    let peer: Vec<&str> = one_of_each()
        .iter()
        .filter(|e| e.is_peer_input())
        .map(LatchError::code)
        .collect();
    assert_eq!(peer, ["END_OF_STREAM", "INVALID_ENCODING", "COMPRESSION_FAILED"]);
}
