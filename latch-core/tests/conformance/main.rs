//! Latch Core Conformance Harness
//!
//! Invariant coverage:
//! - Error taxonomy and diagnostic code registry
//! - XDR-buf primitive layout (alignment, padding, big-endian words)

mod error_registry;
mod xdr_layout;
