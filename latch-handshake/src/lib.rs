//! Latch Handshake: ECDH challenge/response over XDR-buf messages.
//!
//! An offerer proposes up to three candidate public keys on named curves
//! in a challenge. The responder picks one it supports, answers with its
//! own public key on that curve and optionally seals a login/password
//! pair under the derived session key. Both sides end with the same
//! 32-byte session key.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`curve`] | Named-curve registry, strengths, raw EC operations |
//! | [`session`] | HKDF session key derivation |
//! | [`eckey`] | Public key + wire form |
//! | [`challenge`] | Offerer message |
//! | [`response`] | Responder message |
//! | [`policy`] | Caller size ceilings |
//! | [`handshake`] | Role/state orchestrator |
//! | [`vectors`] | Deterministic wire vectors (test-only) |
//!
//! # Example
//!
//! ```
//! use latch_handshake::Handshake;
//!
//! let mut offerer = Handshake::new();
//! offerer.set_supported_algorithms(["P-256", "P-384"])?;
//! offerer.select_keys_for_challenge(100, 400)?;
//! let challenge = offerer.export_challenge_bytes()?;
//!
//! let mut responder = Handshake::new();
//! responder.set_supported_algorithms(["P-384"])?;
//! responder.import_challenge_bytes(&challenge)?;
//! responder.select_key_for_response(100, 400)?;
//! responder.attach_credentials("alice", "secret")?;
//! let response = responder.export_response_bytes()?;
//!
//! offerer.import_response_bytes(&response)?;
//! assert_eq!(offerer.session_key(), responder.session_key());
//! assert_eq!(offerer.peer_login(), Some("alice"));
//! # Ok::<(), latch_core::LatchError>(())
//! ```

/// Named curves and raw EC operations.
pub mod curve;

/// Session key derivation.
pub mod session;

/// EC public keys.
pub mod eckey;

/// Challenge message.
pub mod challenge;

/// Response message.
pub mod response;

/// Size ceilings.
pub mod policy;

/// Handshake state machine.
pub mod handshake;

/// Deterministic wire vector generator (test use only).
/// Requires the `vectors` feature: `cargo test --features vectors`.
#[cfg(feature = "vectors")]
pub mod vectors;

pub use challenge::Challenge;
pub use curve::NamedCurve;
pub use eckey::EcKey;
pub use handshake::{Handshake, HandshakeState, Role};
pub use policy::HandshakePolicy;
pub use response::Response;
pub use session::SessionKey;
