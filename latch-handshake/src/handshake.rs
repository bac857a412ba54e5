//! Handshake orchestrator: the challenge/response state machine.
//!
//! One `Handshake` plays exactly one role per attempt. The role is fixed
//! by the first role-specific call; calling the other role's methods, or
//! calling a method before its prerequisite state, returns
//! `InvalidState` and changes nothing.
//!
//! ```text
//! Offerer:   Init -> AlgorithmsSet -> ChallengeKeysChosen -> ChallengeSent -> Complete
//!            (set_supported_algorithms, select_keys_for_challenge,
//!             export_challenge_bytes, import_response_bytes)
//!
//! Responder: Init -> AlgorithmsSet -> ChallengeReceived -> ResponseKeyChosen -> ResponseSent
//!            (set_supported_algorithms, import_challenge_bytes,
//!             select_key_for_response, export_response_bytes)
//! ```
//!
//! Peer input is decoded into temporaries and committed only once every
//! check has passed, so a rejected message leaves the handshake exactly
//! as it was. No partial session key or credentials are ever exposed.

use latch_core::bignum::BigNum;
use latch_core::constants::{MAX_ALGORITHM_NAME_LEN, MAX_CHALLENGE_KEYS};
use latch_core::errors::{LatchError, LatchResult};
use latch_core::seal;
use latch_core::xdr::{XdrBuf, XdrDecode, XdrEncode};
use latch_core::zblob::ZBlob;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::challenge::Challenge;
use crate::curve::{strength_bits, NamedCurve};
use crate::eckey::EcKey;
use crate::policy::HandshakePolicy;
use crate::response::Response;
use crate::session::SessionKey;

/// Side of the exchange this instance plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Issues the challenge, consumes the response.
    Offerer,
    /// Consumes the challenge, issues the response.
    Responder,
}

/// Handshake progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    Init,
    AlgorithmsSet,
    /// Offerer: candidate keypairs generated.
    ChallengeKeysChosen,
    /// Offerer: challenge bytes handed out.
    ChallengeSent,
    /// Responder: peer challenge decoded.
    ChallengeReceived,
    /// Responder: key chosen, session key derived.
    ResponseKeyChosen,
    /// Responder: response bytes handed out.
    ResponseSent,
    /// Offerer: response consumed, session key derived.
    Complete,
}

/// Private half of a challenge candidate, kept until the response arrives.
struct CandidateKey {
    algorithm: String,
    strength_bits: u32,
    private_key: BigNum,
}

/// ECDH challenge/response handshake, one role per instance.
pub struct Handshake {
    policy: HandshakePolicy,
    role: Option<Role>,
    state: HandshakeState,
    supported: Vec<String>,
    candidates: Vec<CandidateKey>,
    challenge: Challenge,
    response: Response,
    session_key: Option<SessionKey>,
    peer_login: Option<Zeroizing<String>>,
    peer_password: Option<Zeroizing<String>>,
}

impl Default for Handshake {
    fn default() -> Self {
        Self::new()
    }
}

impl Handshake {
    pub fn new() -> Self {
        Self::with_policy(HandshakePolicy::default())
    }

    pub fn with_policy(policy: HandshakePolicy) -> Self {
        Self {
            policy,
            role: None,
            state: HandshakeState::Init,
            supported: Vec::new(),
            candidates: Vec::new(),
            challenge: Challenge::new(),
            response: Response::new(),
            session_key: None,
            peer_login: None,
            peer_password: None,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn policy(&self) -> &HandshakePolicy {
        &self.policy
    }

    /// `None` until the first role-specific call.
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn state(&self) -> HandshakeState {
        self.state
    }

    pub fn supported_algorithms(&self) -> &[String] {
        &self.supported
    }

    /// Outgoing challenge (offerer) or the one received (responder).
    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    /// Outgoing response (responder) or the one received (offerer).
    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn session_key(&self) -> Option<&SessionKey> {
        self.session_key.as_ref()
    }

    /// Login the responder supplied. Offerer side, after completion.
    pub fn peer_login(&self) -> Option<&str> {
        self.peer_login.as_ref().map(|s| s.as_str())
    }

    /// Password the responder supplied. Offerer side, after completion.
    pub fn peer_password(&self) -> Option<&str> {
        self.peer_password.as_ref().map(|s| s.as_str())
    }

    /// The peer's certificate, inflated. `None` if the peer sent none or
    /// its message has not arrived yet.
    ///
    /// Trust decisions about the certificate belong to the caller.
    pub fn peer_certificate(&self) -> LatchResult<Option<Vec<u8>>> {
        let blob = match (self.role, self.state) {
            (Some(Role::Offerer), HandshakeState::Complete) => self.response.certificate(),
            (Some(Role::Responder), _) => self.challenge.certificate(),
            _ => return Ok(None),
        };
        if blob.is_empty() {
            return Ok(None);
        }
        Ok(Some(blob.data()?.into_owned()))
    }

    // ── Shared ──────────────────────────────────────────────────────

    /// Set the algorithms this side supports, in preference order.
    /// Duplicates are dropped; unknown names are kept and skipped later.
    ///
    /// # Errors
    /// - `InvalidState` once a role has been taken.
    /// - `PolicyViolation` for an empty list or a name over 63 bytes.
    pub fn set_supported_algorithms<I, S>(&mut self, algorithms: I) -> LatchResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.expect_state(
            None,
            &[HandshakeState::Init, HandshakeState::AlgorithmsSet],
            "set_supported_algorithms",
        )?;

        let mut supported: Vec<String> = Vec::new();
        for name in algorithms {
            let name = name.as_ref();
            if name.is_empty() || name.len() > MAX_ALGORITHM_NAME_LEN {
                return Err(LatchError::PolicyViolation(format!(
                    "algorithm name must be 1..={MAX_ALGORITHM_NAME_LEN} bytes"
                )));
            }
            if !supported.iter().any(|s| s == name) {
                supported.push(name.to_string());
            }
        }
        if supported.is_empty() {
            return Err(LatchError::PolicyViolation("no algorithms supplied".into()));
        }

        debug!(algorithms = ?supported, "supported algorithms set");
        self.supported = supported;
        self.state = HandshakeState::AlgorithmsSet;
        Ok(())
    }

    /// Attach a certificate to this side's outgoing message.
    ///
    /// Offerer: after `select_keys_for_challenge`. Responder: after
    /// `import_challenge_bytes`, before `export_response_bytes`.
    ///
    /// The certificate is stored deflated, so later exports reuse it.
    ///
    /// # Errors
    /// `PolicyViolation` if the compressed certificate exceeds the policy.
    pub fn attach_certificate(&mut self, certificate: &[u8]) -> LatchResult<()> {
        let mut raw = ZBlob::new();
        raw.put_data(certificate);
        let mut blob = ZBlob::new();
        blob.put_zdata(&raw.zdata()?);
        self.check_certificate_len(&blob)?;

        let target = match (self.role, self.state) {
            (Some(Role::Offerer), HandshakeState::ChallengeKeysChosen) => {
                self.challenge.certificate_mut()
            }
            (
                Some(Role::Responder),
                HandshakeState::ChallengeReceived | HandshakeState::ResponseKeyChosen,
            ) => self.response.certificate_mut(),
            _ => return Err(self.invalid_state("attach_certificate")),
        };
        let zsize = blob.zsize()?;
        *target = blob;
        debug!(zsize, "certificate attached");
        Ok(())
    }

    // ── Offerer ─────────────────────────────────────────────────────

    /// Generate a keypair for each supported algorithm whose strength lies
    /// in `[min_bits, max_bits]`, in the order added, up to three. Returns
    /// the number of challenge slots filled.
    ///
    /// # Errors
    /// `PolicyViolation` if no algorithm qualifies.
    pub fn select_keys_for_challenge(&mut self, min_bits: u32, max_bits: u32) -> LatchResult<usize> {
        self.expect_state(
            Some(Role::Offerer),
            &[HandshakeState::AlgorithmsSet],
            "select_keys_for_challenge",
        )?;

        let mut challenge = Challenge::new();
        let mut candidates = Vec::new();
        for name in &self.supported {
            if candidates.len() == MAX_CHALLENGE_KEYS {
                break;
            }
            let bits = strength_bits(name);
            if bits == 0 || bits < min_bits || bits > max_bits {
                continue;
            }
            match EcKey::new(name).generate_keypair() {
                Ok((public, private_key)) => {
                    challenge.push_key(public)?;
                    candidates.push(CandidateKey {
                        algorithm: name.clone(),
                        strength_bits: bits,
                        private_key,
                    });
                }
                Err(e) => warn!(algorithm = %name, error = %e, "skipping algorithm"),
            }
        }
        if candidates.is_empty() {
            return Err(LatchError::PolicyViolation(format!(
                "no supported algorithm within {min_bits}..={max_bits} bits"
            )));
        }

        debug!(
            keys = candidates.len(),
            strengths = ?candidates.iter().map(|c| c.strength_bits).collect::<Vec<_>>(),
            "challenge keys chosen"
        );
        self.challenge = challenge;
        self.candidates = candidates;
        self.role = Some(Role::Offerer);
        self.state = HandshakeState::ChallengeKeysChosen;
        Ok(self.candidates.len())
    }

    /// Serialize the challenge. May be called again to retransmit.
    ///
    /// # Errors
    /// `PolicyViolation` if the message exceeds `max_message_len`.
    pub fn export_challenge_bytes(&mut self) -> LatchResult<Vec<u8>> {
        self.expect_state(
            Some(Role::Offerer),
            &[HandshakeState::ChallengeKeysChosen, HandshakeState::ChallengeSent],
            "export_challenge_bytes",
        )?;
        let bytes = self.challenge.encode_to_vec()?;
        self.check_message_len(bytes.len())?;

        self.state = HandshakeState::ChallengeSent;
        debug!(len = bytes.len(), "challenge exported");
        Ok(bytes)
    }

    /// Consume the responder's message: derive the session key from the
    /// matching candidate and, if present, open the sealed credentials.
    ///
    /// # Errors
    /// - `PolicyViolation` for an oversize message, certificate or
    ///   credentials blob.
    /// - `EndOfStream` / `InvalidEncoding` for malformed bytes.
    /// - `UnknownAlgorithm` if the response names an algorithm that was
    ///   not offered.
    /// - `CryptoFailure` for an invalid point or a credentials MAC mismatch.
    pub fn import_response_bytes(&mut self, bytes: &[u8]) -> LatchResult<()> {
        self.expect_state(
            Some(Role::Offerer),
            &[HandshakeState::ChallengeSent],
            "import_response_bytes",
        )?;
        self.check_message_len(bytes.len())?;

        let (response, session_key, credentials) =
            self.accept_response(bytes).inspect_err(|e| {
                warn!(
                    code = e.code(),
                    peer_input = e.is_peer_input(),
                    error = %e,
                    "response rejected"
                );
            })?;

        if let Some((login, password)) = credentials {
            self.peer_login = Some(login);
            self.peer_password = Some(password);
        }
        debug!(
            algorithm = %response.key().algorithm(),
            session = %session_key.fingerprint(),
            credentials = self.peer_login.is_some(),
            "handshake complete"
        );
        self.response = response;
        self.session_key = Some(session_key);
        // Candidate scalars are wiped on drop.
        self.candidates.clear();
        self.state = HandshakeState::Complete;
        Ok(())
    }

    #[allow(clippy::type_complexity)]
    fn accept_response(
        &self,
        bytes: &[u8],
    ) -> LatchResult<(
        Response,
        SessionKey,
        Option<(Zeroizing<String>, Zeroizing<String>)>,
    )> {
        let response = Response::decode_exact(bytes)?;
        self.check_certificate_len(response.certificate())?;
        self.check_credentials_len(response.credentials().len())?;
        let algorithm = response.key().algorithm();
        let candidate = self
            .candidates
            .iter()
            .find(|c| c.algorithm == algorithm)
            .ok_or_else(|| {
                LatchError::UnknownAlgorithm(format!("response uses {algorithm:?}, not offered"))
            })?;
        let session_key = response.key().derive_shared_secret(&candidate.private_key)?;

        let credentials = if response.credentials().is_empty() {
            None
        } else {
            let plaintext = seal::open(session_key.as_bytes(), response.credentials())?;
            let mut buf = XdrBuf::from_bytes(&plaintext);
            let login = Zeroizing::new(buf.get_string(self.policy.max_login_len)?);
            let password = Zeroizing::new(buf.get_string(self.policy.max_password_len)?);
            buf.expect_end()?;
            Some((login, password))
        };
        Ok((response, session_key, credentials))
    }

    // ── Responder ───────────────────────────────────────────────────

    /// Decode and store the offerer's challenge.
    ///
    /// # Errors
    /// - `PolicyViolation` for an oversize message or certificate.
    /// - `EndOfStream` / `InvalidEncoding` for malformed bytes.
    pub fn import_challenge_bytes(&mut self, bytes: &[u8]) -> LatchResult<()> {
        self.expect_state(
            Some(Role::Responder),
            &[HandshakeState::AlgorithmsSet],
            "import_challenge_bytes",
        )?;
        self.check_message_len(bytes.len())?;

        let challenge = Challenge::decode_exact(bytes)
            .and_then(|challenge| {
                self.check_certificate_len(challenge.certificate())?;
                Ok(challenge)
            })
            .inspect_err(|e| {
                warn!(
                    code = e.code(),
                    peer_input = e.is_peer_input(),
                    error = %e,
                    "challenge rejected"
                );
            })?;

        debug!(keys = challenge.key_count(), "challenge received");
        self.challenge = challenge;
        self.role = Some(Role::Responder);
        self.state = HandshakeState::ChallengeReceived;
        Ok(())
    }

    /// Answer the first challenge slot whose curve is supported here and
    /// whose strength lies in `[min_bits, max_bits]`: generate a fresh
    /// keypair on that curve and derive the session key.
    ///
    /// # Errors
    /// - `UnknownAlgorithm` if no slot is compatible.
    /// - `CryptoFailure` if generation or derivation fails for that slot.
    pub fn select_key_for_response(&mut self, min_bits: u32, max_bits: u32) -> LatchResult<()> {
        self.expect_state(
            Some(Role::Responder),
            &[HandshakeState::ChallengeReceived],
            "select_key_for_response",
        )?;

        let offered = self
            .challenge
            .keys()
            .find(|key| self.is_compatible(key, min_bits, max_bits))
            .ok_or_else(|| {
                LatchError::UnknownAlgorithm(format!(
                    "no challenge key supported within {min_bits}..={max_bits} bits"
                ))
            })?;

        // Same spelling as the challenge, so the offerer's lookup matches.
        let (public, private_key) = EcKey::new(offered.algorithm()).generate_keypair()?;
        let session_key = offered.derive_shared_secret(&private_key)?;

        debug!(
            algorithm = %public.algorithm(),
            session = %session_key.fingerprint(),
            "response key chosen"
        );
        self.response.set_key(public);
        self.session_key = Some(session_key);
        self.state = HandshakeState::ResponseKeyChosen;
        Ok(())
    }

    fn is_compatible(&self, key: &EcKey, min_bits: u32, max_bits: u32) -> bool {
        let Some(curve) = NamedCurve::from_name(key.algorithm()) else {
            return false;
        };
        let bits = curve.strength_bits();
        key.has_data()
            && (min_bits..=max_bits).contains(&bits)
            && self
                .supported
                .iter()
                .any(|name| NamedCurve::from_name(name) == Some(curve))
    }

    /// Seal `{login, password}` under the session key into the response.
    ///
    /// # Errors
    /// - `InvalidState` before a session key exists.
    /// - `PolicyViolation` if either field or the sealed blob is too long.
    pub fn attach_credentials(&mut self, login: &str, password: &str) -> LatchResult<()> {
        self.expect_state(
            Some(Role::Responder),
            &[HandshakeState::ResponseKeyChosen],
            "attach_credentials",
        )?;
        let session_key = self
            .session_key
            .as_ref()
            .ok_or_else(|| self.invalid_state("attach_credentials"))?;

        if login.len() > self.policy.max_login_len {
            return Err(LatchError::PolicyViolation(format!(
                "login is {} bytes, limit {}",
                login.len(),
                self.policy.max_login_len
            )));
        }
        if password.len() > self.policy.max_password_len {
            return Err(LatchError::PolicyViolation(format!(
                "password is {} bytes, limit {}",
                password.len(),
                self.policy.max_password_len
            )));
        }

        let mut plaintext = XdrBuf::new();
        plaintext.put_string(login)?;
        plaintext.put_string(password)?;
        let plaintext = Zeroizing::new(plaintext.to_vec());

        let sealed = seal::seal(session_key.as_bytes(), &plaintext)?;
        self.check_credentials_len(sealed.len())?;
        self.response.set_credentials(sealed)?;
        debug!("credentials attached");
        Ok(())
    }

    /// Serialize the response. May be called again to retransmit.
    ///
    /// # Errors
    /// `PolicyViolation` if the message exceeds `max_message_len`.
    pub fn export_response_bytes(&mut self) -> LatchResult<Vec<u8>> {
        self.expect_state(
            Some(Role::Responder),
            &[HandshakeState::ResponseKeyChosen, HandshakeState::ResponseSent],
            "export_response_bytes",
        )?;
        let bytes = self.response.encode_to_vec()?;
        self.check_message_len(bytes.len())?;

        self.state = HandshakeState::ResponseSent;
        debug!(len = bytes.len(), "response exported");
        Ok(bytes)
    }

    // ── Helpers ─────────────────────────────────────────────────────

    /// Role must be unset or equal to `role` (`None`: no role may be
    /// set yet), and the state must be one of `allowed`.
    fn expect_state(
        &self,
        role: Option<Role>,
        allowed: &[HandshakeState],
        op: &str,
    ) -> LatchResult<()> {
        let role_ok = match (self.role, role) {
            (None, _) => true,
            (Some(current), Some(wanted)) => current == wanted,
            (Some(_), None) => false,
        };
        if role_ok && allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(self.invalid_state(op))
        }
    }

    fn invalid_state(&self, op: &str) -> LatchError {
        warn!(op, role = ?self.role, state = ?self.state, "operation out of order");
        LatchError::InvalidState(format!(
            "{op} not allowed for role {:?} in state {:?}",
            self.role, self.state
        ))
    }

    fn check_message_len(&self, len: usize) -> LatchResult<()> {
        if len > self.policy.max_message_len {
            return Err(LatchError::PolicyViolation(format!(
                "message is {len} bytes, limit {}",
                self.policy.max_message_len
            )));
        }
        Ok(())
    }

    /// Applies to our own certificate and to the peer's, compressed.
    fn check_certificate_len(&self, certificate: &ZBlob) -> LatchResult<()> {
        let zsize = certificate.zsize()?;
        if zsize > self.policy.max_certificate_len {
            return Err(LatchError::PolicyViolation(format!(
                "compressed certificate is {zsize} bytes, limit {}",
                self.policy.max_certificate_len
            )));
        }
        Ok(())
    }

    fn check_credentials_len(&self, len: usize) -> LatchResult<()> {
        if len > self.policy.max_credentials_len {
            return Err(LatchError::PolicyViolation(format!(
                "sealed credentials are {len} bytes, limit {}",
                self.policy.max_credentials_len
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Handshake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handshake")
            .field("role", &self.role)
            .field("state", &self.state)
            .field("supported", &self.supported)
            .field("candidates", &self.candidates.len())
            .field("session_key", &self.session_key)
            .field("peer_login", &self.peer_login.is_some())
            .finish()
    }
}
