//! Response message: responder to offerer.
//!
//! ## Wire form
//! ```text
//! EcKey key                        (the responder's fresh public key)
//! u32 compressed_flag              (always 1, unchecked on decode)
//! u32 cert_len  || cert  || pad    (raw deflate)
//! u32 creds_len || creds || pad    (sealed credentials, may be empty)
//! ```

use latch_core::constants::{CERT_COMPRESSED_FLAG, MAX_CERTIFICATE_LEN, MAX_CREDENTIALS_LEN};
use latch_core::errors::{LatchError, LatchResult};
use latch_core::seal::SEAL_OVERHEAD;
use latch_core::xdr::{XdrBuf, XdrDecode, XdrEncode};
use latch_core::zblob::ZBlob;

use crate::eckey::EcKey;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    key: EcKey,
    certificate: ZBlob,
    credentials: Vec<u8>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&self) -> &EcKey {
        &self.key
    }

    pub fn set_key(&mut self, key: EcKey) {
        self.key = key;
    }

    pub fn certificate(&self) -> &ZBlob {
        &self.certificate
    }

    pub fn certificate_mut(&mut self) -> &mut ZBlob {
        &mut self.certificate
    }

    /// Sealed credentials blob; empty when none were supplied.
    pub fn credentials(&self) -> &[u8] {
        &self.credentials
    }

    /// Store a sealed credentials blob.
    ///
    /// # Errors
    /// `PolicyViolation` unless the blob is empty or between the sealing
    /// overhead and `MAX_CREDENTIALS_LEN` bytes.
    pub fn set_credentials(&mut self, sealed: Vec<u8>) -> LatchResult<()> {
        check_credentials_len(&sealed).map_err(|e| LatchError::PolicyViolation(e.to_string()))?;
        self.credentials = sealed;
        Ok(())
    }
}

fn check_credentials_len(blob: &[u8]) -> Result<(), String> {
    if blob.is_empty() {
        return Ok(());
    }
    if blob.len() < SEAL_OVERHEAD {
        return Err(format!(
            "credentials blob of {} bytes is shorter than {SEAL_OVERHEAD}",
            blob.len()
        ));
    }
    if blob.len() > MAX_CREDENTIALS_LEN {
        return Err(format!(
            "credentials blob of {} bytes exceeds {MAX_CREDENTIALS_LEN}",
            blob.len()
        ));
    }
    Ok(())
}

impl XdrEncode for Response {
    fn to_xdr(&self, buf: &mut XdrBuf) -> LatchResult<()> {
        self.key.to_xdr(buf)?;
        buf.put_u32(CERT_COMPRESSED_FLAG);
        buf.put_opaque(&self.certificate.zdata()?)?;
        buf.put_opaque(&self.credentials)
    }
}

impl XdrDecode for Response {
    fn from_xdr(buf: &mut XdrBuf) -> LatchResult<Self> {
        let key = EcKey::from_xdr(buf)?;
        let _compressed_flag = buf.get_u32()?;
        let cert = buf.get_opaque(MAX_CERTIFICATE_LEN)?;
        let credentials = buf.get_opaque(MAX_CREDENTIALS_LEN)?;
        check_credentials_len(&credentials).map_err(LatchError::InvalidEncoding)?;

        let mut certificate = ZBlob::new();
        certificate.put_zdata(&cert);
        Ok(Self {
            key,
            certificate,
            credentials,
        })
    }
}
