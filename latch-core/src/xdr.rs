//! XDR-buf: length-prefixed, 4-byte aligned binary encoding.
//!
//! ## Wire rules
//! ```text
//! u32 / i32      : 4 bytes big-endian, no prefix
//! counted bytes  : u32 length || bytes || 0..3 zero pad bytes
//! ```
//!
//! The buffer is append-only and stored as fixed-size pages, but callers
//! see one logical byte sequence. A read cursor tracks decode progress;
//! [`XdrBuf::rewind`] moves it back to the start without touching content.
//!
//! Decoding never trusts a length prefix: it is checked against the
//! caller's maximum and against the bytes actually present before any
//! allocation happens.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{XDR_ALIGN, XDR_PAGE_SIZE};
use crate::errors::{LatchError, LatchResult};

/// Number of zero bytes that follow `len` payload bytes on the wire.
pub fn padding(len: usize) -> usize {
    (XDR_ALIGN - len % XDR_ALIGN) % XDR_ALIGN
}

/// Paged encode/decode buffer.
///
/// Contents are wiped on drop; the same buffer type carries credential
/// plaintext before it is sealed.
#[derive(Default, Zeroize, ZeroizeOnDrop)]
pub struct XdrBuf {
    pages: Vec<Vec<u8>>,
    len: usize,
    cursor: usize,
}

impl XdrBuf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a buffer holding a copy of `bytes`, cursor at the start.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buf = Self::new();
        buf.append(bytes);
        buf
    }

    /// Total logical size in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current read position.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Bytes left between the cursor and the end of the stream.
    pub fn remaining(&self) -> usize {
        self.len - self.cursor
    }

    /// Number of internal pages in use.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Reset the read cursor to the start. Content is unchanged.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Copy the whole logical sequence out as one contiguous vector.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        for page in &self.pages {
            out.extend_from_slice(page);
        }
        out
    }

    /// Fail unless every byte has been consumed.
    pub fn expect_end(&self) -> LatchResult<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(LatchError::InvalidEncoding(format!("{n} trailing bytes"))),
        }
    }

    fn append(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            if self.pages.last().map_or(true, |p| p.len() == XDR_PAGE_SIZE) {
                self.pages.push(Vec::with_capacity(XDR_PAGE_SIZE));
            }
            if let Some(page) = self.pages.last_mut() {
                let take = (XDR_PAGE_SIZE - page.len()).min(data.len());
                page.extend_from_slice(&data[..take]);
                self.len += take;
                data = &data[take..];
            }
        }
    }

    fn read_exact(&mut self, out: &mut [u8]) -> LatchResult<()> {
        if out.len() > self.remaining() {
            return Err(LatchError::EndOfStream);
        }
        let mut filled = 0;
        while filled < out.len() {
            let page = &self.pages[self.cursor / XDR_PAGE_SIZE];
            let offset = self.cursor % XDR_PAGE_SIZE;
            let take = (page.len() - offset).min(out.len() - filled);
            out[filled..filled + take].copy_from_slice(&page[offset..offset + take]);
            filled += take;
            self.cursor += take;
        }
        Ok(())
    }

    // ── Encode ──────────────────────────────────────────────────────

    pub fn put_u32(&mut self, value: u32) {
        self.append(&value.to_be_bytes());
    }

    pub fn put_i32(&mut self, value: i32) {
        self.append(&value.to_be_bytes());
    }

    /// Write `u32 len || bytes || pad`.
    ///
    /// # Errors
    /// `InvalidEncoding` if `bytes` is longer than a u32 can describe.
    pub fn put_opaque(&mut self, bytes: &[u8]) -> LatchResult<()> {
        let len = u32::try_from(bytes.len()).map_err(|_| {
            LatchError::InvalidEncoding(format!("{} bytes exceed u32 length", bytes.len()))
        })?;
        self.put_u32(len);
        self.append(bytes);
        self.append(&[0u8; XDR_ALIGN][..padding(bytes.len())]);
        Ok(())
    }

    /// Write a string as counted bytes (no terminator on the wire).
    pub fn put_string(&mut self, value: &str) -> LatchResult<()> {
        self.put_opaque(value.as_bytes())
    }

    // ── Decode ──────────────────────────────────────────────────────

    pub fn get_u32(&mut self) -> LatchResult<u32> {
        let mut word = [0u8; 4];
        self.read_exact(&mut word)?;
        Ok(u32::from_be_bytes(word))
    }

    pub fn get_i32(&mut self) -> LatchResult<i32> {
        let mut word = [0u8; 4];
        self.read_exact(&mut word)?;
        Ok(i32::from_be_bytes(word))
    }

    /// Read counted bytes of at most `max_len` bytes.
    ///
    /// # Errors
    /// - `EndOfStream` if the length word itself is missing.
    /// - `InvalidEncoding` if the length exceeds `max_len`, exceeds the
    ///   bytes present, or the pad bytes are not zero.
    pub fn get_opaque(&mut self, max_len: usize) -> LatchResult<Vec<u8>> {
        let len = self.get_u32()? as usize;
        if len > max_len {
            return Err(LatchError::InvalidEncoding(format!(
                "length {len} exceeds maximum {max_len}"
            )));
        }
        let pad = padding(len);
        if len + pad > self.remaining() {
            return Err(LatchError::InvalidEncoding(format!(
                "length {len} exceeds {} available bytes",
                self.remaining()
            )));
        }

        let mut out = vec![0u8; len];
        self.read_exact(&mut out)?;
        let mut pad_bytes = [0u8; XDR_ALIGN];
        self.read_exact(&mut pad_bytes[..pad])?;
        if pad_bytes.iter().any(|&b| b != 0) {
            return Err(LatchError::InvalidEncoding("non-zero padding".into()));
        }
        Ok(out)
    }

    /// Read a counted UTF-8 string of at most `max_len` bytes.
    pub fn get_string(&mut self, max_len: usize) -> LatchResult<String> {
        let bytes = self.get_opaque(max_len)?;
        String::from_utf8(bytes)
            .map_err(|_| LatchError::InvalidEncoding("string is not UTF-8".into()))
    }
}

impl std::fmt::Debug for XdrBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XdrBuf")
            .field("len", &self.len)
            .field("cursor", &self.cursor)
            .field("pages", &self.pages.len())
            .finish()
    }
}

/// Types with an XDR wire form.
pub trait XdrEncode {
    fn to_xdr(&self, buf: &mut XdrBuf) -> LatchResult<()>;

    /// Encode into a fresh buffer and return its bytes.
    fn encode_to_vec(&self) -> LatchResult<Vec<u8>> {
        let mut buf = XdrBuf::new();
        self.to_xdr(&mut buf)?;
        Ok(buf.to_vec())
    }
}

/// Types decodable from their XDR wire form.
pub trait XdrDecode: Sized {
    fn from_xdr(buf: &mut XdrBuf) -> LatchResult<Self>;

    /// Decode a value that must occupy `bytes` exactly.
    fn decode_exact(bytes: &[u8]) -> LatchResult<Self> {
        let mut buf = XdrBuf::from_bytes(bytes);
        let value = Self::from_xdr(&mut buf)?;
        buf.expect_end()?;
        Ok(value)
    }
}
