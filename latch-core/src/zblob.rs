//! Compressed blob container for certificates.
//!
//! Holds either the raw bytes or their raw-deflate form (no zlib header)
//! and produces the other form on request. Nothing is (de)compressed until
//! someone asks for it.

use std::borrow::Cow;
use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::constants::MAX_INFLATED_LEN;
use crate::errors::{LatchError, LatchResult};

#[derive(Clone, Default)]
enum Contents {
    #[default]
    Empty,
    Raw(Vec<u8>),
    Compressed(Vec<u8>),
}

/// Certificate blob, stored raw or compressed.
#[derive(Clone, Default)]
pub struct ZBlob {
    contents: Contents,
}

impl ZBlob {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes. An empty slice clears the blob.
    pub fn put_data(&mut self, data: &[u8]) {
        self.contents = if data.is_empty() {
            Contents::Empty
        } else {
            Contents::Raw(data.to_vec())
        };
    }

    /// Store compressed bytes as received. An empty slice clears the blob.
    pub fn put_zdata(&mut self, zdata: &[u8]) {
        self.contents = if zdata.is_empty() {
            Contents::Empty
        } else {
            Contents::Compressed(zdata.to_vec())
        };
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.contents, Contents::Empty)
    }

    /// Raw bytes, inflating if the blob was stored compressed.
    ///
    /// # Errors
    /// `Compression` if the stored deflate stream is corrupt or inflates
    /// past `MAX_INFLATED_LEN`.
    pub fn data(&self) -> LatchResult<Cow<'_, [u8]>> {
        match &self.contents {
            Contents::Empty => Ok(Cow::Borrowed(&[])),
            Contents::Raw(raw) => Ok(Cow::Borrowed(raw)),
            Contents::Compressed(z) => inflate(z).map(Cow::Owned),
        }
    }

    /// Compressed bytes, deflating if the blob was stored raw.
    pub fn zdata(&self) -> LatchResult<Cow<'_, [u8]>> {
        match &self.contents {
            Contents::Empty => Ok(Cow::Borrowed(&[])),
            Contents::Raw(raw) => deflate(raw).map(Cow::Owned),
            Contents::Compressed(z) => Ok(Cow::Borrowed(z)),
        }
    }

    pub fn size(&self) -> LatchResult<usize> {
        Ok(self.data()?.len())
    }

    pub fn zsize(&self) -> LatchResult<usize> {
        Ok(self.zdata()?.len())
    }
}

impl PartialEq for ZBlob {
    /// Blobs are equal when their raw contents are. Corrupt blobs are
    /// never equal to anything.
    fn eq(&self, other: &Self) -> bool {
        match (self.data(), other.data()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Debug for ZBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.contents {
            Contents::Empty => f.write_str("ZBlob(empty)"),
            Contents::Raw(raw) => write!(f, "ZBlob(raw, {} bytes)", raw.len()),
            Contents::Compressed(z) => write!(f, "ZBlob(compressed, {} bytes)", z.len()),
        }
    }
}

fn deflate(raw: &[u8]) -> LatchResult<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(raw)
        .map_err(|e| LatchError::Compression(format!("deflate failed: {e}")))?;
    encoder
        .finish()
        .map_err(|e| LatchError::Compression(format!("deflate failed: {e}")))
}

fn inflate(z: &[u8]) -> LatchResult<Vec<u8>> {
    let mut out = Vec::new();
    DeflateDecoder::new(z)
        .take(MAX_INFLATED_LEN as u64 + 1)
        .read_to_end(&mut out)
        .map_err(|e| LatchError::Compression(format!("inflate failed: {e}")))?;
    if out.len() > MAX_INFLATED_LEN {
        return Err(LatchError::Compression(format!(
            "inflated size exceeds {MAX_INFLATED_LEN} bytes"
        )));
    }
    Ok(out)
}
