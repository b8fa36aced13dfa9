//! Record framing
//!
//! Every EFD record starts with a 16-byte header:
//! 1. Magic (4 bytes, ASCII): "EFDF", "EFRM" or "EFTP"
//! 2. Reserved (4 bytes)
//! 3. Total record length (8 bytes, little-endian, header included)
//!
//! The payload follows immediately and is `total - 16` bytes long.

use crate::constants::{EFDF_MAGIC, EFRM_MAGIC, EFTP_MAGIC, RECORD_HEADER_SIZE};
use crate::error::DecodeError;
use bytes::{BufMut, BytesMut};
use std::io::{ErrorKind, Read};

#[cfg(feature = "logging")]
use tracing::trace;

/// A framed record before its payload is interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Record magic
    pub magic: [u8; 4],

    /// Reserved header bytes, kept as read
    pub reserved: [u8; 4],

    /// Total record length, header included
    pub length: u64,

    /// Payload bytes (`length - 16` of them)
    pub data: Vec<u8>,
}

impl RawRecord {
    /// Create a record around a payload, computing the total length
    ///
    /// The reserved header bytes are zero.
    pub fn new(magic: [u8; 4], data: Vec<u8>) -> Self {
        Self {
            magic,
            reserved: [0; 4],
            length: (RECORD_HEADER_SIZE + data.len()) as u64,
            data,
        }
    }

    /// Re-encode the record exactly as framed
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(RECORD_HEADER_SIZE + self.data.len());
        buf.put_slice(&self.magic);
        buf.put_slice(&self.reserved);
        buf.put_u64_le(self.length);
        buf.put_slice(&self.data);
        buf.to_vec()
    }

    /// Resolve the magic into a record kind
    pub fn kind(&self) -> Result<RecordKind, DecodeError> {
        RecordKind::from_magic(&self.magic)
    }
}

/// The three record kinds of an EFD file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Roll metadata
    Efdf,
    /// One exposed frame
    Efrm,
    /// Thumbnail image
    Eftp,
}

impl RecordKind {
    /// Map a magic to its record kind
    pub fn from_magic(magic: &[u8; 4]) -> Result<Self, DecodeError> {
        match magic {
            m if m == EFDF_MAGIC => Ok(RecordKind::Efdf),
            m if m == EFRM_MAGIC => Ok(RecordKind::Efrm),
            m if m == EFTP_MAGIC => Ok(RecordKind::Eftp),
            other => Err(DecodeError::UnknownRecordType(*other)),
        }
    }

    /// Display name of the record kind
    pub const fn name(&self) -> &'static str {
        match self {
            RecordKind::Efdf => "EFDF",
            RecordKind::Efrm => "EFRM",
            RecordKind::Eftp => "EFTP",
        }
    }
}

/// Read the next record from a stream
///
/// Returns `Ok(None)` when the stream is exhausted exactly at a record
/// boundary. A stream that ends inside a header or payload is a framing
/// error, never a clean end of stream.
pub fn read_raw<R: Read>(reader: &mut R) -> Result<Option<RawRecord>, DecodeError> {
    let mut header = [0u8; RECORD_HEADER_SIZE];
    let filled = fill_header(reader, &mut header)?;

    if filled == 0 {
        return Ok(None);
    }
    if filled < RECORD_HEADER_SIZE {
        return Err(DecodeError::Framing(format!(
            "truncated record header: expected {} bytes, got {}",
            RECORD_HEADER_SIZE, filled
        )));
    }

    let mut magic = [0u8; 4];
    magic.copy_from_slice(&header[0..4]);
    let mut reserved = [0u8; 4];
    reserved.copy_from_slice(&header[4..8]);

    let mut length_bytes = [0u8; 8];
    length_bytes.copy_from_slice(&header[8..16]);
    let length = u64::from_le_bytes(length_bytes);

    if length < RECORD_HEADER_SIZE as u64 {
        return Err(DecodeError::Framing(format!(
            "corrupt record length {} (smaller than the {}-byte header)",
            length, RECORD_HEADER_SIZE
        )));
    }

    let payload_len = length - RECORD_HEADER_SIZE as u64;

    // Grow with what is actually read so a bogus length cannot force a huge allocation
    let mut data = Vec::new();
    let read = reader.by_ref().take(payload_len).read_to_end(&mut data)?;
    if (read as u64) < payload_len {
        return Err(DecodeError::Framing(format!(
            "truncated {} payload: expected {} bytes, got {}",
            String::from_utf8_lossy(&magic),
            payload_len,
            read
        )));
    }

    #[cfg(feature = "logging")]
    trace!(
        "Read {} record ({} bytes)",
        String::from_utf8_lossy(&magic),
        length
    );

    Ok(Some(RawRecord {
        magic,
        reserved,
        length,
        data,
    }))
}

/// Fill the header buffer, returning how many bytes were available
fn fill_header<R: Read>(reader: &mut R, header: &mut [u8]) -> Result<usize, DecodeError> {
    let mut filled = 0;
    while filled < header.len() {
        match reader.read(&mut header[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Iterator over the raw records of a stream
///
/// Stops after end of stream or after yielding the first error.
pub struct RecordIter<R> {
    reader: R,
    done: bool,
}

impl<R: Read> RecordIter<R> {
    /// Wrap a reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }
}

impl<R: Read> Iterator for RecordIter<R> {
    type Item = Result<RawRecord, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match read_raw(&mut self.reader) {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
