//! Root aggregate and the top-level parse loop

use crate::error::DecodeError;
use crate::reader::read_raw;
use crate::records::{Efdf, Efrm, Eftp, Record};
use std::collections::HashSet;
use std::io::Read;
use std::time::Instant;

#[cfg(feature = "logging")]
use tracing::debug;

/// A fully decoded EFD file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    efdf: Efdf,
    efrms: Vec<Efrm>,
    eftps: Vec<Eftp>,
}

impl Root {
    /// Roll metadata
    pub fn efdf(&self) -> &Efdf {
        &self.efdf
    }

    /// Frames in file order
    pub fn efrms(&self) -> &[Efrm] {
        &self.efrms
    }

    /// Thumbnails in file order
    pub fn eftps(&self) -> &[Eftp] {
        &self.eftps
    }

    /// Find a frame by its recorded frame number
    pub fn frame(&self, number: u32) -> Option<&Efrm> {
        self.efrms.iter().find(|f| f.frame_number == number)
    }

    /// Find the thumbnail declaring `frame_index`
    pub fn thumbnail_for(&self, frame_index: u16) -> Option<&Eftp> {
        self.eftps.iter().find(|t| t.frame_index == frame_index)
    }
}

/// Accumulates records for one parse
///
/// [`RootBuilder::build`] consumes the builder, so it cannot be reused.
#[derive(Debug, Default)]
pub struct RootBuilder {
    efdf: Option<Efdf>,
    efrms: Vec<Efrm>,
    eftps: Vec<Eftp>,
}

impl RootBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no record has been added yet
    pub fn is_empty(&self) -> bool {
        self.efdf.is_none() && self.efrms.is_empty() && self.eftps.is_empty()
    }

    /// Store the roll record; only one is allowed
    pub fn add_efdf(&mut self, efdf: Efdf) -> Result<(), DecodeError> {
        if self.efdf.is_some() {
            return Err(DecodeError::DuplicateEfdf);
        }
        self.efdf = Some(efdf);
        Ok(())
    }

    /// Append a frame record
    pub fn add_efrm(&mut self, efrm: Efrm) {
        self.efrms.push(efrm);
    }

    /// Append a thumbnail record
    pub fn add_eftp(&mut self, eftp: Eftp) {
        self.eftps.push(eftp);
    }

    /// Add any decoded record
    pub fn add(&mut self, record: Record) -> Result<(), DecodeError> {
        match record {
            Record::Efdf(r) => self.add_efdf(r)?,
            Record::Efrm(r) => self.add_efrm(r),
            Record::Eftp(r) => self.add_eftp(r),
        }
        Ok(())
    }

    /// Finish the aggregate
    pub fn build(self) -> Result<Root, DecodeError> {
        let efdf = self.efdf.ok_or(DecodeError::MissingEfdf)?;
        Ok(Root {
            efdf,
            efrms: self.efrms,
            eftps: self.eftps,
        })
    }
}

/// Options for [`parse_root_with`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Abort with [`DecodeError::DeadlineExceeded`] once this instant has
    /// passed; checked before each record
    pub deadline: Option<Instant>,
}

/// Decode a complete EFD stream
pub fn parse_root<R: Read>(reader: R) -> Result<Root, DecodeError> {
    parse_root_with(reader, &ParseOptions::default())
}

/// Decode a complete EFD stream held in memory
pub fn parse_root_from_bytes(data: &[u8]) -> Result<Root, DecodeError> {
    parse_root(std::io::Cursor::new(data))
}

/// Decode a complete EFD stream with options
///
/// Records are decoded strictly in file order and the first error aborts
/// the parse. A second thumbnail for an already-seen frame index is an
/// error.
pub fn parse_root_with<R: Read>(mut reader: R, options: &ParseOptions) -> Result<Root, DecodeError> {
    let mut builder = RootBuilder::new();
    let mut thumbnail_indices = HashSet::new();
    let mut records = 0usize;

    loop {
        if let Some(deadline) = options.deadline {
            if Instant::now() >= deadline {
                return Err(DecodeError::DeadlineExceeded);
            }
        }

        let Some(raw) = read_raw(&mut reader)? else {
            break;
        };

        let record = Record::decode(&raw)?;

        #[cfg(feature = "logging")]
        debug!(
            "Decoded {} record #{} ({} bytes)",
            record.kind().name(),
            records,
            raw.length
        );

        if let Record::Eftp(ref eftp) = record {
            if !thumbnail_indices.insert(eftp.frame_index) {
                return Err(DecodeError::MultipleThumbnailsForFrame(eftp.frame_index));
            }
        }

        builder.add(record)?;
        records += 1;
    }

    let root = builder.build()?;

    #[cfg(feature = "logging")]
    debug!(
        "Parsed {} records: {} frames, {} thumbnails",
        records,
        root.efrms.len(),
        root.eftps.len()
    );

    #[cfg(not(feature = "logging"))]
    let _ = records;

    Ok(root)
}
