//! # EFD Core
//!
//! Decoder for the Canon EOS-1V "EFD" metadata container.
//!
//! ## Modules
//!
//! - `constants`: Record magics, layout sizes and per-field sentinels
//! - `reader`: Record framing (magic + length + payload)
//! - `records`: Fixed-layout EFDF / EFRM / EFTP decoders
//! - `root`: Root aggregate, builder and the `parse_root` entry points
//! - `tables`: Embedded lookup tables
//! - `values`: Validated domain value types
//! - `codec`: Table-driven value decoding with a strict/lenient policy
//! - `focus`: 45-point AF grid rendering

#![warn(missing_docs)]

pub mod codec;
pub mod constants;
pub mod error;
pub mod focus;
pub mod reader;
pub mod records;
pub mod root;
pub mod tables;
pub mod values;

// Re-export commonly used types
pub use codec::{Codec, DecodePolicy, FrameValues, RollValues};
pub use error::{DecodeError, ValueError};
pub use focus::{render_focus_points, FocusCell, FocusPoints};
pub use reader::{read_raw, RawRecord, RecordIter, RecordKind};
pub use records::{Efdf, Efrm, Eftp, RawDateTime, Record};
pub use root::{parse_root, parse_root_from_bytes, parse_root_with, ParseOptions, Root, RootBuilder};
pub use tables::LookupTables;
pub use values::{
    bulb_exposure_time, date_time, film_id, focal_length, iso, FilmId, ValidatedDateTime,
};

/// Result type alias for EFD decoding
pub type Result<T> = core::result::Result<T, DecodeError>;
