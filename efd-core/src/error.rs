//! Error types for EFD decoding and value conversion

use thiserror::Error;

/// Errors that abort parsing of an EFD stream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Truncated or corrupt record header or payload
    #[error("Framing error: {0}")]
    Framing(String),

    /// Record magic is not one of EFDF, EFRM, EFTP
    #[error("Unknown record type: {}", String::from_utf8_lossy(.0))]
    UnknownRecordType([u8; 4]),

    /// A second EFDF record was found
    #[error("Duplicate EFDF record: a file holds exactly one roll record")]
    DuplicateEfdf,

    /// The stream ended without an EFDF record
    #[error("Missing EFDF record")]
    MissingEfdf,

    /// Payload shorter than the record layout
    #[error("{kind} payload too short: expected {expected} bytes, got {actual}")]
    FieldDecode {
        /// Record kind being decoded.
        kind: &'static str,
        /// The layout size in bytes.
        expected: usize,
        /// The payload size actually present.
        actual: usize,
    },

    /// Two thumbnails claim the same frame index
    #[error("Multiple thumbnails for frame index {0}")]
    MultipleThumbnailsForFrame(u16),

    /// Thumbnail dimensions exceed the decoder's allocation limit
    #[error("Thumbnail of {width}x{height} pixels exceeds the decoder limit")]
    ThumbnailTooLarge {
        /// Declared width.
        width: u16,
        /// Declared height.
        height: u16,
    },

    /// The caller's deadline passed at a record boundary
    #[error("Parse deadline exceeded")]
    DeadlineExceeded,

    /// IO error other than a premature end of stream
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            DecodeError::Framing(err.to_string())
        } else {
            DecodeError::Io(err.to_string())
        }
    }
}

/// Errors produced while converting raw fields into domain values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// Raw code not present in the field's lookup table
    #[error("Unrecognised {field} value: {raw}")]
    Domain {
        /// Field name.
        field: &'static str,
        /// The raw value as read from the record.
        raw: i64,
    },

    /// Custom function byte above the documented maximum for its slot
    #[error("Custom function {index} out of range: value {value} exceeds maximum {limit}")]
    CustomFunctionOutOfRange {
        /// Slot index (0-based).
        index: usize,
        /// Documented maximum for this slot.
        limit: u8,
        /// The raw value.
        value: u8,
    },

    /// The six date fields do not form a real calendar date-time
    #[error(
        "Invalid date/time: {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
    )]
    Date {
        /// Raw year.
        year: u16,
        /// Raw month.
        month: u8,
        /// Raw day.
        day: u8,
        /// Raw hour.
        hour: u8,
        /// Raw minute.
        minute: u8,
        /// Raw second.
        second: u8,
    },

    /// Value outside its field's documented bounds
    #[error("{field} out of bounds: {raw} ({reason})")]
    Bounds {
        /// Field name.
        field: &'static str,
        /// The raw value.
        raw: u32,
        /// Which bound was violated.
        reason: &'static str,
    },

    /// Lookup table document could not be loaded
    #[error("Invalid lookup tables: {0}")]
    Tables(String),

    /// A value error raised while decoding a particular frame
    #[error("Frame {frame}: {source}")]
    InFrame {
        /// Frame number from the EFRM record.
        frame: u32,
        /// The underlying error.
        #[source]
        source: Box<ValueError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_record_type_message() {
        let err = DecodeError::UnknownRecordType(*b"ABCD");
        assert_eq!(err.to_string(), "Unknown record type: ABCD");
    }

    #[test]
    fn test_eof_maps_to_framing() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        assert!(matches!(DecodeError::from(io), DecodeError::Framing(_)));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(DecodeError::from(io), DecodeError::Io(_)));
    }

    #[test]
    fn test_in_frame_message_names_frame() {
        let err = ValueError::InFrame {
            frame: 7,
            source: Box::new(ValueError::Domain {
                field: "flash mode",
                raw: 42,
            }),
        };
        assert_eq!(err.to_string(), "Frame 7: Unrecognised flash mode value: 42");
    }
}
