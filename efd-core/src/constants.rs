//! Constants for the EFD container format
//!
//! Record magics, fixed layout sizes, and the per-field "not recorded"
//! sentinels. Sentinels are kept per field on purpose: each field uses
//! exactly the value listed here and nothing else means "absent".

/// Magic of the roll metadata record
pub const EFDF_MAGIC: &[u8; 4] = b"EFDF";

/// Magic of a frame record
pub const EFRM_MAGIC: &[u8; 4] = b"EFRM";

/// Magic of a thumbnail record
pub const EFTP_MAGIC: &[u8; 4] = b"EFTP";

/// Record header: magic (4) + reserved (4) + total length (8, little-endian)
pub const RECORD_HEADER_SIZE: usize = 16;

/// Size of the EFDF payload layout in bytes
pub const EFDF_SIZE: usize = 348;

/// Size of the EFRM payload layout in bytes
pub const EFRM_SIZE: usize = 360;

/// Size of the EFTP sub-header in bytes
pub const EFTP_SUBHEADER_SIZE: usize = 16;

/// Size of the fixed part of an EFTP payload (sub-header + filepath)
pub const EFTP_FIXED_SIZE: usize = EFTP_SUBHEADER_SIZE + PATH_LEN;

/// Roll title field length
pub const TITLE_LEN: usize = 64;

/// Remarks field length (EFDF and EFRM)
pub const REMARKS_LEN: usize = 256;

/// Thumbnail filepath field length
pub const PATH_LEN: usize = 256;

/// Number of custom function slots per frame
pub const CUSTOM_FUNCTION_COUNT: usize = 20;

/// Number of bytes in the autofocus point bitmask
pub const FOCUS_POINT_BYTES: usize = 8;

/// Bytes per stored thumbnail pixel (B, G, R)
pub const BGR_PIXEL_SIZE: usize = 3;

/// Bytes per decoded thumbnail pixel (R, G, B, A)
pub const RGBA_PIXEL_SIZE: usize = 4;

/// Largest thumbnail (in pixels) the decoder will allocate
pub const MAX_THUMBNAIL_PIXELS: usize = 4096 * 4096;

/// Film ID prefix upper bound
pub const FILM_ID_PREFIX_MAX: u32 = 99;

/// Film ID suffix upper bound
pub const FILM_ID_SUFFIX_MAX: u32 = 999;

/// Film ID prefix and suffix are both this value when not recorded
pub const FILM_ID_ABSENT: u32 = u32::MAX;

/// Year of a date that was not recorded (with every other field at [`DATE_PART_ABSENT`])
pub const DATE_YEAR_ABSENT: u16 = u16::MAX;

/// Month/day/hour/minute/second of a date that was not recorded
pub const DATE_PART_ABSENT: u8 = u8::MAX;

/// Shutter speed code when not recorded
pub const TV_ABSENT: u32 = u32::MAX;

/// Aperture code (Av and max aperture) when not recorded
pub const AV_ABSENT: u32 = u32::MAX;

/// Exposure compensation and flash exposure compensation when not recorded
pub const EXPOSURE_COMPENSATION_ABSENT: i32 = -1;

/// Focal length when not recorded
pub const FOCAL_LENGTH_ABSENT: u32 = u32::MAX;

/// ISO (DX and manual) when not recorded
pub const ISO_ABSENT: u32 = u32::MAX;

/// Bulb exposure seconds when the frame was not a bulb exposure
pub const BULB_ABSENT: u32 = u32::MAX;

/// Shortest bulb exposure the camera records, in seconds
pub const BULB_MIN_SECONDS: u32 = 1;

/// Mode bytes (flash, metering, shooting, film advance, AF, multiple exposure) when not recorded
pub const MODE_ABSENT: u8 = 0xFF;

/// Custom function slot that was never set
pub const CUSTOM_FUNCTION_UNSET: u8 = 0xFF;

/// Focus selection word when the AF system was inactive (manual focus)
pub const FOCUS_SELECTION_INACTIVE: u32 = u32::MAX;

/// Significant bits per focus point byte, most significant bit first
///
/// Byte order: top row, upper-right, upper-left, middle-right, middle-left,
/// lower-right, lower-left, bottom row.
pub const FOCUS_SEGMENT_BITS: [u8; FOCUS_POINT_BYTES] = [7, 2, 8, 3, 8, 2, 8, 7];

/// Total number of autofocus points
pub const FOCUS_POINT_COUNT: usize = 45;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_segments_cover_all_points() {
        let total: usize = FOCUS_SEGMENT_BITS.iter().map(|&b| b as usize).sum();
        assert_eq!(total, FOCUS_POINT_COUNT);
    }

    #[test]
    fn test_exposure_sentinel_matches_all_bits_set() {
        assert_eq!(EXPOSURE_COMPENSATION_ABSENT as u32, u32::MAX);
    }
}
