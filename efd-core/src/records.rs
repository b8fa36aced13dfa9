//! Fixed-layout record decoders
//!
//! EFDF and EFRM payloads are plain fixed-offset little-endian fields.
//! EFTP carries a small sub-header, a filepath and packed BGR pixels.

use crate::constants::{
    BGR_PIXEL_SIZE, CUSTOM_FUNCTION_COUNT, EFDF_SIZE, EFRM_SIZE, EFTP_FIXED_SIZE,
    FOCUS_POINT_BYTES, MAX_THUMBNAIL_PIXELS, PATH_LEN, REMARKS_LEN, RGBA_PIXEL_SIZE, TITLE_LEN,
};
use crate::error::DecodeError;
use crate::reader::{RawRecord, RecordKind};
use bytes::Buf;
use serde::Serialize;

/// The six raw fields of a recorded date and time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RawDateTime {
    /// Year
    pub year: u16,
    /// Month (1-12)
    pub month: u8,
    /// Day of month
    pub day: u8,
    /// Hour (0-23)
    pub hour: u8,
    /// Minute
    pub minute: u8,
    /// Second
    pub second: u8,
}

impl RawDateTime {
    /// Read the seven date bytes (u16 year + five u8)
    fn read(buf: &mut &[u8]) -> Self {
        Self {
            year: buf.get_u16_le(),
            month: buf.get_u8(),
            day: buf.get_u8(),
            hour: buf.get_u8(),
            minute: buf.get_u8(),
            second: buf.get_u8(),
        }
    }
}

/// Roll metadata (one per file)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Efdf {
    /// Film ID prefix (0-99)
    pub film_id_prefix: u32,
    /// Film ID suffix (0-999)
    pub film_id_suffix: u32,
    /// Bytes in the first thumbnail row
    pub first_row: u8,
    /// Bytes per subsequent thumbnail row
    pub per_row: u8,
    /// Film load date
    pub loaded: RawDateTime,
    /// Number of frames exposed on the roll
    pub frame_count: u32,
    /// DX-coded film speed
    pub iso_dx: u32,
    /// Roll title
    pub title: String,
    /// Roll remarks
    pub remarks: String,
}

impl Efdf {
    /// Decode an EFDF payload
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        ensure_len(RecordKind::Efdf, payload, EFDF_SIZE)?;
        let mut buf = payload;

        let film_id_prefix = buf.get_u32_le();
        let film_id_suffix = buf.get_u32_le();
        let first_row = buf.get_u8();
        let per_row = buf.get_u8();
        let loaded = RawDateTime::read(&mut buf);
        buf.advance(3);
        let frame_count = buf.get_u32_le();
        let iso_dx = buf.get_u32_le();
        let title = read_cstr(&mut buf, TITLE_LEN);
        let remarks = read_cstr(&mut buf, REMARKS_LEN);

        Ok(Self {
            film_id_prefix,
            film_id_suffix,
            first_row,
            per_row,
            loaded,
            frame_count,
            iso_dx,
            title,
            remarks,
        })
    }
}

/// One exposed frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Efrm {
    /// Frame number on the roll
    pub frame_number: u32,
    /// Focal length in millimetres
    pub focal_length: u32,
    /// Maximum aperture code of the lens
    pub max_aperture: u32,
    /// Shutter speed code
    pub tv: u32,
    /// Bulb exposure duration in seconds
    pub bulb_exposure_seconds: u32,
    /// Aperture code
    pub av: u32,
    /// Exposure compensation in tenths of a stop
    pub exposure_compensation: i32,
    /// Flash exposure compensation in tenths of a stop
    pub flash_exposure_compensation: i32,
    /// DX-coded film speed
    pub iso_dx: u32,
    /// Manually set film speed
    pub iso_m: u32,
    /// Flash mode code
    pub flash_mode: u8,
    /// Metering mode code
    pub metering_mode: u8,
    /// Shooting mode code
    pub shooting_mode: u8,
    /// Film advance mode code
    pub film_advance_mode: u8,
    /// Autofocus mode code
    pub af_mode: u8,
    /// Multiple exposure code
    pub multiple_exposure: u8,
    /// Whether the user edited this frame's data
    pub is_modified: bool,
    /// When the film was loaded
    pub film_loaded: RawDateTime,
    /// When the frame was taken
    pub taken: RawDateTime,
    /// When the battery was loaded
    pub battery_loaded: RawDateTime,
    /// Custom function settings
    pub custom_functions: [u8; CUSTOM_FUNCTION_COUNT],
    /// Autofocus point bitmask
    pub focus_points: [u8; FOCUS_POINT_BYTES],
    /// Autofocus selection word
    pub focus_selection: u32,
    /// Frame remarks
    pub remarks: String,
}

impl Efrm {
    /// Decode an EFRM payload
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        ensure_len(RecordKind::Efrm, payload, EFRM_SIZE)?;
        let mut buf = payload;

        let frame_number = buf.get_u32_le();
        let focal_length = buf.get_u32_le();
        let max_aperture = buf.get_u32_le();
        let tv = buf.get_u32_le();
        let bulb_exposure_seconds = buf.get_u32_le();
        let av = buf.get_u32_le();
        let exposure_compensation = buf.get_i32_le();
        let flash_exposure_compensation = buf.get_i32_le();
        let iso_dx = buf.get_u32_le();
        let iso_m = buf.get_u32_le();
        let flash_mode = buf.get_u8();
        let metering_mode = buf.get_u8();
        let shooting_mode = buf.get_u8();
        let film_advance_mode = buf.get_u8();
        let af_mode = buf.get_u8();
        let multiple_exposure = buf.get_u8();
        let is_modified = buf.get_u8() != 0;
        buf.advance(1);

        let film_loaded = RawDateTime::read(&mut buf);
        buf.advance(1);
        let taken = RawDateTime::read(&mut buf);
        buf.advance(1);
        let battery_loaded = RawDateTime::read(&mut buf);
        buf.advance(1);

        let mut custom_functions = [0u8; CUSTOM_FUNCTION_COUNT];
        buf.copy_to_slice(&mut custom_functions);
        let mut focus_points = [0u8; FOCUS_POINT_BYTES];
        buf.copy_to_slice(&mut focus_points);
        let focus_selection = buf.get_u32_le();
        let remarks = read_cstr(&mut buf, REMARKS_LEN);

        Ok(Self {
            frame_number,
            focal_length,
            max_aperture,
            tv,
            bulb_exposure_seconds,
            av,
            exposure_compensation,
            flash_exposure_compensation,
            iso_dx,
            iso_m,
            flash_mode,
            metering_mode,
            shooting_mode,
            film_advance_mode,
            af_mode,
            multiple_exposure,
            is_modified,
            film_loaded,
            taken,
            battery_loaded,
            custom_functions,
            focus_points,
            focus_selection,
            remarks,
        })
    }
}

/// Embedded thumbnail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Eftp {
    /// Index of the frame this thumbnail belongs to
    pub frame_index: u16,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Source filepath recorded by the capture software
    pub filepath: String,
    /// RGBA8 pixels, row-major, `width * height * 4` bytes
    #[serde(skip)]
    pub pixels: Vec<u8>,
}

impl Eftp {
    /// Decode an EFTP payload
    ///
    /// A pixel payload shorter than `width * height` triples is not an
    /// error: the missing pixels stay fully transparent.
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        ensure_len(RecordKind::Eftp, payload, EFTP_FIXED_SIZE)?;
        let mut buf = payload;

        let frame_index = buf.get_u16_le();
        buf.advance(2);
        let width = buf.get_u16_le();
        let height = buf.get_u16_le();
        buf.advance(8);
        let filepath = read_cstr(&mut buf, PATH_LEN);

        let pixel_count = width as usize * height as usize;
        if pixel_count > MAX_THUMBNAIL_PIXELS {
            return Err(DecodeError::ThumbnailTooLarge { width, height });
        }

        let mut pixels = vec![0u8; pixel_count * RGBA_PIXEL_SIZE];
        for (idx, bgr) in buf
            .chunks_exact(BGR_PIXEL_SIZE)
            .take(pixel_count)
            .enumerate()
        {
            // both buffers are row-major, so triple `idx` is pixel `idx`
            let at = idx * RGBA_PIXEL_SIZE;
            pixels[at] = bgr[2];
            pixels[at + 1] = bgr[1];
            pixels[at + 2] = bgr[0];
            pixels[at + 3] = u8::MAX;
        }

        Ok(Self {
            frame_index,
            width,
            height,
            filepath,
            pixels,
        })
    }

    /// RGBA value of the pixel at `(x, y)`, if inside the image
    pub fn pixel(&self, x: u16, y: u16) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y as usize * self.width as usize + x as usize) * RGBA_PIXEL_SIZE;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[at..at + RGBA_PIXEL_SIZE]);
        Some(rgba)
    }
}

/// A decoded record of any kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Roll metadata
    Efdf(Efdf),
    /// One frame
    Efrm(Efrm),
    /// One thumbnail
    Eftp(Eftp),
}

impl Record {
    /// Decode a raw record according to its magic
    pub fn decode(raw: &RawRecord) -> Result<Self, DecodeError> {
        match raw.kind()? {
            RecordKind::Efdf => Efdf::decode(&raw.data).map(Record::Efdf),
            RecordKind::Efrm => Efrm::decode(&raw.data).map(Record::Efrm),
            RecordKind::Eftp => Eftp::decode(&raw.data).map(Record::Eftp),
        }
    }

    /// Kind of this record
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Efdf(_) => RecordKind::Efdf,
            Record::Efrm(_) => RecordKind::Efrm,
            Record::Eftp(_) => RecordKind::Eftp,
        }
    }
}

fn ensure_len(kind: RecordKind, payload: &[u8], expected: usize) -> Result<(), DecodeError> {
    if payload.len() < expected {
        return Err(DecodeError::FieldDecode {
            kind: kind.name(),
            expected,
            actual: payload.len(),
        });
    }
    Ok(())
}

/// Read a fixed-size NUL-terminated string field
fn read_cstr(buf: &mut &[u8], len: usize) -> String {
    let field = &buf[..len];
    let end = field.iter().position(|&b| b == 0).unwrap_or(len);
    let text = String::from_utf8_lossy(&field[..end]).into_owned();
    buf.advance(len);
    text
}
