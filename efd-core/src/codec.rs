//! Table-driven domain value codec
//!
//! Every decode follows the same order: a raw value equal to the field's
//! sentinel is absent (no lookup, no error); otherwise the value is looked
//! up in the field's table. What happens on a miss depends on the field:
//!
//! - open-domain fields (Tv, Av, exposure compensation) fall back to a
//!   synthesized label under [`DecodePolicy::Lenient`] and fail under
//!   [`DecodePolicy::Strict`];
//! - closed enumerations (flash, metering, shooting, film advance, AF,
//!   multiple exposure) always fail. Their lookups do not consult the
//!   policy at all.

use crate::constants::{
    AV_ABSENT, CUSTOM_FUNCTION_COUNT, CUSTOM_FUNCTION_UNSET, EXPOSURE_COMPENSATION_ABSENT,
    MODE_ABSENT, TV_ABSENT,
};
use crate::error::ValueError;
use crate::focus::FocusPoints;
use crate::records::{Efdf, Efrm};
use crate::tables::{CodeTable, LookupTables};
use crate::values::{
    bulb_exposure_time, film_id, focal_length, iso, raw_date_time, AutoFocusMode, Av,
    BulbExposureTime, CustomFunctions, ExposureCompensation, FilmAdvanceMode, FilmId, FlashMode,
    FocalLength, Iso, MeteringMode, MultipleExposure, ShootingMode, Tv, ValidatedDateTime,
};
use serde::Serialize;

/// How unrecognised codes in open-domain fields are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Reject codes missing from the tables and out-of-range custom functions
    Strict,
    /// Render unknown codes as a best-effort string
    #[default]
    Lenient,
}

/// Decodes raw fields using a borrowed set of lookup tables
#[derive(Debug, Clone, Copy)]
pub struct Codec<'t> {
    tables: &'t LookupTables,
    policy: DecodePolicy,
}

impl<'t> Codec<'t> {
    /// Create a codec over `tables`
    pub fn new(tables: &'t LookupTables, policy: DecodePolicy) -> Self {
        Self { tables, policy }
    }

    /// Shutter speed; unknown codes fall back to the decimal code
    pub fn tv(&self, raw: u32) -> Result<Tv, ValueError> {
        if raw == TV_ABSENT {
            return Ok(Tv::new(None));
        }
        self.open_lookup(&self.tables.tv, "Tv", raw as i64, || raw.to_string())
            .map(|label| Tv::new(Some(label)))
    }

    /// Aperture; unknown codes fall back to the decimal code
    pub fn av(&self, raw: u32) -> Result<Av, ValueError> {
        self.aperture("Av", raw)
    }

    /// Lens maximum aperture, decoded with the aperture table
    pub fn max_aperture(&self, raw: u32) -> Result<Av, ValueError> {
        self.aperture("max aperture", raw)
    }

    fn aperture(&self, field: &'static str, raw: u32) -> Result<Av, ValueError> {
        if raw == AV_ABSENT {
            return Ok(Av::new(None));
        }
        self.open_lookup(&self.tables.av, field, raw as i64, || raw.to_string())
            .map(|label| Av::new(Some(label)))
    }

    /// Exposure compensation in tenths of a stop
    ///
    /// Unknown codes fall back to `raw / 10` with an explicit sign.
    pub fn exposure_compensation(&self, raw: i32) -> Result<ExposureCompensation, ValueError> {
        self.compensation("exposure compensation", raw)
    }

    /// Flash exposure compensation, same rule as exposure compensation
    pub fn flash_exposure_compensation(
        &self,
        raw: i32,
    ) -> Result<ExposureCompensation, ValueError> {
        self.compensation("flash exposure compensation", raw)
    }

    fn compensation(
        &self,
        field: &'static str,
        raw: i32,
    ) -> Result<ExposureCompensation, ValueError> {
        if raw == EXPOSURE_COMPENSATION_ABSENT {
            return Ok(ExposureCompensation::new(None));
        }
        self.open_lookup(&self.tables.exposure_compensation, field, raw as i64, || {
            signed_tenths(raw)
        })
        .map(|label| ExposureCompensation::new(Some(label)))
    }

    /// Flash mode
    pub fn flash_mode(&self, raw: u8) -> Result<FlashMode, ValueError> {
        closed_lookup(&self.tables.flash_mode, "flash mode", raw).map(FlashMode::new)
    }

    /// Metering mode
    pub fn metering_mode(&self, raw: u8) -> Result<MeteringMode, ValueError> {
        closed_lookup(&self.tables.metering_mode, "metering mode", raw).map(MeteringMode::new)
    }

    /// Shooting mode
    pub fn shooting_mode(&self, raw: u8) -> Result<ShootingMode, ValueError> {
        closed_lookup(&self.tables.shooting_mode, "shooting mode", raw).map(ShootingMode::new)
    }

    /// Film advance mode
    pub fn film_advance_mode(&self, raw: u8) -> Result<FilmAdvanceMode, ValueError> {
        closed_lookup(&self.tables.film_advance_mode, "film advance mode", raw)
            .map(FilmAdvanceMode::new)
    }

    /// Autofocus mode
    pub fn af_mode(&self, raw: u8) -> Result<AutoFocusMode, ValueError> {
        closed_lookup(&self.tables.af_mode, "AF mode", raw).map(AutoFocusMode::new)
    }

    /// Multiple exposure setting
    pub fn multiple_exposure(&self, raw: u8) -> Result<MultipleExposure, ValueError> {
        closed_lookup(&self.tables.multiple_exposure, "multiple exposure", raw)
            .map(MultipleExposure::new)
    }

    /// Custom function settings
    ///
    /// Unset slots (0xFF) are skipped; under [`DecodePolicy::Strict`] every
    /// other slot must not exceed its documented maximum.
    pub fn custom_functions(
        &self,
        raw: [u8; CUSTOM_FUNCTION_COUNT],
    ) -> Result<CustomFunctions, ValueError> {
        if self.policy == DecodePolicy::Strict {
            let limits = &self.tables.custom_function_limits;
            for (index, (&value, &limit)) in raw.iter().zip(limits.iter()).enumerate() {
                if value != CUSTOM_FUNCTION_UNSET && value > limit {
                    return Err(ValueError::CustomFunctionOutOfRange {
                        index,
                        limit,
                        value,
                    });
                }
            }
        }
        Ok(CustomFunctions::from_raw(raw))
    }

    /// Decode every field of a frame
    ///
    /// Errors are tagged with the frame number.
    pub fn frame_values(&self, efrm: &Efrm) -> Result<FrameValues, ValueError> {
        self.decode_frame(efrm).map_err(|e| ValueError::InFrame {
            frame: efrm.frame_number,
            source: Box::new(e),
        })
    }

    fn decode_frame(&self, efrm: &Efrm) -> Result<FrameValues, ValueError> {
        Ok(FrameValues {
            frame_number: efrm.frame_number,
            film_loaded: raw_date_time(&efrm.film_loaded)?,
            taken: raw_date_time(&efrm.taken)?,
            battery_loaded: raw_date_time(&efrm.battery_loaded)?,
            tv: self.tv(efrm.tv)?,
            bulb_exposure_time: bulb_exposure_time(efrm.bulb_exposure_seconds)?,
            av: self.av(efrm.av)?,
            max_aperture: self.max_aperture(efrm.max_aperture)?,
            exposure_compensation: self.exposure_compensation(efrm.exposure_compensation)?,
            flash_exposure_compensation: self
                .flash_exposure_compensation(efrm.flash_exposure_compensation)?,
            iso_dx: iso(efrm.iso_dx),
            iso_m: iso(efrm.iso_m),
            focal_length: focal_length(efrm.focal_length),
            flash_mode: self.flash_mode(efrm.flash_mode)?,
            metering_mode: self.metering_mode(efrm.metering_mode)?,
            shooting_mode: self.shooting_mode(efrm.shooting_mode)?,
            film_advance_mode: self.film_advance_mode(efrm.film_advance_mode)?,
            af_mode: self.af_mode(efrm.af_mode)?,
            multiple_exposure: self.multiple_exposure(efrm.multiple_exposure)?,
            custom_functions: self.custom_functions(efrm.custom_functions)?,
            focus_points: FocusPoints::new(efrm.focus_selection, efrm.focus_points),
            is_modified: efrm.is_modified,
            remarks: efrm.remarks.clone(),
        })
    }

    /// Decode every field of the roll record
    pub fn roll_values(&self, efdf: &Efdf) -> Result<RollValues, ValueError> {
        Ok(RollValues {
            film_id: film_id(efdf.film_id_prefix, efdf.film_id_suffix)?,
            loaded: raw_date_time(&efdf.loaded)?,
            frame_count: efdf.frame_count,
            iso_dx: iso(efdf.iso_dx),
            title: efdf.title.clone(),
            remarks: efdf.remarks.clone(),
        })
    }

    fn open_lookup(
        &self,
        table: &CodeTable,
        field: &'static str,
        raw: i64,
        fallback: impl FnOnce() -> String,
    ) -> Result<String, ValueError> {
        match (table.get(raw), self.policy) {
            (Some(label), _) => Ok(label.to_string()),
            (None, DecodePolicy::Lenient) => Ok(fallback()),
            (None, DecodePolicy::Strict) => Err(ValueError::Domain { field, raw }),
        }
    }
}

/// Lookup for closed enumerations; a miss is always an error
fn closed_lookup(
    table: &CodeTable,
    field: &'static str,
    raw: u8,
) -> Result<Option<String>, ValueError> {
    if raw == MODE_ABSENT {
        return Ok(None);
    }
    table
        .get(raw as i64)
        .map(|label| Some(label.to_string()))
        .ok_or(ValueError::Domain {
            field,
            raw: raw as i64,
        })
}

/// Format tenths of a stop with an explicit sign, e.g. `+0.5`, `-1.2`
fn signed_tenths(raw: i32) -> String {
    let sign = if raw < 0 { '-' } else { '+' };
    let abs = raw.unsigned_abs();
    format!("{}{}.{}", sign, abs / 10, abs % 10)
}

/// Display-ready values of one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameValues {
    /// Frame number
    pub frame_number: u32,
    /// Film load date
    pub film_loaded: ValidatedDateTime,
    /// Exposure date
    pub taken: ValidatedDateTime,
    /// Battery load date
    pub battery_loaded: ValidatedDateTime,
    /// Shutter speed
    pub tv: Tv,
    /// Bulb duration
    pub bulb_exposure_time: BulbExposureTime,
    /// Aperture
    pub av: Av,
    /// Lens maximum aperture
    pub max_aperture: Av,
    /// Exposure compensation
    pub exposure_compensation: ExposureCompensation,
    /// Flash exposure compensation
    pub flash_exposure_compensation: ExposureCompensation,
    /// DX-coded ISO
    pub iso_dx: Iso,
    /// Manual ISO
    pub iso_m: Iso,
    /// Focal length
    pub focal_length: FocalLength,
    /// Flash mode
    pub flash_mode: FlashMode,
    /// Metering mode
    pub metering_mode: MeteringMode,
    /// Shooting mode
    pub shooting_mode: ShootingMode,
    /// Film advance mode
    pub film_advance_mode: FilmAdvanceMode,
    /// AF mode
    pub af_mode: AutoFocusMode,
    /// Multiple exposure
    pub multiple_exposure: MultipleExposure,
    /// Custom functions
    pub custom_functions: CustomFunctions,
    /// AF points
    pub focus_points: FocusPoints,
    /// User-modified flag
    pub is_modified: bool,
    /// Remarks
    pub remarks: String,
}

/// Display-ready values of the roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollValues {
    /// Film ID
    pub film_id: FilmId,
    /// Film load date
    pub loaded: ValidatedDateTime,
    /// Frames on the roll
    pub frame_count: u32,
    /// DX-coded ISO
    pub iso_dx: Iso,
    /// Title
    pub title: String,
    /// Remarks
    pub remarks: String,
}
