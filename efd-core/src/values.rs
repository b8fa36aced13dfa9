//! Validated domain values
//!
//! Each type wraps the parsed form of one raw field. A value whose raw
//! field held its sentinel is "absent" and displays as an empty string.
//! The constructors here need no lookup tables; the table-driven values are
//! produced by [`crate::codec::Codec`].

use crate::constants::{
    BULB_ABSENT, BULB_MIN_SECONDS, CUSTOM_FUNCTION_COUNT, CUSTOM_FUNCTION_UNSET, DATE_PART_ABSENT,
    DATE_YEAR_ABSENT, FILM_ID_ABSENT, FILM_ID_PREFIX_MAX, FILM_ID_SUFFIX_MAX, FOCAL_LENGTH_ABSENT,
    ISO_ABSENT,
};
use crate::error::ValueError;
use crate::records::RawDateTime;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};
use std::fmt;

macro_rules! label_value {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
        #[serde(transparent)]
        pub struct $name(Option<String>);

        impl $name {
            pub(crate) fn new(label: Option<String>) -> Self {
                Self(label)
            }

            /// The label, or `""` when absent
            pub fn as_str(&self) -> &str {
                self.0.as_deref().unwrap_or("")
            }

            /// Whether the raw field held its sentinel
            pub fn is_absent(&self) -> bool {
                self.0.is_none()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

label_value!(
    /// Shutter speed, e.g. `1/250` or `2"5`
    Tv
);
label_value!(
    /// Aperture f-number, e.g. `5.6`
    Av
);
label_value!(
    /// Exposure compensation in stops, e.g. `+0.7`
    ExposureCompensation
);
label_value!(
    /// Flash mode
    FlashMode
);
label_value!(
    /// Metering mode
    MeteringMode
);
label_value!(
    /// Shooting (exposure) mode
    ShootingMode
);
label_value!(
    /// Film advance mode
    FilmAdvanceMode
);
label_value!(
    /// Autofocus mode
    AutoFocusMode
);
label_value!(
    /// Multiple exposure setting
    MultipleExposure
);

/// Film ID, displayed as `PP-SSS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilmId(Option<(u32, u32)>);

impl FilmId {
    /// Prefix and suffix, if recorded
    pub fn parts(&self) -> Option<(u32, u32)> {
        self.0
    }

    /// Whether the film ID was not recorded
    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for FilmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some((prefix, suffix)) => write!(f, "{:02}-{:03}", prefix, suffix),
            None => Ok(()),
        }
    }
}

/// Build a film ID from its two raw fields
pub fn film_id(prefix: u32, suffix: u32) -> Result<FilmId, ValueError> {
    if prefix == FILM_ID_ABSENT && suffix == FILM_ID_ABSENT {
        return Ok(FilmId(None));
    }
    if prefix > FILM_ID_PREFIX_MAX {
        return Err(ValueError::Bounds {
            field: "film ID prefix",
            raw: prefix,
            reason: "maximum is 99",
        });
    }
    if suffix > FILM_ID_SUFFIX_MAX {
        return Err(ValueError::Bounds {
            field: "film ID suffix",
            raw: suffix,
            reason: "maximum is 999",
        });
    }
    Ok(FilmId(Some((prefix, suffix))))
}

/// A calendar-valid date and time, displayed as `YYYY-MM-DD HH:MM:SS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidatedDateTime(Option<NaiveDateTime>);

impl ValidatedDateTime {
    /// Whether the date was not recorded
    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for ValidatedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            None => Ok(()),
        }
    }
}

/// Validate six raw date fields
///
/// All fields at their maximum, or all zero, mean "not recorded".
pub fn date_time(
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
) -> Result<ValidatedDateTime, ValueError> {
    let parts = [month, day, hour, minute, second];
    if year == DATE_YEAR_ABSENT && parts.iter().all(|&p| p == DATE_PART_ABSENT) {
        return Ok(ValidatedDateTime(None));
    }
    if year == 0 && parts.iter().all(|&p| p == 0) {
        return Ok(ValidatedDateTime(None));
    }

    let date = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32);
    let time = NaiveTime::from_hms_opt(hour as u32, minute as u32, second as u32);
    match (date, time) {
        (Some(date), Some(time)) => Ok(ValidatedDateTime(Some(date.and_time(time)))),
        _ => Err(ValueError::Date {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }),
    }
}

/// Validate a [`RawDateTime`] read from a record
pub fn raw_date_time(raw: &RawDateTime) -> Result<ValidatedDateTime, ValueError> {
    date_time(raw.year, raw.month, raw.day, raw.hour, raw.minute, raw.second)
}

/// Bulb exposure duration, displayed as `HH:MM:SS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BulbExposureTime(Option<u32>);

impl BulbExposureTime {
    /// Duration in seconds, if the frame was a bulb exposure
    pub fn seconds(&self) -> Option<u32> {
        self.0
    }
}

impl fmt::Display for BulbExposureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(secs) => write!(
                f,
                "{:02}:{:02}:{:02}",
                secs / 3600,
                (secs % 3600) / 60,
                secs % 60
            ),
            None => Ok(()),
        }
    }
}

/// Validate a bulb exposure duration
pub fn bulb_exposure_time(seconds: u32) -> Result<BulbExposureTime, ValueError> {
    if seconds == BULB_ABSENT {
        return Ok(BulbExposureTime(None));
    }
    if seconds < BULB_MIN_SECONDS {
        return Err(ValueError::Bounds {
            field: "bulb exposure time",
            raw: seconds,
            reason: "minimum is 1 second",
        });
    }
    Ok(BulbExposureTime(Some(seconds)))
}

macro_rules! number_value {
    ($(#[$meta:meta])* $name:ident, $ctor:ident, $absent:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name(Option<u32>);

        impl $name {
            /// The value, if recorded
            pub fn get(&self) -> Option<u32> {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.0 {
                    Some(v) => write!(f, "{}", v),
                    None => Ok(()),
                }
            }
        }

        #[doc = concat!("Build a [`", stringify!($name), "`] from its raw field")]
        pub fn $ctor(raw: u32) -> $name {
            if raw == $absent {
                $name(None)
            } else {
                $name(Some(raw))
            }
        }
    };
}

number_value!(
    /// Focal length in millimetres
    FocalLength,
    focal_length,
    FOCAL_LENGTH_ABSENT
);
number_value!(
    /// Film speed
    Iso,
    iso,
    ISO_ABSENT
);

/// The twenty custom function settings of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomFunctions {
    slots: [Option<u8>; CUSTOM_FUNCTION_COUNT],
}

impl CustomFunctions {
    pub(crate) fn from_raw(raw: [u8; CUSTOM_FUNCTION_COUNT]) -> Self {
        Self {
            slots: raw.map(|b| (b != CUSTOM_FUNCTION_UNSET).then_some(b)),
        }
    }

    /// Setting of one slot, `None` when unset
    pub fn get(&self, index: usize) -> Option<u8> {
        self.slots.get(index).copied().flatten()
    }

    /// Display label of one slot: `" "` when unset, else the decimal value
    pub fn label(&self, index: usize) -> String {
        match self.get(index) {
            Some(v) => v.to_string(),
            None => " ".to_string(),
        }
    }

    /// Display labels of all twenty slots
    pub fn labels(&self) -> [String; CUSTOM_FUNCTION_COUNT] {
        std::array::from_fn(|i| self.label(i))
    }
}

impl fmt::Display for CustomFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.labels().join(","))
    }
}

/// Serialize as the display string, so JSON output matches the text output
macro_rules! serialize_as_display {
    ($($name:ident),+ $(,)?) => {
        $(
            impl Serialize for $name {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }
        )+
    };
}

serialize_as_display!(
    FilmId,
    ValidatedDateTime,
    BulbExposureTime,
    FocalLength,
    Iso,
    CustomFunctions,
);
