//! Lookup tables for the domain value codec
//!
//! The tables are data, not code: they ship as an embedded JSON document
//! and are parsed once into an immutable [`LookupTables`]. The codec borrows
//! them, so one instance can be shared by any number of callers.

use crate::constants::CUSTOM_FUNCTION_COUNT;
use crate::error::ValueError;
use serde::Deserialize;
use std::collections::HashMap;

/// The lookup document compiled into the crate
pub const EMBEDDED_TABLES: &str = include_str!("tables.json");

/// A code → label table for one field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeTable {
    labels: HashMap<i64, String>,
}

impl CodeTable {
    fn from_pairs(field: &str, pairs: Vec<(i64, String)>) -> Result<Self, ValueError> {
        let mut labels = HashMap::with_capacity(pairs.len());
        for (code, label) in pairs {
            if labels.insert(code, label).is_some() {
                return Err(ValueError::Tables(format!(
                    "duplicate code {} in {} table",
                    code, field
                )));
            }
        }
        Ok(Self { labels })
    }

    /// Label for a raw code
    pub fn get(&self, code: i64) -> Option<&str> {
        self.labels.get(&code).map(String::as_str)
    }

    /// Number of codes in the table
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the table has no codes
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// On-disk shape of the lookup document
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TablesDocument {
    tv: Vec<(i64, String)>,
    av: Vec<(i64, String)>,
    exposure_compensation: Vec<(i64, String)>,
    flash_mode: Vec<(i64, String)>,
    metering_mode: Vec<(i64, String)>,
    shooting_mode: Vec<(i64, String)>,
    film_advance_mode: Vec<(i64, String)>,
    af_mode: Vec<(i64, String)>,
    multiple_exposure: Vec<(i64, String)>,
    custom_function_limits: Vec<u8>,
}

/// Immutable lookup tables for every table-driven field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTables {
    /// Shutter speed labels
    pub tv: CodeTable,
    /// Aperture labels (also used for maximum aperture)
    pub av: CodeTable,
    /// Exposure compensation labels (also used for flash exposure compensation)
    pub exposure_compensation: CodeTable,
    /// Flash mode labels
    pub flash_mode: CodeTable,
    /// Metering mode labels
    pub metering_mode: CodeTable,
    /// Shooting mode labels
    pub shooting_mode: CodeTable,
    /// Film advance mode labels
    pub film_advance_mode: CodeTable,
    /// Autofocus mode labels
    pub af_mode: CodeTable,
    /// Multiple exposure labels
    pub multiple_exposure: CodeTable,
    /// Highest legal value per custom function slot
    pub custom_function_limits: [u8; CUSTOM_FUNCTION_COUNT],
}

impl LookupTables {
    /// Parse the tables compiled into the crate
    pub fn embedded() -> Result<Self, ValueError> {
        Self::from_json(EMBEDDED_TABLES)
    }

    /// Parse a lookup document
    pub fn from_json(json: &str) -> Result<Self, ValueError> {
        let doc: TablesDocument =
            serde_json::from_str(json).map_err(|e| ValueError::Tables(e.to_string()))?;

        let custom_function_limits: [u8; CUSTOM_FUNCTION_COUNT] = doc
            .custom_function_limits
            .try_into()
            .map_err(|v: Vec<u8>| {
                ValueError::Tables(format!(
                    "custom_function_limits needs {} entries, found {}",
                    CUSTOM_FUNCTION_COUNT,
                    v.len()
                ))
            })?;

        Ok(Self {
            tv: CodeTable::from_pairs("tv", doc.tv)?,
            av: CodeTable::from_pairs("av", doc.av)?,
            exposure_compensation: CodeTable::from_pairs(
                "exposure_compensation",
                doc.exposure_compensation,
            )?,
            flash_mode: CodeTable::from_pairs("flash_mode", doc.flash_mode)?,
            metering_mode: CodeTable::from_pairs("metering_mode", doc.metering_mode)?,
            shooting_mode: CodeTable::from_pairs("shooting_mode", doc.shooting_mode)?,
            film_advance_mode: CodeTable::from_pairs("film_advance_mode", doc.film_advance_mode)?,
            af_mode: CodeTable::from_pairs("af_mode", doc.af_mode)?,
            multiple_exposure: CodeTable::from_pairs("multiple_exposure", doc.multiple_exposure)?,
            custom_function_limits,
        })
    }
}
