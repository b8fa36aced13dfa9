use crate::{DecodeOptions, ExportFormat};
use anyhow::{Context, Result};
use efd_core::{Codec, Root};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::info;

/// One exported frame: roll columns followed by the frame's display values
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportRow {
    pub film_id: String,
    pub roll_title: String,
    pub roll_loaded: String,
    pub frame: u32,
    pub taken: String,
    pub film_loaded: String,
    pub battery_loaded: String,
    pub tv: String,
    pub bulb_exposure: String,
    pub av: String,
    pub max_aperture: String,
    pub exposure_compensation: String,
    pub flash_exposure_compensation: String,
    pub iso_dx: String,
    pub iso_m: String,
    pub focal_length: String,
    pub shooting_mode: String,
    pub metering_mode: String,
    pub flash_mode: String,
    pub film_advance_mode: String,
    pub af_mode: String,
    pub multiple_exposure: String,
    pub custom_functions: String,
    pub focus_points: String,
    pub modified: bool,
    pub remarks: String,
    pub thumbnail: String,
}

/// CSV header, in field order
const CSV_HEADER: [&str; 27] = [
    "film_id",
    "roll_title",
    "roll_loaded",
    "frame",
    "taken",
    "film_loaded",
    "battery_loaded",
    "tv",
    "bulb_exposure",
    "av",
    "max_aperture",
    "exposure_compensation",
    "flash_exposure_compensation",
    "iso_dx",
    "iso_m",
    "focal_length",
    "shooting_mode",
    "metering_mode",
    "flash_mode",
    "film_advance_mode",
    "af_mode",
    "multiple_exposure",
    "custom_functions",
    "focus_points",
    "modified",
    "remarks",
    "thumbnail",
];

impl ExportRow {
    fn csv_fields(&self) -> [String; 27] {
        [
            self.film_id.clone(),
            self.roll_title.clone(),
            self.roll_loaded.clone(),
            self.frame.to_string(),
            self.taken.clone(),
            self.film_loaded.clone(),
            self.battery_loaded.clone(),
            self.tv.clone(),
            self.bulb_exposure.clone(),
            self.av.clone(),
            self.max_aperture.clone(),
            self.exposure_compensation.clone(),
            self.flash_exposure_compensation.clone(),
            self.iso_dx.clone(),
            self.iso_m.clone(),
            self.focal_length.clone(),
            self.shooting_mode.clone(),
            self.metering_mode.clone(),
            self.flash_mode.clone(),
            self.film_advance_mode.clone(),
            self.af_mode.clone(),
            self.multiple_exposure.clone(),
            self.custom_functions.clone(),
            self.focus_points.clone(),
            self.modified.to_string(),
            self.remarks.clone(),
            self.thumbnail.clone(),
        ]
    }
}

/// Decode every frame of `root` into export rows
pub fn rows(root: &Root, codec: &Codec<'_>) -> Result<Vec<ExportRow>> {
    let roll = codec
        .roll_values(root.efdf())
        .context("Failed to decode roll record")?;

    root.efrms()
        .iter()
        .map(|efrm| -> Result<ExportRow> {
            let v = codec.frame_values(efrm)?;
            // thumbnails are keyed by their declared index, not file position
            let thumbnail = u16::try_from(efrm.frame_number)
                .ok()
                .and_then(|idx| root.thumbnail_for(idx))
                .map(|t| t.filepath.clone())
                .unwrap_or_default();

            Ok(ExportRow {
                film_id: roll.film_id.to_string(),
                roll_title: roll.title.clone(),
                roll_loaded: roll.loaded.to_string(),
                frame: v.frame_number,
                taken: v.taken.to_string(),
                film_loaded: v.film_loaded.to_string(),
                battery_loaded: v.battery_loaded.to_string(),
                tv: v.tv.to_string(),
                bulb_exposure: v.bulb_exposure_time.to_string(),
                av: v.av.to_string(),
                max_aperture: v.max_aperture.to_string(),
                exposure_compensation: v.exposure_compensation.to_string(),
                flash_exposure_compensation: v.flash_exposure_compensation.to_string(),
                iso_dx: v.iso_dx.to_string(),
                iso_m: v.iso_m.to_string(),
                focal_length: v.focal_length.to_string(),
                shooting_mode: v.shooting_mode.to_string(),
                metering_mode: v.metering_mode.to_string(),
                flash_mode: v.flash_mode.to_string(),
                film_advance_mode: v.film_advance_mode.to_string(),
                af_mode: v.af_mode.to_string(),
                multiple_exposure: v.multiple_exposure.to_string(),
                custom_functions: v.custom_functions.to_string(),
                focus_points: v.focus_points.render(),
                modified: v.is_modified,
                remarks: v.remarks,
                thumbnail,
            })
        })
        .collect()
}

/// Quote a CSV field when it contains a delimiter, quote or line break
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render rows as CSV with a header line
pub fn to_csv(rows: &[ExportRow]) -> String {
    let mut out = CSV_HEADER.join(",");
    out.push('\n');
    for row in rows {
        let fields: Vec<String> = row.csv_fields().iter().map(|f| csv_escape(f)).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

pub fn execute(
    input: &str,
    output: &str,
    format: ExportFormat,
    options: &DecodeOptions,
) -> Result<()> {
    info!("Exporting {} to {} ({:?})", input, output, format);

    let root = super::load_root(input)?;
    let tables = options.load_tables()?;
    let codec = Codec::new(&tables, options.policy());

    let rows = rows(&root, &codec)?;

    let content = match format {
        ExportFormat::Json => serde_json::to_string_pretty(&rows)
            .with_context(|| "Failed to serialize export rows")?,
        ExportFormat::Csv => to_csv(&rows),
    };

    fs::write(output, content)
        .with_context(|| format!("Failed to write output file: {}", output))?;

    info!("Exported {} frames to {}", rows.len(), output);

    Ok(())
}
