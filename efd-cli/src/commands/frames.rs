use crate::DecodeOptions;
use anyhow::Result;
use colored::*;
use efd_core::{Codec, FrameValues, Root};
use std::fmt::Write;

/// Column headers of the frame table
const HEADERS: [&str; 11] = [
    "#", "Taken", "Tv", "Av", "Comp", "ISO", "Focal", "Mode", "Metering", "Flash", "AF",
];

fn cells(values: &FrameValues) -> [String; 11] {
    let tv = if values.bulb_exposure_time.seconds().is_some() {
        format!("{} ({})", values.tv, values.bulb_exposure_time)
    } else {
        values.tv.to_string()
    };

    // manual ISO wins over the DX code when both are recorded
    let iso = if values.iso_m.get().is_some() {
        values.iso_m.to_string()
    } else {
        values.iso_dx.to_string()
    };

    let focal = match values.focal_length.get() {
        Some(mm) => format!("{}mm", mm),
        None => String::new(),
    };

    [
        values.frame_number.to_string(),
        values.taken.to_string(),
        tv,
        values.av.to_string(),
        values.exposure_compensation.to_string(),
        iso,
        focal,
        values.shooting_mode.to_string(),
        values.metering_mode.to_string(),
        values.flash_mode.to_string(),
        values.af_mode.to_string(),
    ]
}

/// Decode every frame and lay the values out as an aligned text table
///
/// Frames whose data was edited by the user are marked with `*`.
pub fn table(root: &Root, codec: &Codec<'_>) -> Result<String> {
    let mut rows = Vec::with_capacity(root.efrms().len());
    let mut modified = Vec::with_capacity(root.efrms().len());
    for efrm in root.efrms() {
        let values = codec.frame_values(efrm)?;
        modified.push(values.is_modified);
        rows.push(cells(&values));
    }

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_row(&mut out, &HEADERS.map(String::from), &widths, false)?;
    for (row, is_modified) in rows.iter().zip(modified) {
        write_row(&mut out, row, &widths, is_modified)?;
    }
    Ok(out)
}

fn write_row(out: &mut String, row: &[String], widths: &[usize], modified: bool) -> Result<()> {
    let line: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    let marker = if modified { "*" } else { " " };
    writeln!(out, "{}{}", marker, line.join("  ").trim_end())?;
    Ok(())
}

pub fn execute(input: &str, options: &DecodeOptions) -> Result<()> {
    let root = super::load_root(input)?;
    let tables = options.load_tables()?;
    let codec = Codec::new(&tables, options.policy());

    if root.efrms().is_empty() {
        println!("{} No frames recorded", "!".yellow());
        return Ok(());
    }

    print!("{}", table(&root, &codec)?);

    Ok(())
}
