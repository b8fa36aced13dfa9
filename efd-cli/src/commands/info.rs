use crate::DecodeOptions;
use anyhow::{Context, Result};
use efd_core::{Codec, Root};
use std::fmt::Write;

/// Roll summary as printed by `efd info`
pub fn summary(root: &Root, codec: &Codec<'_>) -> Result<String> {
    let roll = codec
        .roll_values(root.efdf())
        .context("Failed to decode roll record")?;

    let modified = root.efrms().iter().filter(|f| f.is_modified).count();

    let mut out = String::new();
    writeln!(out, "=== Roll ===")?;
    writeln!(out, "Film ID:           {}", roll.film_id)?;
    writeln!(out, "Title:             {}", roll.title)?;
    writeln!(out, "Loaded:            {}", roll.loaded)?;
    writeln!(out, "Frame count:       {}", roll.frame_count)?;
    writeln!(out, "ISO (DX):          {}", roll.iso_dx)?;
    writeln!(out, "Remarks:           {}", roll.remarks)?;
    writeln!(out)?;
    writeln!(out, "=== Records ===")?;
    writeln!(out, "Frames:            {}", root.efrms().len())?;
    writeln!(out, "Thumbnails:        {}", root.eftps().len())?;
    writeln!(out, "Modified frames:   {}", modified)?;

    Ok(out)
}

pub fn execute(input: &str, options: &DecodeOptions) -> Result<()> {
    let root = super::load_root(input)?;
    let tables = options.load_tables()?;
    let codec = Codec::new(&tables, options.policy());

    print!("{}", summary(&root, &codec)?);

    Ok(())
}
