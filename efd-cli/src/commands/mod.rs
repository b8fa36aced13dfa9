//! Subcommand implementations

pub mod export;
pub mod focus;
pub mod frames;
pub mod info;
pub mod thumbnails;

use anyhow::{Context, Result};
use efd_core::{parse_root, Root};
use std::fs::File;
use std::io::{self, BufReader, Read};
use tracing::info;

/// Parse an EFD file, or stdin when `input` is "-"
pub fn load_root(input: &str) -> Result<Root> {
    let root = if input == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        efd_core::parse_root_from_bytes(&buf)
    } else {
        let file =
            File::open(input).with_context(|| format!("Failed to open input file: {}", input))?;
        parse_root(BufReader::new(file))
    }
    .with_context(|| format!("Failed to decode EFD file: {}", input))?;

    info!(
        "Loaded {}: {} frames, {} thumbnails",
        input,
        root.efrms().len(),
        root.eftps().len()
    );

    Ok(root)
}
