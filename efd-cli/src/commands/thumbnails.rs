use anyhow::{Context, Result};
use efd_core::Eftp;
use image::RgbaImage;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Convert a decoded thumbnail into an image buffer
pub fn to_image(eftp: &Eftp) -> Option<RgbaImage> {
    RgbaImage::from_raw(eftp.width as u32, eftp.height as u32, eftp.pixels.clone())
}

/// Write every thumbnail of `input` as `frame_<index>.png` into `output_dir`
///
/// Returns the written paths. Empty thumbnails are skipped.
pub fn execute(input: &str, output_dir: &str) -> Result<Vec<PathBuf>> {
    let root = super::load_root(input)?;

    let dir = Path::new(output_dir);
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir))?;

    let mut written = Vec::new();
    for eftp in root.eftps() {
        if eftp.width == 0 || eftp.height == 0 {
            warn!("Skipping empty thumbnail for frame {}", eftp.frame_index);
            continue;
        }

        let img = to_image(eftp).with_context(|| {
            format!("Thumbnail buffer size mismatch for frame {}", eftp.frame_index)
        })?;

        let path = dir.join(format!("frame_{:02}.png", eftp.frame_index));
        img.save(&path)
            .with_context(|| format!("Failed to write thumbnail: {}", path.display()))?;

        info!(
            "Wrote {}x{} thumbnail for frame {} to {}",
            eftp.width,
            eftp.height,
            eftp.frame_index,
            path.display()
        );
        written.push(path);
    }

    println!("Wrote {} thumbnails to {}", written.len(), output_dir);

    Ok(written)
}
