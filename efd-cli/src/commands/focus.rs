use anyhow::{Context, Result};
use colored::*;
use efd_core::{FocusCell, FocusPoints, Root};

/// AF grid of one frame, optionally coloured with ANSI escapes
pub fn grid(root: &Root, frame: u32, color: bool) -> Result<String> {
    let efrm = root
        .frame(frame)
        .with_context(|| format!("Frame {} not found", frame))?;
    let points = FocusPoints::new(efrm.focus_selection, efrm.focus_points);

    if !color {
        return Ok(points.render());
    }

    let mut out = String::new();
    let rows = points.cells();
    for (i, cells) in rows.iter().enumerate() {
        if i == 0 || i == rows.len() - 1 {
            out.push_str("    ");
        }
        let glyphs: Vec<String> = cells.iter().map(paint).collect();
        out.push_str(&glyphs.join(" "));
        out.push('\n');
    }
    Ok(out)
}

fn paint(cell: &FocusCell) -> String {
    let glyph = cell.glyph().to_string();
    match cell {
        FocusCell::Active => glyph.red().bold().to_string(),
        FocusCell::Edge => glyph.normal().to_string(),
        FocusCell::Interior => glyph.dimmed().to_string(),
        FocusCell::Neutral => glyph.dimmed().to_string(),
    }
}

pub fn execute(input: &str, frame: u32, color: bool) -> Result<()> {
    let root = super::load_root(input)?;
    let efrm = root
        .frame(frame)
        .with_context(|| format!("Frame {} not found", frame))?;
    let points = FocusPoints::new(efrm.focus_selection, efrm.focus_points);

    println!("\n=== Frame {} AF points ===", frame);
    if points.is_inactive() {
        println!("AF inactive (manual focus)");
    } else {
        println!("Active points: {}", points.active_count());
    }
    print!("{}", grid(&root, frame, color)?);

    Ok(())
}
