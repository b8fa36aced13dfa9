//! Autofocus point grid rendering
//!
//! The EOS-1V has 45 AF points laid out as a diamond of five rows
//! (7, 10, 11, 10, 7 points). They are stored as an 8-byte bitmask, one
//! byte per segment, most significant bit first:
//!
//! | Byte | Segment      | Bits |
//! |-----:|--------------|-----:|
//! | 0    | top row      | 7    |
//! | 1    | upper-right  | 2    |
//! | 2    | upper-left   | 8    |
//! | 3    | middle-right | 3    |
//! | 4    | middle-left  | 8    |
//! | 5    | lower-right  | 2    |
//! | 6    | lower-left   | 8    |
//! | 7    | bottom row   | 7    |

use crate::constants::{FOCUS_POINT_BYTES, FOCUS_SEGMENT_BITS, FOCUS_SELECTION_INACTIVE};
use serde::Serialize;

/// Glyph for an active (selected) point
pub const GLYPH_ACTIVE: char = '#';

/// Glyph for an inactive point on the border of the diamond
pub const GLYPH_EDGE: char = 'o';

/// Glyph for an inactive interior point
pub const GLYPH_INTERIOR: char = '.';

/// Glyph used for every point when the AF system was inactive
pub const GLYPH_NEUTRAL: char = '-';

/// Indent of the top and bottom rows
const SHORT_ROW_INDENT: &str = "    ";

/// Segments making up each grid row, left to right
const ROW_SEGMENTS: [&[usize]; 5] = [&[0], &[2, 1], &[4, 3], &[6, 5], &[7]];

/// Classification of one AF point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FocusCell {
    /// The point was in use
    Active,
    /// Unused point on the outer border
    Edge,
    /// Unused interior point
    Interior,
    /// AF was off; the point carries no information
    Neutral,
}

impl FocusCell {
    /// Glyph of this cell
    pub const fn glyph(&self) -> char {
        match self {
            FocusCell::Active => GLYPH_ACTIVE,
            FocusCell::Edge => GLYPH_EDGE,
            FocusCell::Interior => GLYPH_INTERIOR,
            FocusCell::Neutral => GLYPH_NEUTRAL,
        }
    }
}

/// AF selection word and point bitmask of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FocusPoints {
    /// Selection word; `u32::MAX` when AF was inactive
    pub selection: u32,
    /// Point bitmask
    pub points: [u8; FOCUS_POINT_BYTES],
}

impl FocusPoints {
    /// Wrap raw focus fields
    pub fn new(selection: u32, points: [u8; FOCUS_POINT_BYTES]) -> Self {
        Self { selection, points }
    }

    /// Whether the AF system was inactive (manual focus)
    pub fn is_inactive(&self) -> bool {
        self.selection == FOCUS_SELECTION_INACTIVE
    }

    /// Number of active points (0 when AF was inactive)
    pub fn active_count(&self) -> usize {
        self.cells()
            .iter()
            .flatten()
            .filter(|c| **c == FocusCell::Active)
            .count()
    }

    /// Classified points, one vector per grid row
    pub fn cells(&self) -> Vec<Vec<FocusCell>> {
        ROW_SEGMENTS
            .iter()
            .map(|segments| {
                segments
                    .iter()
                    .flat_map(|&seg| self.segment_cells(seg))
                    .collect()
            })
            .collect()
    }

    /// Render the grid as text
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (row, cells) in self.cells().iter().enumerate() {
            if row == 0 || row == ROW_SEGMENTS.len() - 1 {
                out.push_str(SHORT_ROW_INDENT);
            }
            let glyphs: Vec<String> = cells.iter().map(|c| c.glyph().to_string()).collect();
            out.push_str(&glyphs.join(" "));
            out.push('\n');
        }
        out
    }

    fn segment_cells(&self, segment: usize) -> Vec<FocusCell> {
        let bits = FOCUS_SEGMENT_BITS[segment] as usize;
        let byte = self.points[segment];

        (0..bits)
            .map(|bit| {
                if self.is_inactive() {
                    FocusCell::Neutral
                } else if byte & (0x80 >> bit) != 0 {
                    FocusCell::Active
                } else if is_edge(segment, bit, bits) {
                    FocusCell::Edge
                } else {
                    FocusCell::Interior
                }
            })
            .collect()
    }
}

/// Whether a bit sits on the border of the diamond
fn is_edge(segment: usize, bit: usize, bits: usize) -> bool {
    match segment {
        // top and bottom rows
        0 | 7 => true,
        // left segments start at the border
        2 | 4 | 6 => bit == 0,
        // right segments end at it
        _ => bit == bits - 1,
    }
}

/// Render a selection word and bitmask as a text grid
///
/// The output depends only on the arguments. When `selection` is
/// `u32::MAX` the bitmask is ignored and a fixed neutral grid is returned.
pub fn render_focus_points(selection: u32, points: [u8; FOCUS_POINT_BYTES]) -> String {
    FocusPoints::new(selection, points).render()
}
