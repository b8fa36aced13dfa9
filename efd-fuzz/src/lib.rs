//! Fuzz entry points for efd-core
//!
//! Each function takes arbitrary bytes and must never panic. They are
//! shaped for `cargo fuzz` targets:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Wrap a function in a `fuzz_target!` and run `cargo fuzz run <target>`

use efd_core::{
    parse_root_from_bytes, read_raw, render_focus_points, Codec, DecodePolicy, LookupTables,
    Record,
};

/// Parse a whole file and decode every value leniently and strictly
pub fn fuzz_parse(data: &[u8]) {
    let Ok(root) = parse_root_from_bytes(data) else {
        return;
    };
    let Ok(tables) = LookupTables::embedded() else {
        return;
    };

    for policy in [DecodePolicy::Lenient, DecodePolicy::Strict] {
        let codec = Codec::new(&tables, policy);
        let _ = codec.roll_values(root.efdf());
        for efrm in root.efrms() {
            let _ = codec.frame_values(efrm);
        }
    }
}

/// Frame and decode records one at a time
pub fn fuzz_read_raw(data: &[u8]) {
    let mut reader = data;
    while let Ok(Some(raw)) = read_raw(&mut reader) {
        let _ = Record::decode(&raw);
    }
}

/// Render a focus grid from the first 12 bytes
pub fn fuzz_render(data: &[u8]) {
    if data.len() < 12 {
        return;
    }
    let mut selection = [0u8; 4];
    selection.copy_from_slice(&data[..4]);
    let mut points = [0u8; 8];
    points.copy_from_slice(&data[4..12]);

    let grid = render_focus_points(u32::from_le_bytes(selection), points);
    debug_assert_eq!(grid.lines().count(), 5);
}
