//! Minimal EFD files for driving the commands

#![allow(dead_code)]

use bytes::{BufMut, BytesMut};
use efd_core::constants::{EFDF_SIZE, EFRM_SIZE, PATH_LEN, REMARKS_LEN, TITLE_LEN};
use efd_core::RawRecord;
use std::fs;
use std::path::Path;

fn put_cstr(buf: &mut BytesMut, text: &str, len: usize) {
    let n = text.len().min(len);
    buf.put_slice(&text.as_bytes()[..n]);
    buf.put_bytes(0, len - n);
}

pub fn efdf(title: &str) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(EFDF_SIZE);
    buf.put_u32_le(7);
    buf.put_u32_le(21);
    buf.put_u8(1);
    buf.put_u8(6);
    buf.put_u16_le(2004);
    buf.put_slice(&[3, 9, 14, 5, 0]);
    buf.put_bytes(0, 3);
    buf.put_u32_le(2);
    buf.put_u32_le(400);
    put_cstr(&mut buf, title, TITLE_LEN);
    put_cstr(&mut buf, "", REMARKS_LEN);
    RawRecord::new(*b"EFDF", buf.to_vec()).to_bytes()
}

/// A frame shot at 1/250 f/5.6 with the given AF bitmask
pub fn efrm(number: u32, focus_points: [u8; 8], selection: u32, remarks: &str) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(EFRM_SIZE);
    buf.put_u32_le(number);
    buf.put_u32_le(85); // focal length
    buf.put_u32_le(8); // max aperture 1.4
    buf.put_u32_le(120); // 1/250
    buf.put_u32_le(u32::MAX); // not bulb
    buf.put_u32_le(40); // 5.6
    buf.put_i32_le(10); // +1.0
    buf.put_i32_le(-1);
    buf.put_u32_le(400);
    buf.put_u32_le(u32::MAX);
    buf.put_slice(&[0, 0, 4, 0, 1, 0]);
    buf.put_u8(0);
    buf.put_u8(0);
    for _ in 0..3 {
        buf.put_u16_le(2004);
        buf.put_slice(&[3, 9, 15, 20, number as u8, 0]);
    }
    buf.put_bytes(0xFF, 20);
    buf.put_slice(&focus_points);
    buf.put_u32_le(selection);
    put_cstr(&mut buf, remarks, REMARKS_LEN);
    RawRecord::new(*b"EFRM", buf.to_vec()).to_bytes()
}

/// A `width` x `height` thumbnail filled with one BGR colour
pub fn eftp(index: u16, width: u16, height: u16, bgr: [u8; 3]) -> Vec<u8> {
    let mut buf = BytesMut::new();
    buf.put_u16_le(index);
    buf.put_u16_le(0);
    buf.put_u16_le(width);
    buf.put_u16_le(height);
    buf.put_bytes(0, 8);
    put_cstr(&mut buf, &format!("C:\\EOS\\{:02}.JPG", index), PATH_LEN);
    for _ in 0..(width as usize * height as usize) {
        buf.put_slice(&bgr);
    }
    RawRecord::new(*b"EFTP", buf.to_vec()).to_bytes()
}

/// Two frames with thumbnails; frame 2 has AF inactive
pub fn sample() -> Vec<u8> {
    let mut data = efdf("Tri-X, Lisbon");
    data.extend(efrm(1, [0, 0, 0, 0, 0b0000_0100, 0, 0, 0], 0, "first, \"best\""));
    data.extend(efrm(2, [0; 8], u32::MAX, ""));
    data.extend(eftp(1, 3, 2, [0, 0, 255]));
    data.extend(eftp(2, 3, 2, [255, 0, 0]));
    data
}

pub fn write_sample(path: &Path) {
    fs::write(path, sample()).unwrap();
}
