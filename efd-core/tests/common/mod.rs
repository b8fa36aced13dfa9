//! Fixture builders shared by the integration tests
//!
//! These write payloads in the on-disk layout so the decoders can be
//! exercised end to end without captured files.

#![allow(dead_code)]

use bytes::{BufMut, BytesMut};
use efd_core::constants::{EFDF_SIZE, EFRM_SIZE, PATH_LEN, REMARKS_LEN, TITLE_LEN};
use efd_core::RawRecord;

/// Write a fixed-width NUL-padded string field
fn put_cstr(buf: &mut BytesMut, text: &str, len: usize) {
    let bytes = text.as_bytes();
    let n = bytes.len().min(len);
    buf.put_slice(&bytes[..n]);
    buf.put_bytes(0, len - n);
}

fn put_date(buf: &mut BytesMut, date: (u16, u8, u8, u8, u8, u8)) {
    buf.put_u16_le(date.0);
    buf.put_u8(date.1);
    buf.put_u8(date.2);
    buf.put_u8(date.3);
    buf.put_u8(date.4);
    buf.put_u8(date.5);
}

/// Roll record fields
pub struct EfdfFixture {
    pub film_id: (u32, u32),
    pub loaded: (u16, u8, u8, u8, u8, u8),
    pub frame_count: u32,
    pub iso_dx: u32,
    pub title: String,
    pub remarks: String,
}

impl Default for EfdfFixture {
    fn default() -> Self {
        Self {
            film_id: (12, 345),
            loaded: (2003, 6, 14, 9, 30, 0),
            frame_count: 36,
            iso_dx: 100,
            title: "Velvia 100 - Iceland".to_string(),
            remarks: "pushed one stop".to_string(),
        }
    }
}

impl EfdfFixture {
    pub fn payload(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(EFDF_SIZE);
        buf.put_u32_le(self.film_id.0);
        buf.put_u32_le(self.film_id.1);
        buf.put_u8(4);
        buf.put_u8(6);
        put_date(&mut buf, self.loaded);
        buf.put_bytes(0, 3);
        buf.put_u32_le(self.frame_count);
        buf.put_u32_le(self.iso_dx);
        put_cstr(&mut buf, &self.title, TITLE_LEN);
        put_cstr(&mut buf, &self.remarks, REMARKS_LEN);
        assert_eq!(buf.len(), EFDF_SIZE);
        buf.to_vec()
    }

    pub fn record(&self) -> Vec<u8> {
        RawRecord::new(*b"EFDF", self.payload()).to_bytes()
    }
}

/// Frame record fields
#[derive(Clone)]
pub struct EfrmFixture {
    pub frame_number: u32,
    pub focal_length: u32,
    pub max_aperture: u32,
    pub tv: u32,
    pub bulb_exposure_seconds: u32,
    pub av: u32,
    pub exposure_compensation: i32,
    pub flash_exposure_compensation: i32,
    pub iso_dx: u32,
    pub iso_m: u32,
    pub modes: [u8; 6],
    pub is_modified: bool,
    pub film_loaded: (u16, u8, u8, u8, u8, u8),
    pub taken: (u16, u8, u8, u8, u8, u8),
    pub battery_loaded: (u16, u8, u8, u8, u8, u8),
    pub custom_functions: [u8; 20],
    pub focus_points: [u8; 8],
    pub focus_selection: u32,
    pub remarks: String,
}

impl Default for EfrmFixture {
    fn default() -> Self {
        Self {
            frame_number: 1,
            focal_length: 50,
            max_aperture: 8,
            tv: 120,
            bulb_exposure_seconds: u32::MAX,
            av: 40,
            exposure_compensation: -7,
            flash_exposure_compensation: -1,
            iso_dx: 100,
            iso_m: u32::MAX,
            // flash, metering, shooting, film advance, AF, multiple exposure
            modes: [0, 0, 2, 0, 0, 0],
            is_modified: false,
            film_loaded: (2003, 6, 14, 9, 30, 0),
            taken: (2003, 6, 14, 10, 2, 41),
            battery_loaded: (2003, 1, 2, 8, 0, 0),
            custom_functions: [0xFF; 20],
            focus_points: [0, 0, 0, 0, 0b0000_0100, 0, 0, 0],
            focus_selection: 0,
            remarks: String::new(),
        }
    }
}

impl EfrmFixture {
    pub fn numbered(frame_number: u32) -> Self {
        Self {
            frame_number,
            ..Self::default()
        }
    }

    pub fn payload(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(EFRM_SIZE);
        buf.put_u32_le(self.frame_number);
        buf.put_u32_le(self.focal_length);
        buf.put_u32_le(self.max_aperture);
        buf.put_u32_le(self.tv);
        buf.put_u32_le(self.bulb_exposure_seconds);
        buf.put_u32_le(self.av);
        buf.put_i32_le(self.exposure_compensation);
        buf.put_i32_le(self.flash_exposure_compensation);
        buf.put_u32_le(self.iso_dx);
        buf.put_u32_le(self.iso_m);
        buf.put_slice(&self.modes);
        buf.put_u8(self.is_modified as u8);
        buf.put_u8(0);
        for date in [self.film_loaded, self.taken, self.battery_loaded] {
            put_date(&mut buf, date);
            buf.put_u8(0);
        }
        buf.put_slice(&self.custom_functions);
        buf.put_slice(&self.focus_points);
        buf.put_u32_le(self.focus_selection);
        put_cstr(&mut buf, &self.remarks, REMARKS_LEN);
        assert_eq!(buf.len(), EFRM_SIZE);
        buf.to_vec()
    }

    pub fn record(&self) -> Vec<u8> {
        RawRecord::new(*b"EFRM", self.payload()).to_bytes()
    }
}

/// Thumbnail payload: sub-header, filepath and `pixels` BGR triples
pub fn eftp_payload(frame_index: u16, width: u16, height: u16, path: &str, bgr: &[u8]) -> Vec<u8> {
    let mut buf = BytesMut::new();
    buf.put_u16_le(frame_index);
    buf.put_u16_le(0);
    buf.put_u16_le(width);
    buf.put_u16_le(height);
    buf.put_bytes(0, 8);
    put_cstr(&mut buf, path, PATH_LEN);
    buf.put_slice(bgr);
    buf.to_vec()
}

pub fn eftp_record(frame_index: u16, width: u16, height: u16, path: &str, bgr: &[u8]) -> Vec<u8> {
    RawRecord::new(*b"EFTP", eftp_payload(frame_index, width, height, path, bgr)).to_bytes()
}

/// A complete file: one roll, `frames` frames, a 2x2 thumbnail per frame
pub fn sample_file(frames: u32) -> Vec<u8> {
    let mut stream = EfdfFixture::default().record();
    for n in 1..=frames {
        stream.extend_from_slice(&EfrmFixture::numbered(n).record());
    }
    for n in 1..=frames {
        let bgr: Vec<u8> = (0..12).map(|i| (i as u8).wrapping_mul(n as u8)).collect();
        stream.extend_from_slice(&eftp_record(
            n as u16,
            2,
            2,
            &format!("C:\\EOS\\ROLL012\\{:02}.JPG", n),
            &bgr,
        ));
    }
    stream
}
