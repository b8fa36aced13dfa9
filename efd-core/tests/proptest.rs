//! Property-based tests using proptest

mod common;

use efd_core::{
    parse_root_from_bytes, read_raw, render_focus_points, Codec, DecodePolicy, Efrm, Eftp,
    LookupTables, RawRecord,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_raw_record_round_trip(
        magic in prop::array::uniform4(any::<u8>()),
        reserved in prop::array::uniform4(any::<u8>()),
        payload in prop::collection::vec(any::<u8>(), 0..1024)
    ) {
        let mut record = RawRecord::new(magic, payload);
        record.reserved = reserved;
        let mut encoded = record.to_bytes();

        let decoded = read_raw(&mut encoded.as_slice()).unwrap().unwrap();
        prop_assert_eq!(&decoded, &record);

        // re-encoding reproduces the bytes exactly
        let reencoded = decoded.to_bytes();
        prop_assert_eq!(&reencoded, &encoded);

        // any shorter stream is a framing error, never a clean end
        if encoded.len() > 1 {
            encoded.pop();
            prop_assert!(read_raw(&mut encoded.as_slice()).is_err());
        }
    }

    #[test]
    fn prop_parse_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..4096)
    ) {
        let result = parse_root_from_bytes(&data);
        prop_assert!(result.is_ok() || result.is_err());
    }

    #[test]
    fn prop_decoders_never_panic(
        data in prop::collection::vec(any::<u8>(), 0..1024)
    ) {
        let _ = Efrm::decode(&data);
        let _ = Eftp::decode(&data);
    }

    #[test]
    fn prop_thumbnail_buffer_size(
        width in 0u16..64,
        height in 0u16..64,
        pixels in prop::collection::vec(any::<u8>(), 0..2048)
    ) {
        let payload = common::eftp_payload(1, width, height, "p", &pixels);
        let eftp = Eftp::decode(&payload).unwrap();
        prop_assert_eq!(eftp.pixels.len(), width as usize * height as usize * 4);

        let filled = (pixels.len() / 3).min(width as usize * height as usize);
        let opaque = eftp.pixels.chunks(4).filter(|p| p[3] == 255).count();
        prop_assert_eq!(opaque, filled);
    }

    #[test]
    fn prop_focus_render_is_pure(
        selection in any::<u32>(),
        points in prop::array::uniform8(any::<u8>())
    ) {
        let first = render_focus_points(selection, points);
        let second = render_focus_points(selection, points);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.lines().count(), 5);
    }

    #[test]
    fn prop_inactive_focus_ignores_bitmask(
        a in prop::array::uniform8(any::<u8>()),
        b in prop::array::uniform8(any::<u8>())
    ) {
        prop_assert_eq!(
            render_focus_points(u32::MAX, a),
            render_focus_points(u32::MAX, b)
        );
    }

    #[test]
    fn prop_lenient_open_fields_never_fail(
        tv in any::<u32>(),
        av in any::<u32>(),
        comp in any::<i32>(),
        cf in prop::array::uniform20(any::<u8>())
    ) {
        let tables = LookupTables::embedded().unwrap();
        let codec = Codec::new(&tables, DecodePolicy::Lenient);
        prop_assert!(codec.tv(tv).is_ok());
        prop_assert!(codec.av(av).is_ok());
        prop_assert!(codec.exposure_compensation(comp).is_ok());
        prop_assert!(codec.custom_functions(cf).is_ok());
    }

    #[test]
    fn prop_valid_film_ids_format(prefix in 0u32..100, suffix in 0u32..1000) {
        let id = efd_core::film_id(prefix, suffix).unwrap().to_string();
        prop_assert_eq!(id.len(), 6);
        prop_assert_eq!(id, format!("{:02}-{:03}", prefix, suffix));
    }
}
