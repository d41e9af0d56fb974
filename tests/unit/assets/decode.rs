use super::*;
use crate::foundation::error::ScorecardError;
use crate::foundation::core::{CanvasSize, Rgba8};

#[test]
fn png_roundtrip_preserves_opaque_pixels() {
    let s = Surface::filled(
        CanvasSize {
            width: 3,
            height: 2,
        },
        Rgba8::opaque(12, 34, 56).premultiply(),
    )
    .unwrap();
    let png = encode_png(&s).unwrap();
    assert_eq!(&png[1..4], b"PNG");
    let back = decode_image(&png).unwrap();
    assert_eq!(back, s);
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(matches!(
        decode_image(b"not an image"),
        Err(ScorecardError::Asset(_))
    ));
}
