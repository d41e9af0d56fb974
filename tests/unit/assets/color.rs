use super::*;
use serde_json::json;

fn parse(v: serde_json::Value) -> Result<Rgba8, serde_json::Error> {
    serde_json::from_value::<ColorDef>(v).map(ColorDef::to_rgba8)
}

#[test]
fn hex_strings_accept_optional_alpha_and_any_case() {
    assert_eq!(parse(json!("#FF9B14")).unwrap(), Rgba8::opaque(255, 155, 20));
    assert_eq!(parse(json!("ff9b14")).unwrap(), Rgba8::opaque(255, 155, 20));
    assert_eq!(parse(json!("#0000ff80")).unwrap(), Rgba8::new(0, 0, 255, 128));
}

#[test]
fn objects_and_arrays_use_unit_floats() {
    assert_eq!(
        parse(json!({"r": 1.0, "g": 0.5, "b": 0.0})).unwrap(),
        Rgba8::opaque(255, 128, 0)
    );
    assert_eq!(
        parse(json!([0.0, 0.0, 1.0, 0.5])).unwrap(),
        Rgba8::new(0, 0, 255, 128)
    );
    // Out-of-range components saturate.
    assert_eq!(parse(json!([2.0, -1.0, 0.0])).unwrap(), Rgba8::opaque(255, 0, 0));
}

#[test]
fn malformed_colors_are_rejected() {
    for bad in [json!("#fff"), json!("#gg0000"), json!("#ff00ff0"), json!([1.0, 0.0]), json!(12)] {
        assert!(parse(bad.clone()).is_err(), "{bad} should not parse");
    }
}
