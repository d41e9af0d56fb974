use super::*;
use crate::foundation::core::Rgba8;
use serde_json::json;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "scorecard_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(path: &Path, w: u32, h: u32, px: [u8; 4]) {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

fn card_json() -> serde_json::Value {
    json!({
        "canvas": { "width": 500, "height": 300 },
        "assets": {
            "avatar_mask": "avatar_mask.png",
            "background": "background.png",
            "gradient_mask": "gradient_mask.png",
            "cover_mask": "cover_mask.png",
            "final_mask": "final_mask.png",
            "font": "font.ttf"
        }
    })
}

fn request_json() -> serde_json::Value {
    json!({
        "player_name": "Player",
        "song_name": "Song",
        "difficulty": "Expert+",
        "accuracy": 0.9573,
        "rank": 13,
        "pp": 607.58,
        "cover": "cover.png",
        "avatar": "/abs/avatar.png",
        "left_color": "#ff0000",
        "right_color": [0.0, 0.0, 1.0],
        "difficulty_color": { "r": 1.0, "g": 0.5, "b": 0.0 }
    })
}

#[test]
fn card_config_defaults_optional_sections() {
    let cfg: CardConfig = serde_json::from_value(card_json()).unwrap();
    assert_eq!(
        cfg.canvas,
        CanvasSize {
            width: 500,
            height: 300
        }
    );
    assert_eq!(cfg.cover_filter, None);
    assert!(!cfg.debug_layout);
    assert_eq!(cfg.assets.font, PathBuf::from("font.ttf"));
}

#[test]
fn card_config_rejects_unknown_fields() {
    let mut v = card_json();
    v["extra"] = json!(1);
    assert!(serde_json::from_value::<CardConfig>(v).is_err());
}

#[test]
fn cover_filter_config_fills_defaults_and_scales() {
    let cfg: CoverFilterConfig = serde_json::from_value(json!({})).unwrap();
    assert_eq!(cfg, CoverFilterConfig::default());

    let doubled = cfg.to_filter(CanvasSize {
        width: 1000,
        height: 600,
    });
    assert_eq!(doubled.blur.radius_px, 24);

    let fixed: CoverFilterConfig =
        serde_json::from_value(json!({ "blur_radius_px": 5, "scale_with_canvas": false }))
            .unwrap();
    let f = fixed.to_filter(CanvasSize {
        width: 1000,
        height: 600,
    });
    assert_eq!(f.blur.radius_px, 5);
    assert_eq!(f.blur.sigma, COVER_BLUR.sigma);
    assert_eq!(f.image_tint, CoverFilter::default().image_tint);
}

#[test]
fn score_request_applies_defaults() {
    let req: ScoreRequest = serde_json::from_value(request_json()).unwrap();
    assert_eq!(req.modifiers, "");
    assert_eq!(req.stars, 0.0);
    assert_eq!(req.avatar_overlay, None);
    assert_eq!(req.overlay_hue_shift, 0);
    assert_eq!(req.overlay_saturation, 1.0);
}

#[test]
fn resolve_path_keeps_absolute_paths() {
    let root = Path::new("/cards");
    assert_eq!(
        resolve_path(root, Path::new("a.png")),
        PathBuf::from("/cards/a.png")
    );
    assert_eq!(
        resolve_path(root, Path::new("/abs/avatar.png")),
        PathBuf::from("/abs/avatar.png")
    );
}

#[test]
fn score_request_loads_images_relative_to_root() {
    let tmp = temp_dir("score_request_load");
    std::fs::create_dir_all(&tmp).unwrap();
    write_png(&tmp.join("cover.png"), 4, 4, [0, 200, 0, 255]);
    write_png(&tmp.join("avatar.png"), 2, 2, [200, 200, 0, 255]);

    let mut v = request_json();
    v["avatar"] = json!("avatar.png");
    let req: ScoreRequest = serde_json::from_value(v).unwrap();
    let record = req.load(&tmp).unwrap();

    assert_eq!(record.cover.width(), 4);
    assert_eq!(record.avatar.pixel(0, 0), Some([200, 200, 0, 255]));
    assert_eq!(record.left_color, Rgba8::opaque(255, 0, 0));
    assert_eq!(record.right_color, Rgba8::opaque(0, 0, 255));
    assert_eq!(record.difficulty_color, Rgba8::opaque(255, 128, 0));
    assert_eq!(record.rank_text(), "#13 • 607.58pp");

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn score_request_rejects_out_of_range_values() {
    let tmp = temp_dir("score_request_invalid");
    std::fs::create_dir_all(&tmp).unwrap();
    write_png(&tmp.join("cover.png"), 1, 1, [0, 0, 0, 255]);
    write_png(&tmp.join("avatar.png"), 1, 1, [0, 0, 0, 255]);

    let mut v = request_json();
    v["avatar"] = json!("avatar.png");
    v["accuracy"] = json!(1.5);
    let req: ScoreRequest = serde_json::from_value(v).unwrap();
    assert!(matches!(req.load(&tmp), Err(ScorecardError::Score(_))));

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn missing_and_undecodable_assets_are_reported() {
    let tmp = temp_dir("prepare_generator_errors");
    std::fs::create_dir_all(&tmp).unwrap();
    for name in [
        "avatar_mask",
        "background",
        "gradient_mask",
        "cover_mask",
        "final_mask",
    ] {
        write_png(&tmp.join(format!("{name}.png")), 2, 2, [255, 255, 255, 255]);
    }
    let cfg: CardConfig = serde_json::from_value(card_json()).unwrap();

    // No font file yet.
    let err = prepare_generator(&cfg, &tmp).unwrap_err();
    assert!(err.to_string().contains("font.ttf"));

    std::fs::write(tmp.join("font.ttf"), b"not a font").unwrap();
    assert!(matches!(
        prepare_generator(&cfg, &tmp),
        Err(ScorecardError::Config(_))
    ));

    std::fs::write(tmp.join("background.png"), b"not a png").unwrap();
    let err = prepare_generator(&cfg, &tmp).unwrap_err();
    assert!(matches!(err, ScorecardError::Asset(_)));
    assert!(err.to_string().contains("background.png"));

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn config_file_paths_resolve_against_its_directory() {
    let tmp = temp_dir("card_config_path");
    std::fs::create_dir_all(&tmp).unwrap();
    let path = tmp.join("card.json");
    std::fs::write(&path, serde_json::to_vec(&card_json()).unwrap()).unwrap();

    let (cfg, root) = CardConfig::from_json_path(&path).unwrap();
    assert_eq!(root, tmp);
    assert_eq!(cfg.canvas.width, 500);

    std::fs::write(&path, b"{").unwrap();
    assert!(matches!(
        CardConfig::from_json_path(&path),
        Err(ScorecardError::Config(_))
    ));

    let _ = std::fs::remove_dir_all(&tmp);
}
