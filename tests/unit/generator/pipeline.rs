use super::*;
use crate::block_font::BlockFont;
use crate::foundation::core::Rgba8Premul;

fn solid(w: u32, h: u32, c: Rgba8) -> Surface {
    Surface::filled(
        CanvasSize {
            width: w,
            height: h,
        },
        c.premultiply(),
    )
    .unwrap()
}

fn assets() -> CardAssets {
    let white = solid(8, 8, Rgba8::WHITE);
    CardAssets {
        avatar_mask: white.clone(),
        background: solid(16, 16, Rgba8::opaque(30, 30, 30)),
        gradient_mask: white.clone(),
        cover_mask: solid(8, 8, Rgba8::new(255, 255, 255, 128)),
        final_mask: white,
    }
}

fn generator() -> EmbedGenerator {
    EmbedGenerator::new(
        CanvasSize {
            width: 500,
            height: 300,
        },
        assets(),
        Arc::new(BlockFont),
    )
    .unwrap()
}

fn record(player: &str) -> ScoreRecord {
    ScoreRecord {
        player_name: player.to_string(),
        song_name: "B".to_string(),
        modifiers: String::new(),
        difficulty: "Easy".to_string(),
        accuracy: 0.5,
        rank: 1,
        pp: 0.0,
        stars: 0.0,
        cover: solid(40, 40, Rgba8::opaque(0, 200, 0)),
        avatar: solid(10, 10, Rgba8::opaque(200, 200, 0)),
        avatar_overlay: None,
        overlay_hue_shift: 0,
        overlay_saturation: 1.0,
        left_color: Rgba8::opaque(255, 0, 0),
        right_color: Rgba8::opaque(0, 0, 255),
        difficulty_color: Rgba8::WHITE,
    }
}

#[test]
fn generator_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EmbedGenerator>();
}

#[test]
fn assets_are_fitted_at_construction() {
    let g = generator();
    assert_eq!(g.background().size(), g.size());
    assert_eq!(Some(g.avatar_mask.size()), g.layout().avatar.size());
    assert_eq!(g.final_mask.size(), g.size());
    assert_eq!(g.cover_filter().blur.radius_px, 12);
}

#[test]
fn end_to_end_composites_onto_background() {
    let g = generator();
    let out = g.generate(&record("A")).unwrap();
    assert_eq!(out.size(), g.size());
    assert_ne!(&out, g.background());

    // Avatar center shows the avatar color.
    let a = g.layout().avatar;
    let px = out
        .pixel(
            a.x as u32 + a.width / 2,
            a.y as u32 + a.height / 2,
        )
        .unwrap();
    assert_eq!(px, [200, 200, 0, 255]);
}

#[test]
fn generate_leaves_shared_state_untouched() {
    let g = generator();
    let background = g.background().clone();
    let _ = g.generate(&record("A")).unwrap();
    assert!(g.background().shares_pixels_with(&background));
    assert!(
        g.background()
            .data()
            .chunks_exact(4)
            .all(|p| p == [30, 30, 30, 255])
    );
}

#[test]
fn repeated_and_interleaved_calls_are_identical() {
    let g = generator();
    let first_a = g.generate(&record("A")).unwrap();
    let b = g.generate(&record("Somebody Else")).unwrap();
    let second_a = g.generate(&record("A")).unwrap();
    assert_eq!(first_a, second_a);
    assert_ne!(first_a, b);

    let fresh_b = generator().generate(&record("Somebody Else")).unwrap();
    assert_eq!(b, fresh_b);
}

#[test]
fn overlay_is_drawn_when_supplied() {
    let g = generator();
    let plain = g.generate(&record("A")).unwrap();

    let mut with_overlay = record("A");
    with_overlay.avatar_overlay = Some(solid(20, 20, Rgba8::opaque(255, 0, 0)));
    with_overlay.overlay_hue_shift = 240;
    let out = g.generate(&with_overlay).unwrap();
    assert_ne!(plain, out);

    let o = g.layout().avatar_overlay;
    assert_eq!(
        out.pixel(o.x as u32 + 1, o.y as u32 + o.height / 2),
        Some([0, 0, 255, 255])
    );
}

#[test]
fn final_mask_shapes_the_card() {
    let mut a = assets();
    let mut mask = Surface::filled(
        CanvasSize {
            width: 500,
            height: 300,
        },
        Rgba8::WHITE.premultiply(),
    )
    .unwrap();
    mask.data_mut()[..4].copy_from_slice(&Rgba8Premul::transparent().to_array());
    a.final_mask = mask;

    let g = EmbedGenerator::new(g_size(), a, Arc::new(BlockFont)).unwrap();
    let out = g.generate(&record("A")).unwrap();
    assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(out.pixel(1, 0).unwrap()[3], 255);
}

#[test]
fn debug_layout_outlines_regions() {
    let g = generator().with_debug_layout(true);
    let out = g.generate(&record("A")).unwrap();
    let r = g.layout().rank_text;
    assert_eq!(out.pixel(r.x as u32, r.y as u32), Some([255, 0, 0, 255]));
}

#[test]
fn invalid_records_are_rejected() {
    let g = generator();
    let mut r = record("A");
    r.accuracy = f64::NAN;
    assert!(matches!(g.generate(&r), Err(ScorecardError::Score(_))));
}

#[test]
fn invalid_canvas_is_rejected_at_construction() {
    let err = EmbedGenerator::new(
        CanvasSize {
            width: 0,
            height: 300,
        },
        assets(),
        Arc::new(BlockFont),
    )
    .unwrap_err();
    assert!(matches!(err, ScorecardError::Config(_)));

    // Tiny but valid aspect: text boxes collapse to nothing.
    let err = EmbedGenerator::new(
        CanvasSize {
            width: 3,
            height: 2,
        },
        assets(),
        Arc::new(BlockFont),
    )
    .unwrap_err();
    assert!(matches!(err, ScorecardError::Config(_)));
}

fn g_size() -> CanvasSize {
    CanvasSize {
        width: 500,
        height: 300,
    }
}
