use super::*;

fn size(w: u32, h: u32) -> CanvasSize {
    CanvasSize {
        width: w,
        height: h,
    }
}

#[test]
fn reference_canvas_rectangles() {
    let l = EmbedLayout::new(size(500, 300)).unwrap();
    assert_eq!(l.full, PixelRect::full(size(500, 300)));
    assert_eq!(
        l.avatar,
        PixelRect {
            x: 65,
            y: 75,
            width: 150,
            height: 150
        }
    );
    assert_eq!(
        l.song_name,
        PixelRect {
            x: 15,
            y: 234,
            width: 470,
            height: 42
        }
    );
    assert_eq!(
        l.player_name,
        PixelRect {
            x: 15,
            y: 27,
            width: 250,
            height: 36
        }
    );
    assert_eq!(
        l.rank_text,
        PixelRect {
            x: 235,
            y: 132,
            width: 250,
            height: 36
        }
    );
    assert!((l.min_player_name_font_px - 21.0).abs() < 1e-3);
    assert!((l.min_song_name_font_px - 30.0).abs() < 1e-3);
}

#[test]
fn overlay_shares_avatar_center_and_is_larger() {
    let l = EmbedLayout::new(size(500, 300)).unwrap();
    let center = |r: PixelRect| {
        (
            f64::from(r.x) + f64::from(r.width) / 2.0,
            f64::from(r.y) + f64::from(r.height) / 2.0,
        )
    };
    let (ax, ay) = center(l.avatar);
    let (ox, oy) = center(l.avatar_overlay);
    assert!((ax - ox).abs() <= 1.0);
    assert!((ay - oy).abs() <= 1.0);
    assert!(l.avatar_overlay.width > l.avatar.width);
    assert!(l.avatar_overlay.contains_rect(l.avatar));
}

#[test]
fn every_region_lies_within_full_canvas() {
    for (w, h) in [
        (500, 300),
        (1000, 600),
        (250, 150),
        (64, 40),
        (1920, 1080),
        (3000, 300),
        (135, 100),
        (7, 5),
    ] {
        let l = EmbedLayout::new(size(w, h)).unwrap();
        for (name, r) in l.regions() {
            assert!(
                l.full.contains_rect(r),
                "{name} {r:?} escapes {w}x{h} canvas"
            );
        }
    }
}

#[test]
fn layout_is_pure() {
    let a = EmbedLayout::new(size(733, 411)).unwrap();
    let b = EmbedLayout::new(size(733, 411)).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        a.min_song_name_font_px.to_bits(),
        b.min_song_name_font_px.to_bits()
    );
}

#[test]
fn degenerate_and_narrow_canvases_are_rejected() {
    assert!(matches!(
        EmbedLayout::new(size(0, 300)),
        Err(ScorecardError::Config(_))
    ));
    assert!(matches!(
        EmbedLayout::new(size(500, 0)),
        Err(ScorecardError::Config(_))
    ));
    assert!(matches!(
        EmbedLayout::new(size(300, 300)),
        Err(ScorecardError::Config(_))
    ));
}
