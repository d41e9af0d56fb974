use super::*;

fn size(w: u32, h: u32) -> CanvasSize {
    CanvasSize {
        width: w,
        height: h,
    }
}

#[test]
fn bottom_left_to_top_right_endpoints() {
    let (w, h) = (50u32, 30u32);
    let g = LinearGradient {
        start: Point::new(0.0, f64::from(h)),
        end: Point::new(f64::from(w), 0.0),
        start_color: Rgba8::opaque(255, 0, 0),
        end_color: Rgba8::opaque(0, 0, 255),
    };
    let out = g.fill(size(w, h)).unwrap();

    let bl = out.pixel(0, h - 1).unwrap();
    let tr = out.pixel(w - 1, 0).unwrap();
    assert!(bl[0] > 240 && bl[2] < 15, "{bl:?}");
    assert!(tr[2] > 240 && tr[0] < 15, "{tr:?}");
    assert!(out.data().chunks_exact(4).all(|p| p[3] == 255));

    let mid = out.pixel(w / 2 - 1, h / 2 - 1).unwrap();
    assert!((i32::from(mid[0]) - i32::from(mid[2])).abs() < 8, "{mid:?}");
}

#[test]
fn degenerate_axis_uses_start_color() {
    let g = LinearGradient {
        start: Point::new(1.0, 1.0),
        end: Point::new(1.0, 1.0),
        start_color: Rgba8::opaque(9, 8, 7),
        end_color: Rgba8::WHITE,
    };
    let out = g.fill(size(3, 3)).unwrap();
    assert!(out.data().chunks_exact(4).all(|p| p == [9, 8, 7, 255]));
}
