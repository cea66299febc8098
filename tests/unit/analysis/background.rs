use super::*;
use crate::foundation::core::Rgba;

fn white_with_red_square() -> Bitmap {
    let mut bmp = Bitmap::from_pixel(10, 10, Rgba::opaque(Color::WHITE));
    for y in 3..7 {
        for x in 3..7 {
            bmp.put_pixel(x, y, Rgba::opaque(Color::rgb(255, 0, 0)));
        }
    }
    bmp
}

#[test]
fn single_mode_picks_dominant_corner_color() {
    let spec = estimate_background(
        &white_with_red_square(),
        Margin::default(),
        BackgroundMode::Single,
        DEFAULT_TOLERANCE,
    );
    assert_eq!(spec.colors, vec![Color::WHITE]);
    assert_eq!(spec.tolerance, 30);
}

#[test]
fn dual_mode_returns_two_tone_border() {
    // left half blue, right half green, wide enough that corners differ
    let mut bmp = Bitmap::new(20, 20);
    let blue = Color::rgb(0, 0, 200);
    let green = Color::rgb(0, 200, 0);
    for y in 0..20 {
        for x in 0..20 {
            let c = if x < 10 { blue } else { green };
            bmp.put_pixel(x, y, Rgba::opaque(c));
        }
    }
    bmp.put_pixel(0, 0, Rgba::opaque(green));

    let spec = estimate_background(&bmp, Margin::Fixed(5), BackgroundMode::Dual, 30);
    assert_eq!(spec.colors.len(), 2);
    // green gains the (0,0) sample and wins the count
    assert_eq!(spec.colors, vec![green, blue]);
    assert!(spec.matches(blue));
    assert!(spec.matches(green));
    assert!(!spec.matches(Color::WHITE));
}

#[test]
fn dual_mode_with_uniform_border_yields_one_color() {
    let bmp = white_with_red_square();
    let spec = estimate_background(&bmp, Margin::Fixed(2), BackgroundMode::Dual, 30);
    assert_eq!(spec.colors, vec![Color::WHITE]);
}

#[test]
fn empty_bitmap_falls_back_to_white() {
    let spec = estimate_background(
        &Bitmap::new(0, 0),
        Margin::default(),
        BackgroundMode::Single,
        30,
    );
    assert_eq!(spec.colors, vec![Color::WHITE]);
}

#[test]
fn estimation_is_deterministic_on_ties() {
    // two colors with equal corner counts: first seen in scan order wins
    let mut bmp = Bitmap::from_pixel(4, 4, Rgba::opaque(Color::rgb(9, 9, 9)));
    for y in 0..4 {
        for x in 2..4 {
            bmp.put_pixel(x, y, Rgba::opaque(Color::rgb(200, 10, 10)));
        }
    }
    let a = estimate_background(&bmp, Margin::Fixed(2), BackgroundMode::Single, 30);
    let b = estimate_background(&bmp, Margin::Fixed(2), BackgroundMode::Single, 30);
    assert_eq!(a, b);
    assert_eq!(a.colors, vec![Color::rgb(9, 9, 9)]);
}
