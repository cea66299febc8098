use super::*;
use crate::foundation::core::Rgba;

#[test]
fn margin_resolution_clamps_to_half_short_side() {
    assert_eq!(Margin::Fixed(5).resolve(100, 80), 5);
    assert_eq!(Margin::Fixed(5).resolve(6, 100), 3);
    assert_eq!(Margin::Fixed(5).resolve(1, 1), 1);
    assert_eq!(Margin::Fixed(5).resolve(0, 10), 0);
    assert_eq!(Margin::Proportional.resolve(200, 50), 5);
    assert_eq!(Margin::Proportional.resolve(9, 9), 1);
}

#[test]
fn table_counts_and_ranks_with_first_seen_ties() {
    let mut table = ColorFrequencyTable::new();
    let a = Color::rgb(1, 1, 1);
    let b = Color::rgb(2, 2, 2);
    let c = Color::rgb(3, 3, 3);
    for color in [b, a, c, a, c] {
        table.add(color);
    }

    assert_eq!(table.len(), 3);
    assert_eq!(table.total(), 5);
    assert_eq!(table.count(a), 2);
    assert_eq!(table.count(Color::WHITE), 0);
    // a and c tie at 2; a was seen first.
    assert_eq!(table.top(2), vec![(a, 2), (c, 2)]);
    assert_eq!(table.top(10).len(), 3);
}

#[test]
fn samples_four_corner_squares_only() {
    let mut bmp = Bitmap::from_pixel(20, 20, Rgba::opaque(Color::WHITE));
    // centre pixel is outside every corner square
    bmp.put_pixel(10, 10, Rgba::opaque(Color::rgb(255, 0, 0)));
    bmp.put_pixel(19, 19, Rgba::opaque(Color::rgb(0, 0, 255)));

    let table = sample_corners(&bmp, Margin::Fixed(5));
    assert_eq!(table.total(), 100);
    assert_eq!(table.count(Color::rgb(255, 0, 0)), 0);
    assert_eq!(table.count(Color::rgb(0, 0, 255)), 1);
    assert_eq!(table.count(Color::WHITE), 99);
}

#[test]
fn tiny_bitmaps_sample_without_going_out_of_bounds() {
    let bmp = Bitmap::from_pixel(1, 3, Rgba::opaque(Color::rgb(7, 7, 7)));
    let table = sample_corners(&bmp, Margin::Fixed(5));
    assert_eq!(table.total(), 4);

    let empty = Bitmap::new(0, 0);
    assert!(sample_corners(&empty, Margin::Fixed(5)).is_empty());
}

#[test]
fn alpha_does_not_split_colors() {
    let mut bmp = Bitmap::from_pixel(2, 2, Rgba::new(10, 20, 30, 255));
    bmp.put_pixel(0, 0, Rgba::new(10, 20, 30, 0));
    let table = sample_corners(&bmp, Margin::Fixed(1));
    assert_eq!(table.len(), 1);
    assert_eq!(table.count(Color::rgb(10, 20, 30)), 4);
}
