use super::*;
use crate::foundation::core::Point;
use crate::raster::shape;

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
    shape::polygon_path(&[
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ])
}

fn region(x: u32, y: u32, width: u32, height: u32) -> PixelRect {
    PixelRect {
        x,
        y,
        width,
        height,
    }
}

#[test]
fn axis_aligned_square_covers_exact_pixels() {
    let mask = Mask::from_paths(region(0, 0, 10, 10), &[square(2.0, 3.0, 6.0, 5.0)]).unwrap();
    assert_eq!(mask.covered(), 4 * 2);
    assert_eq!(mask.coverage(2, 3), 255);
    assert!(mask.contains(5, 4));
    assert!(!mask.contains(6, 4));
    assert!(!mask.contains(2, 5));
}

#[test]
fn union_of_overlapping_paths_counts_once() {
    let mask = Mask::from_paths(
        region(0, 0, 10, 10),
        &[square(0.0, 0.0, 4.0, 4.0), square(2.0, 2.0, 6.0, 6.0)],
    )
    .unwrap();
    assert_eq!(mask.covered(), 16 + 16 - 4);
}

#[test]
fn paths_are_clipped_to_the_region() {
    let mask = Mask::from_paths(region(0, 0, 4, 4), &[square(-5.0, -5.0, 2.0, 20.0)]).unwrap();
    assert_eq!(mask.covered(), 2 * 4);
    assert!(!mask.contains(9, 9));
    assert_eq!(mask.coverage(9, 9), 0);
}

#[test]
fn mask_coordinates_are_region_relative() {
    let mask = Mask::from_paths(region(10, 20, 4, 4), &[square(10.0, 20.0, 12.0, 22.0)]).unwrap();
    assert_eq!((mask.width(), mask.height()), (4, 4));
    assert!(mask.contains(0, 0));
    assert!(mask.contains(1, 1));
    assert!(!mask.contains(2, 2));
}

#[test]
fn half_covered_edge_pixel_has_partial_coverage() {
    let mask = Mask::from_paths(region(0, 0, 4, 1), &[square(0.0, 0.0, 1.5, 1.0)]).unwrap();
    let c = mask.coverage(1, 0);
    assert!(c > 64 && c < 192, "{c}");
}

#[test]
fn degenerate_paths_cover_nothing() {
    let mut line = BezPath::new();
    line.move_to(Point::new(0.0, 0.0));
    line.line_to(Point::new(3.0, 3.0));
    let mask = Mask::from_paths(region(0, 0, 4, 4), &[line]).unwrap();
    assert_eq!(mask.covered(), 0);
    assert_eq!(Mask::empty(3, 3).covered(), 0);
}
