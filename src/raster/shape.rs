//! Shape outlines and planar helpers built on `kurbo`.

use kurbo::{BezPath, Circle, Shape};

use crate::foundation::core::{Affine, Point, Vec2};

pub const SHAPE_NAMES: &[&str] = &["Square", "Circle", "Hexagon", "Diamond", "Cross"];

/// Flattening tolerance for curved outlines, in pixels.
pub const PATH_TOLERANCE: f64 = 0.1;
/// Arm thickness of the cross relative to its size.
const CROSS_ARM: f64 = 1.0 / 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxShape {
    Square,
    Circle,
    Hexagon,
    Diamond,
    Cross,
}

impl BoxShape {
    pub fn from_index(i: usize) -> Self {
        match i {
            0 => Self::Square,
            1 => Self::Circle,
            2 => Self::Hexagon,
            3 => Self::Diamond,
            _ => Self::Cross,
        }
    }

    /// Closed outline of the shape of side/diameter `size`, centered on `center` and rotated
    /// by `angle_rad`. The cross is a single outline around the union of its two bars.
    pub fn path(self, center: Point, size: f64, angle_rad: f64) -> BezPath {
        let h = size / 2.0;
        let local: Vec<Point> = match self {
            Self::Circle => return Circle::new(center, h).to_path(PATH_TOLERANCE),
            Self::Square => vec![
                Point::new(-h, -h),
                Point::new(h, -h),
                Point::new(h, h),
                Point::new(-h, h),
            ],
            Self::Hexagon => (0..6)
                .map(|i| {
                    let a = std::f64::consts::FRAC_PI_3 * f64::from(i);
                    Point::new(h * a.cos(), h * a.sin())
                })
                .collect(),
            Self::Diamond => vec![
                Point::new(0.0, -h),
                Point::new(h, 0.0),
                Point::new(0.0, h),
                Point::new(-h, 0.0),
            ],
            Self::Cross => {
                let a = size * CROSS_ARM / 2.0;
                [
                    (-a, -h),
                    (a, -h),
                    (a, -a),
                    (h, -a),
                    (h, a),
                    (a, a),
                    (a, h),
                    (-a, h),
                    (-a, a),
                    (-h, a),
                    (-h, -a),
                    (-a, -a),
                ]
                .into_iter()
                .map(|(x, y)| Point::new(x, y))
                .collect()
            }
        };
        let xf = Affine::translate(center.to_vec2()) * Affine::rotate(angle_rad);
        let mut path = polygon_path(&local);
        path.apply_affine(xf);
        path
    }
}

/// Closed polyline through `points`. Empty for fewer than two points.
pub fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = points.split_first() else {
        return path;
    };
    if rest.is_empty() {
        return path;
    }
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    path.close_path();
    path
}

/// Orders points by polar angle around `center`. Connecting them in this order gives a
/// star-shaped, non-self-intersecting loop.
pub fn sort_by_polar_angle(points: &mut [Point], center: Point) {
    points.sort_by(|a, b| {
        let ta = angle_of(*a - center);
        let tb = angle_of(*b - center);
        ta.total_cmp(&tb)
            .then_with(|| (*a - center).hypot2().total_cmp(&(*b - center).hypot2()))
    });
}

/// Orders `points` into a closed, non-self-intersecting loop.
///
/// Points are sorted by polar angle around `center`. If `center` does not lie strictly inside
/// the points' hull (some angular gap reaches half a turn) the closing edge could cut across
/// the loop, so the points are re-sorted around their centroid instead.
pub fn order_as_simple_loop(points: &mut [Point], center: Point) {
    sort_by_polar_angle(points, center);
    if points.len() < 4 || max_angular_gap(points, center) < std::f64::consts::PI {
        return;
    }
    let sum = points
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    let centroid = (sum / points.len() as f64).to_point();
    sort_by_polar_angle(points, centroid);
}

/// Largest angle between consecutive angle-sorted points, wrapping around.
fn max_angular_gap(sorted: &[Point], center: Point) -> f64 {
    let angles: Vec<f64> = sorted.iter().map(|p| angle_of(*p - center)).collect();
    let mut gap = angles[0] + std::f64::consts::TAU - angles[angles.len() - 1];
    for w in angles.windows(2) {
        gap = gap.max(w[1] - w[0]);
    }
    gap
}

fn angle_of(v: Vec2) -> f64 {
    v.y.atan2(v.x)
}

/// Proper or touching intersection of segments `p1p2` and `p3p4`.
pub fn segments_intersect(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    fn orient(a: Point, b: Point, c: Point) -> f64 {
        (b - a).cross(c - a)
    }
    fn on_segment(a: Point, b: Point, p: Point) -> bool {
        p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
    }

    let d1 = orient(p3, p4, p1);
    let d2 = orient(p3, p4, p2);
    let d3 = orient(p1, p2, p3);
    let d4 = orient(p1, p2, p4);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    (d1 == 0.0 && on_segment(p3, p4, p1))
        || (d2 == 0.0 && on_segment(p3, p4, p2))
        || (d3 == 0.0 && on_segment(p1, p2, p3))
        || (d4 == 0.0 && on_segment(p1, p2, p4))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/shape.rs"]
mod tests;
