//! Primitive collision shapes and geometric helpers
//!
//! Provides the oriented box and plane primitives plus the small pieces of
//! geometry the narrow phase is built from.

use crate::foundation::math::Vec3;

/// Oriented bounding box
///
/// The three half vectors need not be unit length: each one encodes both an
/// axis direction and the extent of the box along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oobb {
    /// Center of the box
    pub center: Vec3,
    /// Mutually orthogonal half-extent vectors
    pub half_vectors: [Vec3; 3],
}

impl Oobb {
    /// Creates a box from a center and three half vectors
    pub fn new(center: Vec3, half_vectors: [Vec3; 3]) -> Self {
        Self { center, half_vectors }
    }

    /// Creates an axis-aligned box centered on the origin
    pub fn from_half_extents(extents: Vec3) -> Self {
        Self {
            center: Vec3::zeros(),
            half_vectors: [
                Vec3::x() * extents.x,
                Vec3::y() * extents.y,
                Vec3::z() * extents.z,
            ],
        }
    }

    /// Radius of the box projected onto a unit axis
    pub fn projected_radius(&self, axis: &Vec3) -> f32 {
        self.half_vectors.iter().map(|half| half.dot(axis).abs()).sum()
    }

    /// All eight corners
    ///
    /// Corner `i` takes the minus sign on half vector 0 when bit 2 of `i` is
    /// set, on half vector 1 for bit 1 and on half vector 2 for bit 0.
    pub fn corners(&self) -> [Vec3; 8] {
        let [h0, h1, h2] = self.half_vectors;
        std::array::from_fn(|i| {
            let s0 = if i & 0b100 == 0 { 1.0 } else { -1.0 };
            let s1 = if i & 0b010 == 0 { 1.0 } else { -1.0 };
            let s2 = if i & 0b001 == 0 { 1.0 } else { -1.0 };
            self.center + h0 * s0 + h1 * s1 + h2 * s2
        })
    }
}

/// An infinite plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Any point on the plane
    pub point: Vec3,
    /// Unit normal
    pub normal: Vec3,
}

impl Plane {
    /// Creates a plane through `point`, normalizing `normal`
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Signed distance from a point to the plane, positive on the normal's side
    pub fn signed_distance(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) - self.normal.dot(&self.point)
    }
}

/// Result of [`closest_points_on_segments`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentClosestPoints {
    /// Closest point on the first segment's line
    pub point_a: Vec3,
    /// Closest point on the second segment's line
    pub point_b: Vec3,
    /// Both parameters fall within their segments
    pub on_segments: bool,
}

/// Closest points between the lines through two segments
///
/// Solves the 2x2 system for the parameters along each (normalized)
/// direction; `on_segments` is set when both lie in `[0, segment length]`.
/// Parallel segments yield a singular system and non-finite parameters, which
/// always report `on_segments == false`.
pub fn closest_points_on_segments(
    start_a: Vec3,
    end_a: Vec3,
    start_b: Vec3,
    end_b: Vec3,
) -> SegmentClosestPoints {
    let span_a = end_a - start_a;
    let span_b = end_b - start_b;
    let u = span_a.normalize();
    let v = span_b.normalize();
    let w0 = start_a - start_b;

    let a = u.dot(&u);
    let b = u.dot(&v);
    let c = v.dot(&v);
    let d = u.dot(&w0);
    let e = v.dot(&w0);

    let denominator = a * c - b * b;
    let sc = (b * e - c * d) / denominator;
    let tc = (a * e - b * d) / denominator;

    SegmentClosestPoints {
        point_a: start_a + u * sc,
        point_b: start_b + v * tc,
        on_segments: (0.0..=span_a.magnitude()).contains(&sc)
            && (0.0..=span_b.magnitude()).contains(&tc),
    }
}

/// The point with the greatest projection onto `direction`
///
/// Returns the index into `points` so callers can remove it; ties go to the
/// earliest point. `None` only for an empty slice.
pub fn farthest_along(points: &[Vec3], direction: &Vec3) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .rev()
        .max_by(|(_, a), (_, b)| a.dot(direction).total_cmp(&b.dot(direction)))
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_corners_of_unit_box() {
        let oobb = Oobb::new(Vec3::new(0.0, 2.0, 0.0), [Vec3::x(), Vec3::y(), Vec3::z()]);
        let corners = oobb.corners();

        assert_eq!(corners[0], Vec3::new(1.0, 3.0, 1.0));
        assert_eq!(corners[7], Vec3::new(-1.0, 1.0, -1.0));

        let centroid = corners.iter().sum::<Vec3>() / 8.0;
        assert_relative_eq!(centroid, oobb.center, epsilon = 1e-6);
    }

    #[test]
    fn test_projected_radius() {
        let oobb = Oobb::from_half_extents(Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(oobb.projected_radius(&Vec3::y()), 2.0);

        let diagonal = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert_relative_eq!(oobb.projected_radius(&diagonal), 3.0 / 2.0_f32.sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn test_plane_signed_distance() {
        let plane = Plane::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 5.0, 0.0));
        assert_relative_eq!(plane.normal, Vec3::y());
        assert_relative_eq!(plane.signed_distance(&Vec3::new(3.0, 4.0, -2.0)), 3.0);
        assert_relative_eq!(plane.signed_distance(&Vec3::zeros()), -1.0);
    }

    #[test]
    fn test_crossing_segments() {
        let result = closest_points_on_segments(
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        );

        assert!(result.on_segments);
        assert_relative_eq!(result.point_a, Vec3::zeros(), epsilon = 1e-6);
        assert_relative_eq!(result.point_b, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_closest_points_outside_segment() {
        let result = closest_points_on_segments(
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        );

        assert!(!result.on_segments);
        assert_relative_eq!(result.point_a, Vec3::zeros(), epsilon = 1e-6);
    }

    #[test]
    fn test_parallel_segments_are_rejected() {
        let result = closest_points_on_segments(
            Vec3::zeros(),
            Vec3::x(),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        );
        assert!(!result.on_segments);
    }

    #[test]
    fn test_farthest_along() {
        let points = [Vec3::x(), Vec3::y() * 2.0, -Vec3::y()];
        assert_eq!(farthest_along(&points, &Vec3::y()), Some(1));
        assert_eq!(farthest_along(&points, &-Vec3::y()), Some(2));
        assert_eq!(farthest_along(&[], &Vec3::y()), None);
    }
}
