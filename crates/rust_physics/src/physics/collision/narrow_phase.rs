//! Narrow-phase intersection tests
//!
//! Each test takes two model-space shapes with their owners' transforms and
//! returns a [`CollisionInfo`] when they interpenetrate. Tests are selected by
//! shape-type pair through a [`DispatchTable`] built once per world.

use crate::foundation::math::{Transform, Vec3, EPSILON};
use super::primitives::{closest_points_on_segments, farthest_along, Oobb, Plane};
use super::shape::{Shape, ShapeType, SHAPE_COUNT};

/// Box axes closer than this |cos| count as parallel faces
pub const FACE_ALIGNMENT_THRESHOLD: f32 = 0.95;

/// Candidate axes shorter than this are degenerate (parallel cross products)
const MIN_AXIS_LENGTH: f32 = 1.0e-6;

/// Result of a single narrow-phase test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    /// Unit direction of minimum separation
    pub normal: Vec3,
    /// Depth along `normal`, never negative
    pub penetration: f32,
    /// World-space contact location
    pub point: Vec3,
}

/// Signature shared by every pairwise test
pub type IntersectionFn = fn(&Shape, &Transform, &Shape, &Transform) -> Option<CollisionInfo>;

/// Lookup from (shape type, shape type) to the test handling that pair
///
/// Built once; pairs without a test are fatal when reached.
#[derive(Clone)]
pub struct DispatchTable {
    entries: [[Option<IntersectionFn>; SHAPE_COUNT]; SHAPE_COUNT],
}

impl DispatchTable {
    /// Table with the box-box and box-plane tests wired in both orders
    pub fn new() -> Self {
        let mut entries = [[None; SHAPE_COUNT]; SHAPE_COUNT];
        let oobb = ShapeType::Oobb.index();
        let plane = ShapeType::Plane.index();

        entries[oobb][oobb] = Some(separating_axis_test as IntersectionFn);
        entries[plane][oobb] = Some(oobb_vs_plane as IntersectionFn);
        entries[oobb][plane] = Some(oobb_vs_plane as IntersectionFn);

        Self { entries }
    }

    /// The test registered for a pair, if any
    pub fn lookup(&self, a: ShapeType, b: ShapeType) -> Option<IntersectionFn> {
        self.entries[a.index()][b.index()]
    }

    /// Run the registered test for two shapes
    ///
    /// # Panics
    ///
    /// Panics if no test is registered for the pair. Reaching an unwired pair
    /// is a configuration error, not a runtime condition.
    pub fn test(
        &self,
        a: &Shape,
        transform_a: &Transform,
        b: &Shape,
        transform_b: &Transform,
    ) -> Option<CollisionInfo> {
        match self.lookup(a.shape_type(), b.shape_type()) {
            Some(test) => test(a, transform_a, b, transform_b),
            None => unsupported_pair(a.shape_type(), b.shape_type()),
        }
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut wired = f.debug_list();
        for a in ShapeType::ALL {
            for b in ShapeType::ALL {
                if self.lookup(a, b).is_some() {
                    wired.entry(&(a, b));
                }
            }
        }
        wired.finish()
    }
}

#[cold]
fn unsupported_pair(a: ShapeType, b: ShapeType) -> ! {
    panic!("no intersection test for shape pair ({a:?}, {b:?})")
}

/// Oriented box vs plane, in either argument order
pub fn oobb_vs_plane(
    a: &Shape,
    transform_a: &Transform,
    b: &Shape,
    transform_b: &Transform,
) -> Option<CollisionInfo> {
    let (oobb, plane) = match (a, b) {
        (Shape::Oobb(oobb), Shape::Plane(plane)) => {
            (oobb.to_world_space(transform_a), plane.to_world_space(transform_b))
        }
        (Shape::Plane(plane), Shape::Oobb(oobb)) => {
            (oobb.to_world_space(transform_b), plane.to_world_space(transform_a))
        }
        _ => unsupported_pair(a.shape_type(), b.shape_type()),
    };

    world_oobb_vs_plane(&oobb, &plane)
}

/// Box vs plane with both already in world space
///
/// The contact point averages the deepest corners (a face or edge yields its
/// midpoint) and is then pushed out along the normal by the penetration.
pub fn world_oobb_vs_plane(oobb: &Oobb, plane: &Plane) -> Option<CollisionInfo> {
    let radius = oobb.projected_radius(&plane.normal);
    let distance = plane.signed_distance(&oobb.center);

    if distance >= radius {
        return None;
    }

    let penetration = radius - distance;
    let corners = oobb.corners();
    let depths = corners.map(|corner| plane.signed_distance(&corner));
    let deepest = depths.iter().copied().fold(f32::INFINITY, f32::min);

    let (sum, count) = corners
        .iter()
        .zip(depths)
        .filter(|(_, depth)| (depth - deepest).abs() <= EPSILON)
        .fold((Vec3::zeros(), 0.0_f32), |(sum, count), (corner, _)| (sum + corner, count + 1.0));

    Some(CollisionInfo {
        normal: plane.normal,
        penetration,
        point: sum / count + plane.normal * penetration,
    })
}

/// Oriented box vs oriented box using the separating axis theorem
pub fn separating_axis_test(
    a: &Shape,
    transform_a: &Transform,
    b: &Shape,
    transform_b: &Transform,
) -> Option<CollisionInfo> {
    let (Some(oobb_a), Some(oobb_b)) = (a.as_oobb(), b.as_oobb()) else {
        unsupported_pair(a.shape_type(), b.shape_type())
    };

    world_oobb_vs_oobb(&oobb_a.to_world_space(transform_a), &oobb_b.to_world_space(transform_b))
}

/// The 15 SAT candidates: A's three axes, B's three, then `a[i] x b[j]` at `6 + 3i + j`
fn candidate_axes(a: &Oobb, b: &Oobb) -> [Vec3; 15] {
    std::array::from_fn(|index| match index {
        0..=2 => a.half_vectors[index],
        3..=5 => b.half_vectors[index - 3],
        _ => {
            let cross = index - 6;
            a.half_vectors[cross / 3].cross(&b.half_vectors[cross % 3])
        }
    })
}

/// Separating axis test with both boxes already in world space
pub fn world_oobb_vs_oobb(a: &Oobb, b: &Oobb) -> Option<CollisionInfo> {
    let mut best: Option<(usize, Vec3, f32)> = None;

    for (index, axis) in candidate_axes(a, b).iter().enumerate() {
        let Some(axis) = axis.try_normalize(MIN_AXIS_LENGTH) else {
            continue;
        };

        let radius_a = a.projected_radius(&axis);
        let radius_b = b.projected_radius(&axis);
        let center_a = a.center.dot(&axis);
        let center_b = b.center.dot(&axis);

        let sum = 2.0 * (radius_a + radius_b);
        let length = (center_a + radius_a).max(center_b + radius_b)
            - (center_a - radius_a).min(center_b - radius_b);

        if length > sum {
            return None;
        }

        let margin = sum - length;
        if best.map_or(true, |(_, _, min)| margin < min) {
            best = Some((index, axis, margin));
        }
    }

    let (index, normal, penetration) = best?;

    Some(CollisionInfo {
        normal,
        penetration,
        point: separating_axis_contact_point(a, b, index),
    })
}

/// The four corners of `oobb` farthest along `direction`, in order
fn closest_corners(oobb: &Oobb, direction: &Vec3) -> [Vec3; 4] {
    let mut remaining = oobb.corners().to_vec();
    let mut picked = [oobb.center; 4];

    for slot in &mut picked {
        if let Some(index) = farthest_along(&remaining, direction) {
            *slot = remaining.remove(index);
        }
    }

    picked
}

fn is_face_aligned(axis: &Vec3, others: &[Vec3; 3]) -> bool {
    let axis = axis.normalize();
    others
        .iter()
        .any(|other| axis.dot(&other.normalize()).abs() > FACE_ALIGNMENT_THRESHOLD)
}

/// Two candidate edges from a box's four nearest corners
///
/// The first edge starts at the nearest corner and runs along `half_vector`.
fn candidate_edges(corners: &[Vec3; 4], half_vector: &Vec3) -> [[Vec3; 2]; 2] {
    let [primary, secondary, tertiary, quaternary] = *corners;
    let along = (primary - secondary)
        .try_normalize(MIN_AXIS_LENGTH)
        .is_some_and(|edge| (edge.dot(&half_vector.normalize()).abs() - 1.0).abs() <= EPSILON);

    if along {
        [[primary, secondary], [tertiary, quaternary]]
    } else {
        [[primary, tertiary], [secondary, quaternary]]
    }
}

/// Contact point for a box-box collision whose minimum axis is `axis_index`
fn separating_axis_contact_point(a: &Oobb, b: &Oobb, axis_index: usize) -> Vec3 {
    let a_to_b = b.center - a.center;
    let corners_a = closest_corners(a, &a_to_b);
    let corners_b = closest_corners(b, &-a_to_b);

    let average = |corners: &[Vec3; 4]| corners.iter().sum::<Vec3>() * 0.25;

    match axis_index {
        // Face of A
        0..=2 => {
            if is_face_aligned(&a.half_vectors[axis_index], &b.half_vectors) {
                average(&corners_b)
            } else {
                corners_b[0]
            }
        }
        // Face of B
        3..=5 => {
            if is_face_aligned(&b.half_vectors[axis_index - 3], &a.half_vectors) {
                average(&corners_a)
            } else {
                corners_a[0]
            }
        }
        // Edge of A against edge of B
        _ => {
            let cross = axis_index - 6;
            let edges_a = candidate_edges(&corners_a, &a.half_vectors[cross / 3]);
            let edges_b = candidate_edges(&corners_b, &b.half_vectors[cross % 3]);

            let mut closest: Option<(f32, Vec3)> = None;
            for [start_a, end_a] in edges_a {
                for [start_b, end_b] in edges_b {
                    let result = closest_points_on_segments(start_a, end_a, start_b, end_b);
                    if !result.on_segments {
                        continue;
                    }

                    let distance = (result.point_a - result.point_b).magnitude();
                    if closest.map_or(true, |(min, _)| distance < min) {
                        closest = Some((distance, (result.point_a + result.point_b) * 0.5));
                    }
                }
            }

            closest.map_or_else(|| (corners_a[0] + corners_b[0]) * 0.5, |(_, point)| point)
        }
    }
}
