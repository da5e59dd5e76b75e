//! Narrow-phase collision detection for oriented boxes and planes
//!
//! # Architecture
//!
//! - **Model Space Storage**: Shapes are stored in local coordinates
//! - **On-Demand Transformation**: Shapes move into world space only during tests
//! - **Pairwise Dispatch**: A table keyed by shape-type pair selects each test
//!
//! # Module Organization
//!
//! - [`primitives`] - Boxes, planes and segment geometry
//! - [`shape`] - Tagged shape variants and world-space placement
//! - [`narrow_phase`] - Intersection tests, contact points and the dispatch table

pub mod narrow_phase;
pub mod primitives;
pub mod shape;

pub use narrow_phase::{
    oobb_vs_plane, separating_axis_test, CollisionInfo, DispatchTable, IntersectionFn,
    FACE_ALIGNMENT_THRESHOLD,
};
pub use primitives::{closest_points_on_segments, farthest_along, Oobb, Plane, SegmentClosestPoints};
pub use shape::{Shape, ShapeType, SHAPE_COUNT};
