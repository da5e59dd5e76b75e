//! High-level collision shape abstractions
//!
//! Shapes are stored in model space and moved into world space on demand,
//! once per pair test, using the owning body's transform.

use crate::foundation::math::Transform;
use super::primitives::{Oobb, Plane};

/// Number of shape variants, used to size the dispatch table
pub const SHAPE_COUNT: usize = 2;

/// Discriminant of a [`Shape`], used as a dispatch table index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    /// Oriented bounding box
    Oobb = 0,
    /// Infinite plane
    Plane = 1,
}

impl ShapeType {
    /// Every shape type, in discriminant order
    pub const ALL: [Self; SHAPE_COUNT] = [Self::Oobb, Self::Plane];

    /// Row/column index into the dispatch table
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Collision shape types (stored in MODEL SPACE)
///
/// Immutable once created; bodies hold it through an `Arc` so one template can
/// back several bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Oriented box
    Oobb(Oobb),
    /// Plane
    Plane(Plane),
}

impl Shape {
    /// Discriminant used for dispatch
    pub const fn shape_type(&self) -> ShapeType {
        match self {
            Self::Oobb(_) => ShapeType::Oobb,
            Self::Plane(_) => ShapeType::Plane,
        }
    }

    /// Downcast to a box
    pub const fn as_oobb(&self) -> Option<&Oobb> {
        match self {
            Self::Oobb(oobb) => Some(oobb),
            Self::Plane(_) => None,
        }
    }

    /// Downcast to a plane
    pub const fn as_plane(&self) -> Option<&Plane> {
        match self {
            Self::Plane(plane) => Some(plane),
            Self::Oobb(_) => None,
        }
    }
}

impl Oobb {
    /// Box with its center and half vectors moved into world space
    ///
    /// Half vectors take the transform's rotation and scale.
    pub fn to_world_space(&self, transform: &Transform) -> Self {
        Self {
            center: transform.transform_point(self.center),
            half_vectors: self.half_vectors.map(|half| transform.transform_vector(half)),
        }
    }
}

impl Plane {
    /// Plane with its point and normal moved into world space
    ///
    /// The normal is only rotated so it stays unit length.
    pub fn to_world_space(&self, transform: &Transform) -> Self {
        Self {
            point: transform.transform_point(self.point),
            normal: transform.rotate_vector(self.normal),
        }
    }
}

impl From<Oobb> for Shape {
    fn from(oobb: Oobb) -> Self {
        Self::Oobb(oobb)
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Self::Plane(plane)
    }
}
