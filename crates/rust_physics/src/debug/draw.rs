//! Debug drawing primitives and a thread-safe submission queue
//!
//! The physics step may run on a different thread than the renderer, so
//! submissions go through a queue guarded by its own lock, independent of
//! the world's body lock.

use crate::foundation::math::Vec3;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Yellow, used for contact normals
pub const CONTACT_COLOR: Vec3 = Vec3::new(1.0, 1.0, 0.0);

/// Debug shape primitives that can be rendered for visualization
#[derive(Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// Line segment from start to end
    Line {
        /// Segment start in world space
        start: Vec3,
        /// Segment end in world space
        end: Vec3,
        /// RGB color
        color: Vec3,
    },
}

/// Queue of debug shapes submitted during a frame
#[derive(Debug, Default)]
pub struct DebugDrawQueue {
    shapes: Mutex<Vec<DebugShape>>,
}

impl DebugDrawQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<DebugShape>> {
        self.shapes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Submit a line segment
    pub fn draw_line(&self, start: Vec3, end: Vec3, color: Vec3) {
        self.lock().push(DebugShape::Line { start, end, color });
    }

    /// Take every queued shape, leaving the queue empty
    pub fn drain(&self) -> Vec<DebugShape> {
        std::mem::take(&mut *self.lock())
    }

    /// Get the number of queued shapes
    pub fn shape_count(&self) -> usize {
        self.lock().len()
    }
}
