//! Rigid body state
//!
//! A [`RigidBody`] carries everything the world needs to simulate one entity:
//! its placement, linear velocity, pending forces, mass, restitution, flags and
//! a shared reference to its model-space collision shape.

use std::sync::Arc;

use bitflags::bitflags;

use crate::foundation::math::{Transform, Vec3};
use super::collision::Shape;

/// Restitution used when none is given
pub const DEFAULT_RESTITUTION: f32 = 0.5;

bitflags! {
    /// Simulation flags for a rigid body
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BodyFlags: u32 {
        /// Never moves; receives no gravity or impulses
        const STATIC = 1 << 0;
        /// Receives no gravity but is otherwise simulated
        const WEIGHTLESS = 1 << 1;
    }
}

/// Dynamic physical state of one entity
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// World-space placement, written by the integrator and the resolver
    pub transform: Transform,

    /// Linear velocity in units per second
    pub velocity: Vec3,

    /// Mass; must be positive for bodies that are not static
    pub mass: f32,

    /// Bounciness in [0, 1]
    pub coefficient_of_restitution: f32,

    /// Static / weightless flags
    pub flags: BodyFlags,

    /// Model-space collision geometry
    pub shape: Arc<Shape>,

    forces: Vec<Vec3>,
}

impl RigidBody {
    /// Create a dynamic body at rest
    pub fn new(shape: Arc<Shape>, transform: Transform, mass: f32) -> Self {
        Self {
            transform,
            velocity: Vec3::zeros(),
            mass,
            coefficient_of_restitution: DEFAULT_RESTITUTION,
            flags: BodyFlags::empty(),
            shape,
            forces: Vec::new(),
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the coefficient of restitution
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.coefficient_of_restitution = restitution;
        self
    }

    /// Replace the flag set
    pub fn with_flags(mut self, flags: BodyFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mark the body static
    pub fn make_static(mut self) -> Self {
        self.flags |= BodyFlags::STATIC;
        self
    }

    /// Mark the body weightless
    pub fn make_weightless(mut self) -> Self {
        self.flags |= BodyFlags::WEIGHTLESS;
        self
    }

    /// Whether the body is static
    pub fn is_static(&self) -> bool {
        self.flags.contains(BodyFlags::STATIC)
    }

    /// Whether the body ignores gravity
    pub fn is_weightless(&self) -> bool {
        self.flags.contains(BodyFlags::WEIGHTLESS)
    }

    /// Queue a force for the next step; ignored for static bodies
    pub fn apply_force(&mut self, force: Vec3) {
        if !self.is_static() {
            self.forces.push(force);
        }
    }

    /// Number of forces queued since the last step
    pub fn pending_forces(&self) -> usize {
        self.forces.len()
    }

    /// Sum and clear the queued forces
    ///
    /// The buffer keeps its allocation for the next frame.
    pub fn drain_forces(&mut self) -> Vec3 {
        self.forces.drain(..).sum()
    }

    /// Add to the linear velocity; ignored for static bodies
    pub fn add_linear_velocity(&mut self, delta: Vec3) {
        if !self.is_static() {
            self.velocity += delta;
        }
    }

    /// World-space translation
    pub fn translation(&self) -> Vec3 {
        self.transform.translation()
    }

    /// Move the body, keeping rotation and scale
    pub fn set_translation(&mut self, translation: Vec3) {
        self.transform.set_translation(translation);
    }
}
