//! # Rust Physics
//!
//! A real-time rigid-body physics core: all-pairs broad phase, oriented box
//! and plane narrow phase, impulse-based collision response and a fixed-step
//! Runge-Kutta integrator.
//!
//! ## Features
//!
//! - **Narrow Phase**: Separating axis test for oriented boxes, box vs plane
//! - **Integration**: Per-axis 4th-order Runge-Kutta under accumulated force
//! - **Response**: Single-pair impulse resolution with positional correction
//! - **Thread-Safe World**: Body registration and stepping share one lock
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use rust_physics::prelude::*;
//!
//! let world = PhysicsWorld::new();
//!
//! let floor = RigidBody::new(
//!     Arc::new(Shape::Plane(Plane::new(Vec3::zeros(), Vec3::y()))),
//!     Transform::identity(),
//!     0.0,
//! )
//! .make_static();
//! let floor = world.add_rigid_body(floor)?;
//!
//! let crate_box = RigidBody::new(
//!     Arc::new(Shape::Oobb(Oobb::from_half_extents(Vec3::new(1.0, 1.0, 1.0)))),
//!     Transform::from_position(Vec3::new(0.0, 2.0, 0.0)),
//!     1.0,
//! );
//! let crate_box = world.add_rigid_body(crate_box)?;
//!
//! for _ in 0..60 {
//!     world.step(&FrameParams::new(Duration::from_millis(16)));
//! }
//!
//! world.remove_rigid_body(crate_box);
//! world.remove_rigid_body(floor);
//! # Ok::<(), PhysicsError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod debug;
pub mod foundation;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, PhysicsConfig},
        debug::{DebugDrawQueue, DebugShape},
        foundation::{
            math::{Quat, Transform, Vec3},
            time::{FrameParams, Stopwatch},
        },
        physics::{
            BodyFlags, BodyHandle, CollisionInfo, Contact, Oobb, PhysicsComponent, PhysicsError,
            PhysicsWorld, Plane, RigidBody, SceneNode, Shape, ShapeType,
        },
    };
}
