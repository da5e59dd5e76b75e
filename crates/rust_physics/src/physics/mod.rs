//! Rigid-body simulation
//!
//! Bodies are registered with a [`PhysicsWorld`], which each frame applies
//! gravity, integrates linear motion, tests every pair of bodies through the
//! narrow phase and resolves the collisions it finds.

pub mod collision;
pub mod component;
pub mod error;
pub mod integrator;
pub mod resolver;
pub mod rigid_body;
pub mod world;

pub use collision::{CollisionInfo, DispatchTable, Oobb, Plane, Shape, ShapeType};
pub use component::{PhysicsComponent, SceneNode};
pub use error::PhysicsError;
pub use rigid_body::{BodyFlags, RigidBody, DEFAULT_RESTITUTION};
pub use world::{BodyHandle, Contact, PhysicsWorld};
