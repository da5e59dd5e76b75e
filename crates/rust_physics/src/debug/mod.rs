//! Debug module for visualizing collisions
//!
//! Contact normals are emitted as line records into a queue that the
//! renderer drains once per frame.

pub mod draw;

pub use draw::{DebugDrawQueue, DebugShape, CONTACT_COLOR};
