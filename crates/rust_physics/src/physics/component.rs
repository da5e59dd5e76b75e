//! Physics component binding scene nodes to rigid bodies
//!
//! The world only ever sees [`RigidBody`] values. A [`PhysicsComponent`] is the
//! scene-side half: it creates the body from a node's placement, copies the
//! simulated translation back after each step, and deregisters on detach.

use std::sync::Arc;

use crate::foundation::math::{Transform, Vec3};
use super::collision::Shape;
use super::error::PhysicsError;
use super::rigid_body::{BodyFlags, RigidBody};
use super::world::{BodyHandle, PhysicsWorld};

/// Scene-side placement the physics core reads and writes
pub trait SceneNode {
    /// Current world-space transform
    fn world_transform(&self) -> Transform;

    /// Move the node to a new world-space translation
    fn set_world_translation(&mut self, translation: Vec3);
}

impl SceneNode for Transform {
    fn world_transform(&self) -> Transform {
        self.clone()
    }

    fn set_world_translation(&mut self, translation: Vec3) {
        self.set_translation(translation);
    }
}

/// A scene node's registration with a [`PhysicsWorld`]
///
/// Must be detached before the world is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhysicsComponent {
    handle: BodyHandle,
}

impl PhysicsComponent {
    /// Create a body at the node's placement and register it
    pub fn attach(
        world: &PhysicsWorld,
        node: &impl SceneNode,
        shape: Arc<Shape>,
        mass: f32,
        flags: BodyFlags,
    ) -> Result<Self, PhysicsError> {
        let body = RigidBody::new(shape, node.world_transform(), mass).with_flags(flags);
        let handle = world.add_rigid_body(body)?;
        Ok(Self { handle })
    }

    /// Handle of the registered body
    pub fn handle(&self) -> BodyHandle {
        self.handle
    }

    /// Copy the simulated translation onto the node
    ///
    /// Returns `false` if the body is no longer registered.
    pub fn late_update(&self, world: &PhysicsWorld, node: &mut impl SceneNode) -> bool {
        match world.with_body_mut(self.handle, |body| body.translation()) {
            Some(translation) => {
                node.set_world_translation(translation);
                true
            }
            None => false,
        }
    }

    /// Deregister the body, handing it back
    pub fn detach(self, world: &PhysicsWorld) -> Option<RigidBody> {
        world.remove_rigid_body(self.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::time::FrameParams;
    use crate::physics::collision::Oobb;
    use std::time::Duration;

    #[test]
    fn test_attach_step_detach() {
        let world = PhysicsWorld::new();
        let mut node = Transform::from_position(Vec3::new(0.0, 10.0, 0.0));
        let shape = Arc::new(Shape::Oobb(Oobb::from_half_extents(Vec3::new(1.0, 1.0, 1.0))));

        let component = PhysicsComponent::attach(&world, &node, shape, 1.0, BodyFlags::empty()).unwrap();
        world.step(&FrameParams::new(Duration::from_millis(50)));

        assert!(component.late_update(&world, &mut node));
        assert!(node.position.y < 10.0);

        let body = component.detach(&world).unwrap();
        assert_eq!(body.translation(), node.position);
        assert!(world.is_empty());
        assert!(!component.late_update(&world, &mut node));
    }

    #[test]
    fn test_attach_rejects_massless_body() {
        let world = PhysicsWorld::new();
        let shape = Arc::new(Shape::Oobb(Oobb::from_half_extents(Vec3::new(1.0, 1.0, 1.0))));
        let result = PhysicsComponent::attach(&world, &Transform::identity(), shape, 0.0, BodyFlags::WEIGHTLESS);
        assert!(result.is_err());
    }
}
