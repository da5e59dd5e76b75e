//! Physics world and simulation
//!
//! The world tracks registered bodies and advances them one frame at a time:
//! forces, integration, all-pairs detection, then resolution. Registration
//! and stepping share a single lock, so a step is atomic with respect to
//! bodies being added or removed from other threads.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info, trace};
use slotmap::{new_key_type, SlotMap};

use crate::config::PhysicsConfig;
use crate::debug::CONTACT_COLOR;
use crate::foundation::math::Vec3;
use crate::foundation::time::FrameParams;
use super::collision::{CollisionInfo, DispatchTable};
use super::error::PhysicsError;
use super::integrator::integrate_linear;
use super::resolver::resolve_collision;
use super::rigid_body::RigidBody;

new_key_type! {
    /// Handle to a body registered with a [`PhysicsWorld`]
    pub struct BodyHandle;
}

/// A pair found colliding during a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// First body of the pair
    pub body_a: BodyHandle,
    /// Second body of the pair
    pub body_b: BodyHandle,
    /// Narrow-phase result, computed before resolution
    pub info: CollisionInfo,
    /// Whether resolution changed either body this frame
    pub resolved: bool,
}

/// The physics world containing all registered rigid bodies
///
/// Every body must be removed before the world is dropped.
pub struct PhysicsWorld {
    bodies: Mutex<SlotMap<BodyHandle, RigidBody>>,
    dispatch: DispatchTable,
    config: PhysicsConfig,
}

impl PhysicsWorld {
    /// Create a world with the default configuration
    pub fn new() -> Self {
        Self::from_valid_config(PhysicsConfig::default())
    }

    /// Create a world with a custom configuration
    pub fn with_config(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: PhysicsConfig) -> Self {
        info!("Physics world created with gravity {:?}", config.gravity);
        Self {
            bodies: Mutex::new(SlotMap::with_key()),
            dispatch: DispatchTable::new(),
            config,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotMap<BodyHandle, RigidBody>> {
        self.bodies.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Configuration the world was built with
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Gravity applied each step
    pub fn gravity(&self) -> Vec3 {
        self.config.gravity
    }

    /// Register a body and return its handle
    ///
    /// Non-static bodies must have positive mass.
    pub fn add_rigid_body(&self, body: RigidBody) -> Result<BodyHandle, PhysicsError> {
        if !body.is_static() && !(body.mass > 0.0) {
            return Err(PhysicsError::NonPositiveMass { mass: body.mass });
        }

        let shape_type = body.shape.shape_type();
        let handle = self.lock().insert(body);
        debug!("Added {shape_type:?} body {handle:?}");
        Ok(handle)
    }

    /// Deregister a body, handing it back
    ///
    /// Unknown handles are ignored.
    pub fn remove_rigid_body(&self, handle: BodyHandle) -> Option<RigidBody> {
        let removed = self.lock().remove(handle);
        if removed.is_some() {
            debug!("Removed body {handle:?}");
        }
        removed
    }

    /// Snapshot of a registered body
    pub fn body(&self, handle: BodyHandle) -> Option<RigidBody> {
        self.lock().get(handle).cloned()
    }

    /// Run `f` on a registered body while holding the world lock
    ///
    /// `f` must not call back into this world: the lock is not reentrant, so
    /// any other world method called from inside `f` deadlocks or panics.
    pub fn with_body_mut<R>(&self, handle: BodyHandle, f: impl FnOnce(&mut RigidBody) -> R) -> Option<R> {
        self.lock().get_mut(handle).map(f)
    }

    /// Number of registered bodies
    pub fn body_count(&self) -> usize {
        self.lock().len()
    }

    /// Whether no bodies are registered
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Advance the simulation by one frame
    ///
    /// Holds the world lock for the whole call. Collisions are always detected
    /// and reported; they are resolved only when the frame has elapsed time or
    /// is an explicit single step.
    ///
    /// # Panics
    ///
    /// Panics if two registered bodies form a shape pair with no intersection
    /// test.
    pub fn step(&self, params: &FrameParams) -> Vec<Contact> {
        let mut bodies = self.lock();
        let dt = params.delta_seconds();

        for body in bodies.values_mut() {
            if body.is_static() {
                body.drain_forces();
                continue;
            }

            if !body.is_weightless() {
                body.apply_force(self.config.gravity);
            }

            integrate_linear(body, dt);
        }

        let contacts = self.test_intersections(&mut bodies, params);
        trace!("Stepped {} bodies over {dt}s, {} contacts", bodies.len(), contacts.len());
        contacts
    }

    /// Test every unordered pair, resolving each collision as it is found
    fn test_intersections(
        &self,
        bodies: &mut SlotMap<BodyHandle, RigidBody>,
        params: &FrameParams,
    ) -> Vec<Contact> {
        let handles: Vec<BodyHandle> = bodies.keys().collect();
        let resolve = params.should_resolve();
        let mut contacts = Vec::new();

        for (i, &handle_a) in handles.iter().enumerate() {
            for &handle_b in &handles[i + 1..] {
                let Some([a, b]) = bodies.get_disjoint_mut([handle_a, handle_b]) else {
                    continue;
                };

                let Some(info) = self.dispatch.test(&a.shape, &a.transform, &b.shape, &b.transform) else {
                    continue;
                };

                trace!(
                    "Collision {handle_a:?} / {handle_b:?}: normal {:?}, depth {}, point {:?}",
                    info.normal,
                    info.penetration,
                    info.point
                );

                if self.config.debug_draw {
                    if let Some(queue) = &params.debug_draw {
                        queue.draw_line(info.point, info.point + info.normal, CONTACT_COLOR);
                    }
                }

                let resolved = resolve && resolve_collision(a, b, &info, self.config.position_nudge);

                contacts.push(Contact {
                    body_a: handle_a,
                    body_b: handle_b,
                    info,
                    resolved,
                });
            }
        }

        contacts
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("bodies", &self.body_count())
            .field("dispatch", &self.dispatch)
            .field("config", &self.config)
            .finish()
    }
}

impl Drop for PhysicsWorld {
    fn drop(&mut self) {
        let remaining = self.bodies.get_mut().unwrap_or_else(PoisonError::into_inner).len();
        if remaining > 0 && !std::thread::panicking() {
            panic!("physics world dropped with {remaining} bodies still registered");
        }
        info!("Physics world shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::{DebugDrawQueue, DebugShape};
    use crate::foundation::math::Transform;
    use crate::physics::collision::{Oobb, Plane, Shape};
    use crate::physics::rigid_body::BodyFlags;
    use approx::assert_relative_eq;
    use std::sync::Arc;
    use std::time::Duration;

    fn unit_box() -> Arc<Shape> {
        Arc::new(Shape::Oobb(Oobb::from_half_extents(Vec3::new(1.0, 1.0, 1.0))))
    }

    fn floor() -> RigidBody {
        let plane = Arc::new(Shape::Plane(Plane::new(Vec3::zeros(), Vec3::y())));
        RigidBody::new(plane, Transform::identity(), 0.0).make_static()
    }

    fn clear(world: &PhysicsWorld, handles: &[BodyHandle]) {
        for &handle in handles {
            world.remove_rigid_body(handle);
        }
    }

    #[test]
    fn test_add_and_remove() {
        let world = PhysicsWorld::new();
        assert!(world.is_empty());

        let a = world.add_rigid_body(RigidBody::new(unit_box(), Transform::identity(), 1.0)).unwrap();
        let b = world.add_rigid_body(floor()).unwrap();
        assert_eq!(world.body_count(), 2);

        assert!(world.remove_rigid_body(a).is_some());
        assert!(world.remove_rigid_body(a).is_none());
        assert_eq!(world.body_count(), 1);

        clear(&world, &[b]);
        assert!(world.is_empty());
    }

    #[test]
    fn test_rejects_massless_dynamic_body() {
        let world = PhysicsWorld::new();
        let result = world.add_rigid_body(RigidBody::new(unit_box(), Transform::identity(), 0.0));
        assert!(matches!(result, Err(PhysicsError::NonPositiveMass { .. })));
        assert!(world.is_empty());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = PhysicsConfig::default().with_position_nudge(-0.5);
        assert!(matches!(PhysicsWorld::with_config(config), Err(PhysicsError::Config(_))));
    }

    #[test]
    fn test_gravity_and_weightless() {
        let world = PhysicsWorld::new();
        let falling = world.add_rigid_body(RigidBody::new(unit_box(), Transform::from_position(Vec3::new(0.0, 50.0, 0.0)), 1.0)).unwrap();
        let floating = world
            .add_rigid_body(RigidBody::new(unit_box(), Transform::from_position(Vec3::new(10.0, 50.0, 0.0)), 1.0).make_weightless())
            .unwrap();

        let contacts = world.step(&FrameParams::new(Duration::from_millis(100)));
        assert!(contacts.is_empty());

        let falling_body = world.body(falling).unwrap();
        assert_relative_eq!(falling_body.velocity.y, -0.9807, epsilon = 1e-5);
        assert_relative_eq!(falling_body.translation().y, 50.0 - 0.5 * 9.807 * 0.01, epsilon = 1e-4);
        assert_eq!(falling_body.pending_forces(), 0);

        let floating_body = world.body(floating).unwrap();
        assert_eq!(floating_body.translation(), Vec3::new(10.0, 50.0, 0.0));

        clear(&world, &[falling, floating]);
    }

    #[test]
    fn test_paused_frame_detects_without_resolving() {
        let world = PhysicsWorld::new();
        let ground = world.add_rigid_body(floor()).unwrap();
        let sunk = world
            .add_rigid_body(
                RigidBody::new(unit_box(), Transform::from_position(Vec3::new(0.0, 0.5, 0.0)), 1.0)
                    .with_velocity(Vec3::new(0.0, -2.0, 0.0)),
            )
            .unwrap();

        let contacts = world.step(&FrameParams::paused());
        assert_eq!(contacts.len(), 1);
        assert!(!contacts[0].resolved);
        assert_relative_eq!(contacts[0].info.penetration, 0.5, epsilon = 1e-5);

        let body = world.body(sunk).unwrap();
        assert_eq!(body.velocity, Vec3::new(0.0, -2.0, 0.0));
        assert_eq!(body.translation(), Vec3::new(0.0, 0.5, 0.0));

        let contacts = world.step(&FrameParams::single_step());
        assert!(contacts[0].resolved);
        assert!(world.body(sunk).unwrap().velocity.y > 0.0);

        clear(&world, &[ground, sunk]);
    }

    #[test]
    fn test_debug_draw_contacts() {
        let world = PhysicsWorld::with_config(PhysicsConfig::default().with_debug_draw(true)).unwrap();
        let ground = world.add_rigid_body(floor()).unwrap();
        let sunk = world
            .add_rigid_body(RigidBody::new(unit_box(), Transform::from_position(Vec3::new(0.0, 0.5, 0.0)), 1.0))
            .unwrap();

        let queue = Arc::new(DebugDrawQueue::new());
        world.step(&FrameParams::paused().with_debug_draw(Arc::clone(&queue)));

        let shapes = queue.drain();
        assert_eq!(shapes.len(), 1);
        let DebugShape::Line { start, end, color } = shapes[0];
        assert_relative_eq!(end - start, Vec3::y(), epsilon = 1e-6);
        assert_eq!(color, CONTACT_COLOR);

        clear(&world, &[ground, sunk]);
    }

    #[test]
    fn test_frozen_body_drops_queued_forces() {
        let world = PhysicsWorld::new();
        let mut body = RigidBody::new(unit_box(), Transform::from_position(Vec3::new(0.0, 5.0, 0.0)), 1.0);
        body.apply_force(Vec3::x());
        body.apply_force(Vec3::z());
        let frozen = world.add_rigid_body(body).unwrap();

        world.with_body_mut(frozen, |body| body.flags |= BodyFlags::STATIC).unwrap();
        for _ in 0..5 {
            world.with_body_mut(frozen, |body| body.apply_force(Vec3::x())).unwrap();
            world.step(&FrameParams::new(Duration::from_millis(16)));
        }

        let body = world.body(frozen).unwrap();
        assert_eq!(body.pending_forces(), 0);
        assert_eq!(body.translation(), Vec3::new(0.0, 5.0, 0.0));

        clear(&world, &[frozen]);
    }

    #[test]
    fn test_static_pair_is_reported_unresolved() {
        let world = PhysicsWorld::new();
        let a = world.add_rigid_body(RigidBody::new(unit_box(), Transform::identity(), 0.0).make_static()).unwrap();
        let b = world
            .add_rigid_body(RigidBody::new(unit_box(), Transform::from_position(Vec3::new(1.5, 0.0, 0.0)), 0.0).make_static())
            .unwrap();

        let contacts = world.step(&FrameParams::new(Duration::from_millis(16)));
        assert_eq!(contacts.len(), 1);
        assert!(!contacts[0].resolved);

        clear(&world, &[a, b]);
    }

    #[test]
    #[should_panic(expected = "still registered")]
    fn test_drop_with_bodies_is_fatal() {
        let world = PhysicsWorld::new();
        world.add_rigid_body(floor()).unwrap();
    }

    #[test]
    #[should_panic(expected = "no intersection test")]
    fn test_unwired_pair_is_fatal() {
        let world = PhysicsWorld::new();
        world.add_rigid_body(floor()).unwrap();
        world.add_rigid_body(floor()).unwrap();
        world.step(&FrameParams::new(Duration::from_millis(16)));
    }
}
