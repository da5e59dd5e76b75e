//! Linear dynamics
//!
//! Advances a body by one frame with classical 4th-order Runge-Kutta, one
//! axis at a time. Each axis is a (position, velocity) state whose derivative
//! is (velocity, acceleration), with acceleration held constant over the step.

use crate::foundation::math::{Vec2, Vec3};
use super::rigid_body::RigidBody;

/// One derivative sample: advance `initial` by `derivative * dt` and return
/// the derivative at that point.
fn evaluate(initial: &Vec2, dt: f32, derivative: &Vec2, acceleration: f32) -> Vec2 {
    let next = initial + derivative * dt;
    Vec2::new(next.y, acceleration)
}

/// Change in (position, velocity) along one axis over `dt`
pub fn rk4_axis_delta(position: f32, velocity: f32, acceleration: f32, dt: f32) -> Vec2 {
    let initial = Vec2::new(position, velocity);

    let k1 = evaluate(&initial, 0.0, &Vec2::zeros(), acceleration);
    let k2 = evaluate(&initial, dt * 0.5, &k1, acceleration);
    let k3 = evaluate(&initial, dt * 0.5, &k2, acceleration);
    let k4 = evaluate(&initial, dt, &k3, acceleration);

    (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
}

/// Integrate a body's translation and velocity over `dt` seconds
///
/// Drains the body's queued forces. Weightless bodies integrate with zero
/// acceleration. Static bodies are left untouched, forces included.
pub fn integrate_linear(body: &mut RigidBody, dt: f32) {
    if body.is_static() {
        return;
    }

    let force = body.drain_forces();
    let acceleration = if body.is_weightless() {
        Vec3::zeros()
    } else {
        force / body.mass
    };

    let position = body.translation();
    let mut displacement = Vec3::zeros();
    let mut velocity_change = Vec3::zeros();

    for axis in 0..3 {
        let delta = rk4_axis_delta(position[axis], body.velocity[axis], acceleration[axis], dt);
        displacement[axis] = delta.x;
        velocity_change[axis] = delta.y;
    }

    body.set_translation(position + displacement);
    body.add_linear_velocity(velocity_change);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform;
    use crate::physics::collision::{Oobb, Shape};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn body_at(position: Vec3, velocity: Vec3) -> RigidBody {
        let shape = Arc::new(Shape::Oobb(Oobb::from_half_extents(Vec3::new(0.5, 0.5, 0.5))));
        RigidBody::new(shape, Transform::from_position(position), 2.0).with_velocity(velocity)
    }

    #[test]
    fn test_zero_force_is_constant_velocity() {
        let p = Vec3::new(1.0, -2.0, 3.5);
        let v = Vec3::new(0.25, 4.0, -1.5);
        let dt = 0.1;

        let mut body = body_at(p, v);
        integrate_linear(&mut body, dt);

        assert_relative_eq!(body.translation(), p + v * dt, epsilon = 1e-6);
        assert_eq!(body.velocity, v);
    }

    #[test]
    fn test_constant_acceleration_matches_analytic() {
        let p = Vec3::new(0.0, 10.0, 0.0);
        let v = Vec3::new(3.0, 1.0, 0.0);
        let force = Vec3::new(1.0, -19.614, 0.5);
        let dt = 0.25;

        let mut body = body_at(p, v);
        body.apply_force(force);
        integrate_linear(&mut body, dt);

        let a = force / body.mass;
        assert_relative_eq!(body.translation(), p + v * dt + a * (0.5 * dt * dt), epsilon = 1e-5);
        assert_relative_eq!(body.velocity, v + a * dt, epsilon = 1e-5);
        assert_eq!(body.pending_forces(), 0);
    }

    #[test]
    fn test_weightless_ignores_force() {
        let mut body = body_at(Vec3::zeros(), Vec3::x()).make_weightless();
        body.apply_force(Vec3::new(0.0, -100.0, 0.0));
        integrate_linear(&mut body, 0.5);

        assert_relative_eq!(body.translation(), Vec3::new(0.5, 0.0, 0.0), epsilon = 1e-6);
        assert_eq!(body.velocity, Vec3::x());
        assert_eq!(body.pending_forces(), 0);
    }

    #[test]
    fn test_static_is_untouched() {
        let mut body = body_at(Vec3::new(1.0, 1.0, 1.0), Vec3::zeros()).make_static();
        integrate_linear(&mut body, 1.0);
        assert_eq!(body.translation(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_axis_delta_zero_dt() {
        assert_eq!(rk4_axis_delta(5.0, 3.0, -9.8, 0.0), Vec2::zeros());
    }
}
