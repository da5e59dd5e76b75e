//! Collision response
//!
//! Turns one detected collision into position and velocity corrections for the
//! two bodies involved. Pairs are resolved independently; there is no contact
//! manifold and no iteration.

use super::collision::CollisionInfo;
use super::rigid_body::RigidBody;

/// Separate two colliding bodies and apply the collision impulse
///
/// Each moving body backs up along its own velocity by its speed-weighted
/// share of the penetration plus `nudge`. The speed total only counts bodies
/// that are dynamic and moving; with no such body there is no positional
/// correction.
///
/// Returns `false` without touching either body when both are static.
pub fn resolve_collision(a: &mut RigidBody, b: &mut RigidBody, info: &CollisionInfo, nudge: f32) -> bool {
    if a.is_static() && b.is_static() {
        return false;
    }

    correct_positions(a, b, info.penetration, nudge);
    apply_impulse(a, b, info);
    true
}

fn is_moving(body: &RigidBody) -> bool {
    !body.is_static() && body.velocity.magnitude_squared() > 0.0
}

fn speed(body: &RigidBody) -> f32 {
    if is_moving(body) {
        body.velocity.magnitude()
    } else {
        0.0
    }
}

fn correct_positions(a: &mut RigidBody, b: &mut RigidBody, penetration: f32, nudge: f32) {
    let total_speed = speed(a) + speed(b);
    if total_speed <= 0.0 {
        return;
    }

    for body in [a, b] {
        if !is_moving(body) {
            continue;
        }

        let share = body.velocity.magnitude() / total_speed;
        let backoff = body.velocity.normalize() * (penetration * share + nudge);
        let translation = body.translation() - backoff;
        body.set_translation(translation);
    }
}

fn apply_impulse(a: &mut RigidBody, b: &mut RigidBody, info: &CollisionInfo) {
    let restitution = (a.coefficient_of_restitution + b.coefficient_of_restitution) / 2.0;
    let normal = info.normal;

    if a.is_static() {
        // Infinite mass on A
        let impulse = normal * (-(restitution + 1.0) * b.mass * b.velocity.dot(&normal));
        b.add_linear_velocity(impulse / b.mass);
    } else if b.is_static() {
        let impulse = normal * (-(restitution + 1.0) * a.mass * a.velocity.dot(&normal));
        a.add_linear_velocity(impulse / a.mass);
    } else {
        let relative = b.velocity.dot(&normal) - a.velocity.dot(&normal);
        let impulse = normal * ((restitution + 1.0) * relative / (1.0 / a.mass + 1.0 / b.mass));
        a.add_linear_velocity(impulse / a.mass);
        b.add_linear_velocity(-impulse / b.mass);
    }
}
