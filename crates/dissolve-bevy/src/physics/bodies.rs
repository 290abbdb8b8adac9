//! Collider and rigid-body mapping for pixel descriptors.

use bevy_ecs::system::EntityCommands;
use bevy_math::Vec2;
use bevy_rapier2d::prelude::*;
use dissolve_core::{ColliderShape, MotionConstraints, PixelEntity};

/// Angular damping given to every pixel body.
const ANGULAR_DAMPING: f32 = 0.05;

/// Collider sized for a single pixel of edge `size`.
pub fn pixel_collider(shape: ColliderShape, size: f32) -> Collider {
    let half = size * 0.5;
    match shape {
        ColliderShape::Circle => Collider::ball(half),
        ColliderShape::Box => Collider::cuboid(half, half),
    }
}

pub fn locked_axes(constraints: MotionConstraints) -> LockedAxes {
    let mut axes = LockedAxes::empty();
    if constraints.freeze_position_x {
        axes |= LockedAxes::TRANSLATION_LOCKED_X;
    }
    if constraints.freeze_position_y {
        axes |= LockedAxes::TRANSLATION_LOCKED_Y;
    }
    if constraints.freeze_rotation {
        axes |= LockedAxes::ROTATION_LOCKED;
    }
    axes
}

/// Attach the collider, body and one-shot impulse described by `pixel`.
///
/// Bodies weigh one unit regardless of collider size, so the impulse magnitude equals the
/// resulting speed.
pub fn insert_pixel_physics(entity: &mut EntityCommands<'_>, pixel: &PixelEntity) {
    if let Some(shape) = pixel.collider {
        entity.insert(pixel_collider(shape, pixel.size));
        if pixel.body.is_some() {
            entity.insert(ColliderMassProperties::Density(0.0));
        }
    }

    let Some(body) = pixel.body else {
        return;
    };

    entity.insert((
        RigidBody::Dynamic,
        AdditionalMassProperties::Mass(1.0),
        Damping {
            linear_damping: body.drag,
            angular_damping: ANGULAR_DAMPING,
        },
        GravityScale(body.gravity_scale),
        locked_axes(body.constraints),
        ExternalImpulse {
            impulse: Vec2::new(body.impulse.x, body.impulse.y),
            torque_impulse: 0.0,
        },
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freeze_rotation_locks_only_rotation() {
        let axes = locked_axes(MotionConstraints::FREEZE_ROTATION);
        assert!(axes.contains(LockedAxes::ROTATION_LOCKED));
        assert!(!axes.contains(LockedAxes::TRANSLATION_LOCKED_X));
        assert!(!axes.contains(LockedAxes::TRANSLATION_LOCKED_Y));
    }

    #[test]
    fn no_constraints_leave_body_free() {
        assert!(locked_axes(MotionConstraints::NONE).is_empty());
    }
}
