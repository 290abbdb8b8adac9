//! Per-invocation dissolve configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ConfigError, MinMax, Vec2};

/// Collision primitive attached to each pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ColliderShape {
    Circle,
    Box,
}

/// Axes a pixel body is not allowed to move along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConstraints {
    pub freeze_position_x: bool,
    pub freeze_position_y: bool,
    pub freeze_rotation: bool,
}

impl MotionConstraints {
    pub const NONE: Self = Self {
        freeze_position_x: false,
        freeze_position_y: false,
        freeze_rotation: false,
    };
    pub const FREEZE_ROTATION: Self = Self {
        freeze_position_x: false,
        freeze_position_y: false,
        freeze_rotation: true,
    };
    pub const FREEZE_POSITION: Self = Self {
        freeze_position_x: true,
        freeze_position_y: true,
        freeze_rotation: false,
    };
    pub const FREEZE_ALL: Self = Self {
        freeze_position_x: true,
        freeze_position_y: true,
        freeze_rotation: true,
    };
}

/// Body and impulse settings applied when physics is enabled.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhysicsConfig {
    /// Impulse magnitude, drawn once per pixel.
    pub force: MinMax,
    /// Weight of the random in-disk component of the impulse direction.
    pub random_direction_strength: f32,
    /// Constant added to every impulse direction before normalization.
    pub force_bias: Vec2,
    pub drag: f32,
    pub constraints: MotionConstraints,
    pub gravity_scale: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            force: MinMax::ZERO,
            random_direction_strength: 0.0,
            force_bias: Vec2::ZERO,
            drag: 0.5,
            constraints: MotionConstraints::FREEZE_ROTATION,
            gravity_scale: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DissolveConfig {
    /// Upper bound on spawned pixels; 0 means unlimited.
    pub max_pixels: usize,
    /// Seconds until each pixel is removed; `max == 0` keeps pixels forever.
    pub pixel_lifetime: MinMax,
    /// Replaces the image's native pixels-per-unit when > 0.
    pub pixels_per_unit_override: f32,
    pub collider: Option<ColliderShape>,
    pub physics: Option<PhysicsConfig>,
}

impl DissolveConfig {
    pub fn with_max_pixels(mut self, max_pixels: usize) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    pub fn with_pixel_lifetime(mut self, lifetime: MinMax) -> Self {
        self.pixel_lifetime = lifetime;
        self
    }

    pub fn with_pixels_per_unit(mut self, pixels_per_unit: f32) -> Self {
        self.pixels_per_unit_override = pixels_per_unit;
        self
    }

    pub fn with_collider(mut self, shape: ColliderShape) -> Self {
        self.collider = Some(shape);
        self
    }

    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = Some(physics);
        self
    }

    pub fn has_lifetime(&self) -> bool {
        self.pixel_lifetime.min.max(self.pixel_lifetime.max) > 0.0
    }

    /// Scale used for the pass, given the image's native pixels-per-unit.
    pub fn effective_pixels_per_unit(&self, native: f32) -> f32 {
        if self.pixels_per_unit_override > 0.0 {
            self.pixels_per_unit_override
        } else {
            native
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pixels_per_unit_override >= 0.0) {
            return Err(ConfigError::NegativeScale(self.pixels_per_unit_override));
        }
        check_range("pixel_lifetime", self.pixel_lifetime)?;
        if let Some(physics) = &self.physics {
            check_range("physics.force", physics.force)?;
            if !(physics.drag >= 0.0) {
                return Err(ConfigError::NegativeDrag(physics.drag));
            }
        }
        Ok(())
    }
}

fn check_range(field: &'static str, range: MinMax) -> Result<(), ConfigError> {
    if range.is_valid() {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange {
            field,
            min: range.min,
            max: range.max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_unbounded() {
        let config = DissolveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_pixels, 0);
        assert!(!config.has_lifetime());
        assert_eq!(config.effective_pixels_per_unit(32.0), 32.0);
    }

    #[test]
    fn override_replaces_native_scale() {
        let config = DissolveConfig::default().with_pixels_per_unit(8.0);
        assert_eq!(config.effective_pixels_per_unit(100.0), 8.0);
    }

    #[test]
    fn validate_rejects_inverted_ranges() {
        let config = DissolveConfig::default().with_pixel_lifetime(MinMax::new(3.0, 1.0));
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidRange {
                field: "pixel_lifetime",
                min: 3.0,
                max: 1.0,
            })
        );

        let config = DissolveConfig::default().with_physics(PhysicsConfig {
            drag: -1.0,
            ..Default::default()
        });
        assert_eq!(config.validate(), Err(ConfigError::NegativeDrag(-1.0)));
    }

    #[test]
    fn physics_defaults_freeze_rotation() {
        let physics = PhysicsConfig::default();
        assert_eq!(physics.constraints, MotionConstraints::FREEZE_ROTATION);
        assert_eq!(physics.drag, 0.5);
        assert_eq!(physics.gravity_scale, 0.0);
    }
}
