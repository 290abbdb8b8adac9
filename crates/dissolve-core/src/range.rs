use crate::DeterministicRng;

/// Closed `f32` range drawn from uniformly. Inverted bounds sample the same span.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinMax {
    pub min: f32,
    pub max: f32,
}

impl MinMax {
    pub const ZERO: Self = Self { min: 0.0, max: 0.0 };

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn constant(value: f32) -> Self {
        Self::new(value, value)
    }

    pub fn sample<R: DeterministicRng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.next_f32_range(self.min, self.max)
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min <= self.max
    }
}
