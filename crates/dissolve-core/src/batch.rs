//! Descriptors produced by a dissolve pass.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ColliderShape, MotionConstraints, Rgba, Vec2};

/// Dense index of a pixel within its batch, in spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelId(pub u32);

/// Coordinate inside the visible rect (not absolute texture space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelCoord {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelBody {
    pub drag: f32,
    pub gravity_scale: f32,
    pub constraints: MotionConstraints,
    /// Applied once, at creation.
    pub impulse: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelEntity {
    pub id: PixelId,
    pub coord: PixelCoord,
    /// World-space position of the pixel's bottom-left corner.
    pub position: Vec2,
    /// World-space edge length (1 / pixels-per-unit).
    pub size: f32,
    pub color: Rgba,
    pub collider: Option<ColliderShape>,
    pub body: Option<PixelBody>,
    /// Seconds until removal; `None` keeps the pixel forever.
    pub lifetime: Option<f32>,
}

impl PixelEntity {
    pub fn name(&self) -> String {
        format!("SplitPixel ({},{})", self.coord.x, self.coord.y)
    }

    /// World-space centre of the pixel square.
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.size * 0.5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DissolveStats {
    /// Coordinates of the visible rect that were iterated.
    pub visited: usize,
    /// Coordinates skipped because the pixel cap was already reached.
    pub capped: usize,
    /// Coordinates skipped because their alpha was zero.
    pub transparent: usize,
    pub spawned: usize,
}

/// Arena of pixel descriptors from one dissolve pass.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelBatch {
    pub origin: Vec2,
    pub pixels_per_unit: f32,
    pub stats: DissolveStats,
    pixels: Vec<PixelEntity>,
}

impl PixelBatch {
    pub fn new(origin: Vec2, pixels_per_unit: f32) -> Self {
        Self {
            origin,
            pixels_per_unit,
            stats: DissolveStats::default(),
            pixels: Vec::new(),
        }
    }

    pub fn with_capacity(origin: Vec2, pixels_per_unit: f32, capacity: usize) -> Self {
        let mut batch = Self::new(origin, pixels_per_unit);
        batch.pixels.reserve(capacity);
        batch
    }

    /// Next id to hand out.
    pub fn next_id(&self) -> PixelId {
        PixelId(self.pixels.len() as u32)
    }

    pub fn push(&mut self, pixel: PixelEntity) -> PixelId {
        debug_assert_eq!(pixel.id, self.next_id(), "pixel ids must be dense");
        let id = pixel.id;
        self.pixels.push(pixel);
        self.stats.spawned = self.pixels.len();
        id
    }

    pub fn get(&self, id: PixelId) -> Option<&PixelEntity> {
        self.pixels.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PixelEntity> {
        self.pixels.iter()
    }

    pub fn as_slice(&self) -> &[PixelEntity] {
        &self.pixels
    }
}

impl IntoIterator for PixelBatch {
    type Item = PixelEntity;
    type IntoIter = std::vec::IntoIter<PixelEntity>;

    fn into_iter(self) -> Self::IntoIter {
        self.pixels.into_iter()
    }
}

impl<'a> IntoIterator for &'a PixelBatch {
    type Item = &'a PixelEntity;
    type IntoIter = std::slice::Iter<'a, PixelEntity>;

    fn into_iter(self) -> Self::IntoIter {
        self.pixels.iter()
    }
}
