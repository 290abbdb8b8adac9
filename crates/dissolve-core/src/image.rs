//! Image sources the dissolve pass can sample.
//!
//! Coordinates are y-up: `(0, 0)` is the bottom-left pixel of the texture.

use std::borrow::Cow;

use crate::{Rgba, Vec2};

/// Visible sub-rectangle of a texture, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

pub trait SourceImage {
    /// Whether the platform permits per-pixel reads of the backing texture.
    fn is_readable(&self) -> bool;

    /// Native pixels-per-unit of the sprite.
    fn pixels_per_unit(&self) -> f32;

    fn rect(&self) -> PixelRect;

    /// Sample the texture at absolute texture coordinates (not rect-relative).
    fn sample(&self, x: u32, y: u32) -> Rgba;

    /// World-space size of the displayed sprite.
    fn bounds_size(&self) -> Vec2 {
        let rect = self.rect();
        let ppu = self.pixels_per_unit();
        Vec2::new(rect.width as f32 / ppu, rect.height as f32 / ppu)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("<unnamed>")
    }
}

impl<T: SourceImage + ?Sized> SourceImage for &T {
    fn is_readable(&self) -> bool {
        (**self).is_readable()
    }

    fn pixels_per_unit(&self) -> f32 {
        (**self).pixels_per_unit()
    }

    fn rect(&self) -> PixelRect {
        (**self).rect()
    }

    fn sample(&self, x: u32, y: u32) -> Rgba {
        (**self).sample(x, y)
    }

    fn bounds_size(&self) -> Vec2 {
        (**self).bounds_size()
    }

    fn name(&self) -> Cow<'_, str> {
        (**self).name()
    }
}

/// Owned, in-memory image.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelImage {
    name: String,
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    pixels_per_unit: f32,
    rect: PixelRect,
    readable: bool,
}

impl PixelImage {
    /// A fully transparent image whose visible rect covers the whole texture.
    pub fn new(width: u32, height: u32, pixels_per_unit: f32) -> Self {
        Self::filled(width, height, pixels_per_unit, Rgba::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, pixels_per_unit: f32, color: Rgba) -> Self {
        assert!(width > 0 && height > 0, "image must be non-empty");
        assert!(pixels_per_unit > 0.0, "pixels_per_unit must be > 0");
        Self {
            name: String::from("pixel-image"),
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
            pixels_per_unit,
            rect: PixelRect::new(0, 0, width, height),
            readable: true,
        }
    }

    /// Build from top-down RGBA8 rows (the layout PNG decoders produce).
    pub fn from_rgba8_top_down(width: u32, height: u32, pixels_per_unit: f32, bytes: &[u8]) -> Self {
        assert_eq!(
            bytes.len(),
            width as usize * height as usize * 4,
            "rgba8 buffer does not match dimensions"
        );
        let mut image = Self::new(width, height, pixels_per_unit);
        for (i, px) in bytes.chunks_exact(4).enumerate() {
            let x = (i % width as usize) as u32;
            let row = (i / width as usize) as u32;
            image.set(x, height - 1 - row, Rgba::from_rgba8(px[0], px[1], px[2], px[3]));
        }
        image
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_rect(mut self, rect: PixelRect) -> Self {
        assert!(
            rect.x + rect.width <= self.width && rect.y + rect.height <= self.height,
            "rect must lie inside the image"
        );
        self.rect = rect;
        self
    }

    pub fn with_readable(mut self, readable: bool) -> Self {
        self.readable = readable;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(idx) = self.idx(x, y) {
            self.pixels[idx] = color;
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        self.idx(x, y).map(|idx| self.pixels[idx])
    }

    /// Number of non-transparent pixels inside the visible rect.
    pub fn opaque_count(&self) -> usize {
        let r = self.rect;
        (r.x..r.x + r.width)
            .flat_map(|x| (r.y..r.y + r.height).map(move |y| (x, y)))
            .filter(|&(x, y)| !self.sample(x, y).is_transparent())
            .count()
    }

    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

impl SourceImage for PixelImage {
    fn is_readable(&self) -> bool {
        self.readable
    }

    fn pixels_per_unit(&self) -> f32 {
        self.pixels_per_unit
    }

    fn rect(&self) -> PixelRect {
        self.rect
    }

    fn sample(&self, x: u32, y: u32) -> Rgba {
        self.get(x, y).unwrap_or(Rgba::TRANSPARENT)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}
