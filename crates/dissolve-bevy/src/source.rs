//! [`SourceImage`] view over a Bevy sprite and its image asset.

use std::borrow::Cow;

use bevy_image::{Image, TextureAccessError};
use bevy_math::Rect;
use bevy_sprite::Sprite;
use dissolve_core::{PixelRect, Rgba, SourceImage, Vec2};

/// Borrowed view of the pixels a [`Sprite`] displays.
///
/// Bevy images are stored top row first; this view flips rows so sampling is y-up like the rest
/// of the dissolve pass.
#[derive(Debug, Clone)]
pub struct SpriteSource<'a> {
    image: &'a Image,
    rect: PixelRect,
    bounds: Vec2,
    name: String,
}

impl<'a> SpriteSource<'a> {
    pub fn new(image: &'a Image, sprite: &Sprite) -> Self {
        let rect = visible_rect(image, sprite.rect);
        let bounds = match sprite.custom_size {
            Some(size) if size.x > 0.0 && size.y > 0.0 => Vec2::new(size.x, size.y),
            // Without a custom size a sprite is drawn one world unit per texel.
            _ => Vec2::new(rect.width as f32, rect.height as f32),
        };
        let name = match sprite.image.path() {
            Some(path) => path.to_string(),
            None => format!("{:?}", sprite.image.id()),
        };

        Self {
            image,
            rect,
            bounds,
            name,
        }
    }
}

/// Convert a top-left based sprite rect into a y-up [`PixelRect`] clamped to the texture.
fn visible_rect(image: &Image, rect: Option<Rect>) -> PixelRect {
    let width = image.width();
    let height = image.height();
    let Some(rect) = rect else {
        return PixelRect::new(0, 0, width, height);
    };

    let min_x = (rect.min.x.max(0.0) as u32).min(width);
    let max_x = (rect.max.x.max(0.0) as u32).min(width);
    let min_y = (rect.min.y.max(0.0) as u32).min(height);
    let max_y = (rect.max.y.max(0.0) as u32).min(height);

    PixelRect::new(
        min_x,
        height - max_y,
        max_x.saturating_sub(min_x),
        max_y.saturating_sub(min_y),
    )
}

impl SourceImage for SpriteSource<'_> {
    fn is_readable(&self) -> bool {
        // Images uploaded with RENDER_WORLD-only usage have their CPU data dropped.
        if self.image.data.is_none() {
            return false;
        }
        if self.rect.width == 0 || self.rect.height == 0 {
            return true;
        }
        // Compressed and exotic formats have CPU bytes that cannot be decoded per texel.
        let row = self.image.height() - 1 - self.rect.y;
        !matches!(
            self.image.get_color_at(self.rect.x, row),
            Err(TextureAccessError::UnsupportedTextureFormat(_))
        )
    }

    fn pixels_per_unit(&self) -> f32 {
        if self.bounds.x > 0.0 {
            self.rect.width as f32 / self.bounds.x
        } else {
            1.0
        }
    }

    fn rect(&self) -> PixelRect {
        self.rect
    }

    fn sample(&self, x: u32, y: u32) -> Rgba {
        let Some(row) = self.image.height().checked_sub(y + 1) else {
            return Rgba::TRANSPARENT;
        };
        match self.image.get_color_at(x, row) {
            Ok(color) => {
                let c = color.to_srgba();
                Rgba::new(c.red, c.green, c.blue, c.alpha)
            }
            Err(_) => Rgba::TRANSPARENT,
        }
    }

    fn bounds_size(&self) -> Vec2 {
        self.bounds
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_asset::RenderAssetUsages;
    use bevy_render::render_resource::{Extent3d, TextureDimension, TextureFormat};

    fn blank(width: u32, height: u32) -> Image {
        Image::new_fill(
            Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            &[0, 0, 0, 0],
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::MAIN_WORLD,
        )
    }

    #[test]
    fn rect_is_flipped_to_y_up() {
        let image = blank(8, 6);
        let rect = visible_rect(&image, Some(Rect::new(2.0, 1.0, 5.0, 3.0)));
        assert_eq!(rect, PixelRect::new(2, 3, 3, 2));
    }

    #[test]
    fn missing_rect_covers_whole_texture() {
        let image = blank(4, 2);
        assert_eq!(visible_rect(&image, None), PixelRect::new(0, 0, 4, 2));
    }

    #[test]
    fn undecodable_format_is_not_readable() {
        let image = Image::new_fill(
            Extent3d {
                width: 2,
                height: 2,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            &[0xFF; 4],
            TextureFormat::Rgb9e5Ufloat,
            RenderAssetUsages::MAIN_WORLD,
        );
        let source = SpriteSource::new(&image, &Sprite::default());
        assert!(!source.is_readable());
        assert!(SpriteSource::new(&blank(2, 2), &Sprite::default()).is_readable());
    }

    #[test]
    fn custom_size_sets_pixels_per_unit() {
        let image = blank(16, 16);
        let sprite = Sprite {
            custom_size: Some(bevy_math::Vec2::new(2.0, 2.0)),
            ..Default::default()
        };
        let source = SpriteSource::new(&image, &sprite);
        assert_eq!(source.pixels_per_unit(), 8.0);
        assert_eq!(source.bounds_size(), Vec2::new(2.0, 2.0));
    }
}
