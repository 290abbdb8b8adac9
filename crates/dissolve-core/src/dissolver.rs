//! The dissolve pass.

use crate::{
    DeterministicRng, DissolveConfig, DissolveError, DissolveHost, DissolveStats, PixelBatch,
    PixelBody, PixelCoord, PixelEntity, SourceImage, Vec2,
};

/// World position of pixel `coord`, with `(0, 0)` at the bottom-left corner of the sprite bounds.
pub fn pixel_to_world(coord: PixelCoord, bounds_size: Vec2, origin: Vec2, pixels_per_unit: f32) -> Vec2 {
    let pixel_in_world = 1.0 / pixels_per_unit;
    let start = origin - bounds_size * 0.5;
    start + Vec2::new(coord.x as f32, coord.y as f32) * pixel_in_world
}

/// Splits a sprite into one descriptor per opaque pixel.
#[derive(Debug, Clone, Default)]
pub struct Dissolver {
    config: DissolveConfig,
}

impl Dissolver {
    pub fn new(config: DissolveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DissolveConfig {
        &self.config
    }

    /// Run the pass and return the descriptors without touching any host.
    ///
    /// `origin` is the world position of the source entity (the center of the sprite bounds).
    /// Random draws happen in a fixed order per spawned pixel (impulse disk sample, impulse
    /// magnitude, lifetime), so the batch is fully determined by `rng`'s state.
    pub fn run<I, R>(
        &self,
        image: Option<&I>,
        origin: Vec2,
        rng: &mut R,
    ) -> Result<PixelBatch, DissolveError>
    where
        I: SourceImage + ?Sized,
        R: DeterministicRng + ?Sized,
    {
        let image = image.ok_or(DissolveError::MissingSource)?;
        if !image.is_readable() {
            return Err(DissolveError::UnreadableSource {
                image: image.name().into_owned(),
            });
        }

        let config = &self.config;
        let ppu = config.effective_pixels_per_unit(image.pixels_per_unit());
        let bounds_size = image.bounds_size();
        let rect = image.rect();
        let size = 1.0 / ppu;

        let capacity = match config.max_pixels {
            0 => rect.area(),
            cap => cap.min(rect.area()),
        };
        let mut batch = PixelBatch::with_capacity(origin, ppu, capacity);
        let mut stats = DissolveStats::default();
        let mut count = 0usize;

        for x in 0..rect.width {
            for y in 0..rect.height {
                stats.visited += 1;

                // The cap is checked before sampling, so capped pixels are never read.
                if config.max_pixels > 0 && count >= config.max_pixels {
                    stats.capped += 1;
                    continue;
                }

                let color = image.sample(x + rect.x, y + rect.y);
                if color.is_transparent() {
                    stats.transparent += 1;
                    continue;
                }

                let coord = PixelCoord { x, y };
                let position = pixel_to_world(coord, bounds_size, origin, ppu);

                let body = config.physics.as_ref().map(|physics| {
                    let direction = ((position - origin)
                        + rng.next_in_unit_disk() * physics.random_direction_strength
                        + physics.force_bias)
                        .normalize_or_zero();
                    PixelBody {
                        drag: physics.drag,
                        gravity_scale: physics.gravity_scale,
                        constraints: physics.constraints,
                        impulse: direction * physics.force.sample(rng),
                    }
                });

                let lifetime = config
                    .has_lifetime()
                    .then(|| config.pixel_lifetime.sample(rng));

                batch.push(PixelEntity {
                    id: batch.next_id(),
                    coord,
                    position,
                    size,
                    color,
                    collider: config.collider,
                    body,
                    lifetime,
                });
                count += 1;
            }
        }

        stats.spawned = count;
        batch.stats = stats;

        tracing::debug!(
            image = %image.name(),
            visited = stats.visited,
            capped = stats.capped,
            transparent = stats.transparent,
            spawned = stats.spawned,
            "Dissolved image"
        );

        Ok(batch)
    }

    /// Run the pass and realise it on `host`: spawn every pixel, then hide the source.
    ///
    /// A missing image is a silent no-op. An unreadable image is reported exactly once and the
    /// source stays visible. Returns the pass statistics when pixels were produced.
    pub fn dissolve_into<I, R, H>(
        &self,
        image: Option<&I>,
        origin: Vec2,
        rng: &mut R,
        host: &mut H,
    ) -> Option<DissolveStats>
    where
        I: SourceImage + ?Sized,
        R: DeterministicRng + ?Sized,
        H: DissolveHost + ?Sized,
    {
        match self.run(image, origin, rng) {
            Ok(batch) => {
                for pixel in &batch {
                    host.spawn_pixel(pixel);
                }
                host.hide_source();
                Some(batch.stats)
            }
            Err(err) if err.is_silent() => {
                tracing::debug!("Dissolve skipped: {err}");
                None
            }
            Err(err) => {
                tracing::error!("{err}");
                host.report(&err);
                None
            }
        }
    }
}
