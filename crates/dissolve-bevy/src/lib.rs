//! Bevy adapter for `dissolve-core`.
//!
//! Add [`DissolvePlugin`], put a [`PixelDissolver`] on any entity with a [`Sprite`], then either
//! send a [`DissolveRequest`] or attach [`DissolveOnStart`]. The source sprite is split into one
//! child entity per opaque pixel and hidden.
//!
//! ## Determinism
//!
//! Each request draws from its own [`SplitMix64`] stream, derived from [`DissolveSeed`], the
//! source entity and a running request counter. With the same seed and request order the spawned
//! pixels are identical across runs.
//!
//! ## Features
//!
//! - `physics`: attaches `bevy_rapier2d` bodies, colliders and impulses to spawned pixels, and
//!   enables the trigger relay (see [`physics`]).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

use std::time::Duration;

use bevy_app::{App, FixedUpdate, Plugin, Update};
use bevy_asset::Assets;
use bevy_ecs::event::{Event, EventReader, EventWriter};
use bevy_ecs::prelude::{Commands, Component, Entity, Query, Res, ResMut, Resource, SystemSet};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_image::Image;
use bevy_sprite::Sprite;
use bevy_time::{Time, Timer, TimerMode};
use bevy_transform::components::GlobalTransform;
use dissolve_core::{
    derive_seed, ConfigError, DissolveConfig, DissolveError, DissolveStats, Dissolver, PixelId, SplitMix64,
    StartDelay, Vec2,
};

mod host;
pub mod source;

#[cfg(feature = "physics")]
#[cfg_attr(docsrs, doc(cfg(feature = "physics")))]
pub mod physics;

pub use source::SpriteSource;

use host::CommandsHost;

/// Marks an entity whose sprite can be dissolved into pixels.
#[derive(Component, Debug, Clone, Default)]
pub struct PixelDissolver {
    pub config: DissolveConfig,
}

impl PixelDissolver {
    pub fn new(config: DissolveConfig) -> Self {
        Self { config }
    }

    /// Like [`PixelDissolver::new`], but rejects configurations that fail validation.
    pub fn try_new(config: DissolveConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }
}

/// Dissolve automatically once the delay has elapsed. Removed when it fires.
#[derive(Component, Debug, Clone, Copy)]
pub struct DissolveOnStart(pub StartDelay);

impl DissolveOnStart {
    pub fn immediately() -> Self {
        Self(StartDelay::new(0.0))
    }

    pub fn after_seconds(seconds: f32) -> Self {
        Self(StartDelay::new(seconds))
    }
}

/// A pixel spawned by a dissolve pass.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DissolvePixel {
    pub source: Entity,
    pub id: PixelId,
}

/// Despawns the pixel when the timer finishes.
#[derive(Component, Debug, Clone)]
pub struct PixelLifetime(pub Timer);

impl PixelLifetime {
    pub fn from_seconds(seconds: f32) -> Self {
        Self(Timer::from_seconds(seconds.max(0.0), TimerMode::Once))
    }

    pub fn remaining(&self) -> Duration {
        self.0.remaining()
    }
}

/// Pixels spawned from this source, in spawn order. Entries may refer to despawned pixels.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct DissolvedPixels(pub Vec<Entity>);

impl DissolvedPixels {
    pub fn entities(&self) -> &[Entity] {
        &self.0
    }
}

/// Ask for the sprite on this entity to be dissolved.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DissolveRequest(pub Entity);

#[derive(Event, Debug, Clone, PartialEq)]
pub struct Dissolved {
    pub source: Entity,
    pub pixels: Vec<Entity>,
    pub stats: DissolveStats,
}

/// A dissolve that could not run. A missing image never produces this event.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DissolveFailed {
    pub source: Entity,
    pub error: DissolveError,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct DissolveSeed {
    pub seed: u64,
    /// Number of requests served so far.
    pub requests: u64,
}

impl DissolveSeed {
    pub fn new(seed: u64) -> Self {
        Self { seed, requests: 0 }
    }

    fn next_rng(&mut self, source: Entity) -> SplitMix64 {
        let stream = self.requests;
        self.requests = self.requests.wrapping_add(1);
        SplitMix64::new(derive_seed(self.seed, source.to_bits(), stream))
    }
}

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum DissolveSet {
    Start,
    Dissolve,
    Lifetime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DissolveSchedule {
    #[default]
    Update,
    FixedUpdate,
}

pub fn tick_dissolve_on_start(
    mut commands: Commands,
    time: Res<Time>,
    mut starts: Query<(Entity, &mut DissolveOnStart)>,
    mut requests: EventWriter<DissolveRequest>,
) {
    let dt = time.delta_secs();
    for (entity, mut start) in starts.iter_mut() {
        if start.0.advance(dt) {
            requests.write(DissolveRequest(entity));
            commands.entity(entity).remove::<DissolveOnStart>();
        }
    }
}

/// Serves every pending [`DissolveRequest`].
pub fn run_dissolve_requests(
    mut commands: Commands,
    mut requests: EventReader<DissolveRequest>,
    mut seed: ResMut<DissolveSeed>,
    images: Option<Res<Assets<Image>>>,
    sources: Query<(
        &PixelDissolver,
        Option<&Sprite>,
        &GlobalTransform,
        Option<&DissolvedPixels>,
    )>,
    mut dissolved: EventWriter<Dissolved>,
    mut failed: EventWriter<DissolveFailed>,
) {
    for &DissolveRequest(source) in requests.read() {
        let Ok((dissolver, sprite, global, previous)) = sources.get(source) else {
            tracing::debug!(?source, "Dissolve requested for an entity without PixelDissolver");
            continue;
        };

        let image = sprite.and_then(|sprite| {
            images
                .as_deref()
                .and_then(|assets| assets.get(&sprite.image))
                .map(|image| SpriteSource::new(image, sprite))
        });

        if let Err(err) = dissolver.config.validate() {
            tracing::warn!(?source, "Dissolving with invalid config: {err}");
        }

        let origin = global.translation();
        let mut rng = seed.next_rng(source);
        let mut host = CommandsHost::new(&mut commands, source, *global);
        let stats = Dissolver::new(dissolver.config.clone()).dissolve_into(
            image.as_ref(),
            Vec2::new(origin.x, origin.y),
            &mut rng,
            &mut host,
        );

        let CommandsHost { spawned, errors, .. } = host;

        for error in errors {
            failed.write(DissolveFailed { source, error });
        }

        let Some(stats) = stats else {
            continue;
        };

        let mut all = previous.map(|p| p.0.clone()).unwrap_or_default();
        all.extend_from_slice(&spawned);
        commands.entity(source).insert(DissolvedPixels(all));

        tracing::info!(?source, spawned = stats.spawned, "Sprite dissolved");
        dissolved.write(Dissolved {
            source,
            pixels: spawned,
            stats,
        });
    }
}

pub fn despawn_expired_pixels(
    mut commands: Commands,
    time: Res<Time>,
    mut pixels: Query<(Entity, &mut PixelLifetime)>,
) {
    let delta = time.delta();
    for (entity, mut lifetime) in pixels.iter_mut() {
        if lifetime.0.tick(delta).finished() {
            commands.entity(entity).despawn();
        }
    }
}

pub struct DissolvePlugin {
    schedule: DissolveSchedule,
    seed: u64,
}

impl Default for DissolvePlugin {
    fn default() -> Self {
        Self {
            schedule: DissolveSchedule::Update,
            seed: 0,
        }
    }
}

impl DissolvePlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn in_fixed_update(mut self) -> Self {
        self.schedule = DissolveSchedule::FixedUpdate;
        self
    }

    pub fn schedule(&self) -> DissolveSchedule {
        self.schedule
    }
}

impl Plugin for DissolvePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(DissolveSeed::new(self.seed));
        app.init_resource::<Time>();

        app.add_event::<DissolveRequest>();
        app.add_event::<Dissolved>();
        app.add_event::<DissolveFailed>();

        let systems = (
            tick_dissolve_on_start.in_set(DissolveSet::Start),
            run_dissolve_requests.in_set(DissolveSet::Dissolve),
            despawn_expired_pixels.in_set(DissolveSet::Lifetime),
        );
        let sets = (DissolveSet::Start, DissolveSet::Dissolve, DissolveSet::Lifetime).chain();

        match self.schedule {
            DissolveSchedule::Update => {
                app.configure_sets(Update, sets);
                app.add_systems(Update, systems);
            }
            DissolveSchedule::FixedUpdate => {
                app.configure_sets(FixedUpdate, sets);
                app.add_systems(FixedUpdate, systems);
            }
        }
    }
}
