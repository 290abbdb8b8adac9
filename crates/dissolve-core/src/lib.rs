//! Deterministic, engine-agnostic sprite-to-pixel dissolve primitives.
//!
//! The dissolve pass turns every opaque pixel of a [`SourceImage`] into a [`PixelEntity`]
//! descriptor. Nothing here talks to an engine: [`Dissolver::run`] returns a [`PixelBatch`],
//! and [`Dissolver::dissolve_into`] replays that batch onto any [`DissolveHost`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod batch;
pub mod color;
pub mod config;
pub mod dissolver;
pub mod error;
pub mod host;
pub mod image;
pub mod math;
pub mod range;
pub mod relay;
pub mod rng;
pub mod start;

pub use batch::{DissolveStats, PixelBatch, PixelBody, PixelCoord, PixelEntity, PixelId};
pub use color::Rgba;
pub use config::{ColliderShape, DissolveConfig, MotionConstraints, PhysicsConfig};
pub use dissolver::{pixel_to_world, Dissolver};
pub use error::{ConfigError, DissolveError};
pub use host::{DissolveHost, VecHost};
pub use image::{PixelImage, PixelRect, SourceImage};
pub use math::Vec2;
pub use range::MinMax;
pub use relay::{LayerMask, RelayKind, TriggerRelay};
pub use rng::{derive_seed, DeterministicRng, SplitMix64};
pub use start::StartDelay;
