//! Rapier2D integration for dissolve-bevy.
//!
//! With the `physics` feature every spawned pixel receives the collider and rigid body its
//! [`PixelEntity`](dissolve_core::PixelEntity) descriptor asks for, and the initial impulse is
//! applied through [`ExternalImpulse`](bevy_rapier2d::prelude::ExternalImpulse).
//!
//! The module also hosts the trigger relay: a sensor tagged with [`TriggerRelayComponent`]
//! forwards enter/exit overlaps of entities whose [`RelayLayer`] matches its mask as
//! [`TriggerRelayEvent`]s.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dissolve_bevy::{physics::DissolvePhysicsPlugin, DissolvePlugin};
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins((DissolvePlugin::default(), DissolvePhysicsPlugin::default()))
//!     .run();
//! ```

mod bodies;
mod plugin;
pub mod relay;

pub use bodies::{insert_pixel_physics, locked_axes, pixel_collider};
pub use plugin::DissolvePhysicsPlugin;
pub use relay::{relay_trigger_events, RelayLayer, TriggerRelayComponent, TriggerRelayEvent};
