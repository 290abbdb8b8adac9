//! Physics plugin for dissolve-bevy.

use bevy_app::{App, Plugin, Update};
use bevy_rapier2d::prelude::*;

use super::relay::{relay_trigger_events, TriggerRelayEvent};

/// Registers the trigger relay and, unless disabled, Rapier itself.
///
/// Pixel bodies are attached by [`DissolvePlugin`](crate::DissolvePlugin) whenever the `physics`
/// feature is on; this plugin only wires the simulation and the relay.
pub struct DissolvePhysicsPlugin {
    add_rapier: bool,
    pixels_per_meter: f32,
}

impl Default for DissolvePhysicsPlugin {
    fn default() -> Self {
        Self {
            add_rapier: true,
            pixels_per_meter: 1.0,
        }
    }
}

impl DissolvePhysicsPlugin {
    /// Use when the app already adds `RapierPhysicsPlugin`.
    pub fn without_rapier(mut self) -> Self {
        self.add_rapier = false;
        self
    }

    pub fn with_pixels_per_meter(mut self, pixels_per_meter: f32) -> Self {
        self.pixels_per_meter = pixels_per_meter;
        self
    }
}

impl Plugin for DissolvePhysicsPlugin {
    fn build(&self, app: &mut App) {
        if self.add_rapier {
            app.add_plugins(
                RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(self.pixels_per_meter),
            );
        }

        app.add_event::<CollisionEvent>();
        app.add_event::<TriggerRelayEvent>();

        app.add_systems(Update, relay_trigger_events);
    }
}
