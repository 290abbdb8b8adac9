//! Trigger relay: forwards sensor overlaps as enter/exit notifications.

use bevy_ecs::prelude::*;
use bevy_rapier2d::prelude::*;
use bevy_rapier2d::rapier::geometry::CollisionEventFlags;
use dissolve_core::{LayerMask, RelayKind, TriggerRelay};

/// Relays overlaps on this sensor entity. See [`TriggerRelay`] for the firing rules.
///
/// Pair it with a [`Collider`]; the sensor flag and collision events come along with it.
#[derive(Component, Debug, Clone, Copy)]
#[require(Sensor, ActiveEvents = ActiveEvents::COLLISION_EVENTS)]
pub struct TriggerRelayComponent(pub TriggerRelay);

impl TriggerRelayComponent {
    pub fn new(layers: LayerMask) -> Self {
        Self(TriggerRelay::new(layers))
    }

    pub fn one_shot(layers: LayerMask) -> Self {
        Self(TriggerRelay::new(layers).one_shot())
    }
}

/// Layer (0..32) used when this entity overlaps a relay. Entities without one are on layer 0.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelayLayer(pub u8);

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerRelayEvent {
    pub relay: Entity,
    pub other: Entity,
    pub kind: RelayKind,
}

/// Turns Rapier sensor collision events into [`TriggerRelayEvent`]s.
pub fn relay_trigger_events(
    mut collisions: EventReader<CollisionEvent>,
    mut relays: Query<&mut TriggerRelayComponent>,
    layers: Query<&RelayLayer>,
    mut events: EventWriter<TriggerRelayEvent>,
) {
    for collision in collisions.read() {
        let (e1, e2, flags, kind) = match collision {
            CollisionEvent::Started(e1, e2, flags) => (*e1, *e2, *flags, RelayKind::Enter),
            CollisionEvent::Stopped(e1, e2, flags) => (*e1, *e2, *flags, RelayKind::Exit),
        };
        // Solid contacts are not overlaps.
        if !flags.contains(CollisionEventFlags::SENSOR) {
            continue;
        }

        // Either side of the pair may be the relay.
        for (relay, other) in [(e1, e2), (e2, e1)] {
            let Ok(mut component) = relays.get_mut(relay) else {
                continue;
            };
            let layer = layers.get(other).map(|l| l.0).unwrap_or(0);
            if component.0.handle(kind, layer) {
                tracing::trace!(?relay, ?other, ?kind, layer, "Trigger relayed");
                events.write(TriggerRelayEvent { relay, other, kind });
            }
        }
    }
}
