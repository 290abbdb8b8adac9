#![cfg(feature = "physics")]

use bevy_app::App;
use bevy_asset::{Assets, RenderAssetUsages};
use bevy_ecs::event::Events;
use bevy_image::Image;
use bevy_render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy_sprite::Sprite;
use bevy_transform::components::{GlobalTransform, Transform};
use bevy_rapier2d::prelude::*;
use bevy_rapier2d::rapier::geometry::CollisionEventFlags;
use dissolve_bevy::physics::{
    DissolvePhysicsPlugin, RelayLayer, TriggerRelayComponent, TriggerRelayEvent,
};
use dissolve_bevy::{DissolvePixel, DissolvePlugin, DissolveRequest, PixelDissolver};
use dissolve_core::{
    ColliderShape, DissolveConfig, LayerMask, MinMax, MotionConstraints, PhysicsConfig, RelayKind,
};

const PLAYER: u8 = 3;

fn opaque_image(side: u32) -> Image {
    Image::new_fill(
        Extent3d {
            width: side,
            height: side,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[255, 255, 255, 255],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    )
}

#[test]
fn pixels_get_bodies_colliders_and_impulses() {
    let mut app = App::new();
    app.add_plugins(DissolvePlugin::default().with_seed(1));
    app.init_resource::<Assets<Image>>();

    let handle = app
        .world_mut()
        .resource_mut::<Assets<Image>>()
        .add(opaque_image(3));
    let config = DissolveConfig::default()
        .with_collider(ColliderShape::Circle)
        .with_physics(PhysicsConfig {
            force: MinMax::new(2.0, 2.0),
            constraints: MotionConstraints::FREEZE_ROTATION,
            ..Default::default()
        });
    let source = app
        .world_mut()
        .spawn((
            PixelDissolver::new(config),
            Sprite::from_image(handle),
            Transform::default(),
            GlobalTransform::default(),
        ))
        .id();

    app.world_mut().send_event(DissolveRequest(source));
    app.update();

    let world = app.world_mut();
    let mut query = world.query::<(
        &DissolvePixel,
        &Collider,
        &RigidBody,
        &Damping,
        &LockedAxes,
        &ExternalImpulse,
    )>();

    let mut count = 0;
    for (_, collider, body, damping, axes, impulse) in query.iter(world) {
        count += 1;
        assert_eq!(*body, RigidBody::Dynamic);
        let ball = collider.as_ball().expect("circle collider");
        assert!((ball.radius() - 0.5).abs() < 1e-6);
        assert!((damping.linear_damping - 0.5).abs() < 1e-6);
        assert_eq!(*axes, LockedAxes::ROTATION_LOCKED);
        let magnitude = impulse.impulse.length();
        assert!((magnitude - 2.0).abs() < 1e-4, "{magnitude}");
    }
    assert_eq!(count, 9);
}

fn relay_app() -> App {
    let mut app = App::new();
    app.add_plugins(DissolvePhysicsPlugin::default().without_rapier());
    app
}

fn relayed(app: &App) -> Vec<TriggerRelayEvent> {
    let events = app.world().resource::<Events<TriggerRelayEvent>>();
    events.get_cursor().read(events).copied().collect()
}

#[test]
fn relay_forwards_matching_layer_in_either_order() {
    let mut app = relay_app();
    let relay = app
        .world_mut()
        .spawn(TriggerRelayComponent::new(LayerMask::from_layer(PLAYER)))
        .id();
    let player = app.world_mut().spawn(RelayLayer(PLAYER)).id();
    let prop = app.world_mut().spawn_empty().id();

    app.world_mut().send_event(CollisionEvent::Started(
        player,
        relay,
        CollisionEventFlags::SENSOR,
    ));
    app.world_mut().send_event(CollisionEvent::Started(
        relay,
        prop,
        CollisionEventFlags::SENSOR,
    ));
    app.world_mut().send_event(CollisionEvent::Stopped(
        relay,
        player,
        CollisionEventFlags::SENSOR,
    ));
    app.update();

    assert_eq!(
        relayed(&app),
        vec![
            TriggerRelayEvent {
                relay,
                other: player,
                kind: RelayKind::Enter,
            },
            TriggerRelayEvent {
                relay,
                other: player,
                kind: RelayKind::Exit,
            },
        ]
    );
}

#[test]
fn one_shot_relay_latches_after_first_enter() {
    let mut app = relay_app();
    let relay = app
        .world_mut()
        .spawn(TriggerRelayComponent::one_shot(LayerMask::from_layer(PLAYER)))
        .id();
    let player = app.world_mut().spawn(RelayLayer(PLAYER)).id();

    for _ in 0..2 {
        app.world_mut().send_event(CollisionEvent::Started(
            player,
            relay,
            CollisionEventFlags::SENSOR,
        ));
        app.world_mut().send_event(CollisionEvent::Stopped(
            player,
            relay,
            CollisionEventFlags::SENSOR,
        ));
    }
    app.update();

    let events = relayed(&app);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, RelayKind::Enter);
    assert!(app
        .world()
        .get::<TriggerRelayComponent>(relay)
        .unwrap()
        .0
        .has_triggered());
}

#[test]
fn solid_contacts_are_not_relayed() {
    let mut app = relay_app();
    let relay = app
        .world_mut()
        .spawn(TriggerRelayComponent::one_shot(LayerMask::from_layer(PLAYER)))
        .id();
    let player = app.world_mut().spawn(RelayLayer(PLAYER)).id();

    app.world_mut().send_event(CollisionEvent::Started(
        player,
        relay,
        CollisionEventFlags::empty(),
    ));
    app.world_mut().send_event(CollisionEvent::Stopped(
        player,
        relay,
        CollisionEventFlags::empty(),
    ));
    app.update();

    assert!(relayed(&app).is_empty());
    assert!(!app
        .world()
        .get::<TriggerRelayComponent>(relay)
        .unwrap()
        .0
        .has_triggered());
}

#[test]
fn relay_is_spawned_as_an_event_emitting_sensor() {
    let mut app = relay_app();
    let relay = app
        .world_mut()
        .spawn(TriggerRelayComponent::new(LayerMask::ALL))
        .id();

    let world = app.world();
    assert!(world.get::<Sensor>(relay).is_some());
    assert_eq!(
        world.get::<ActiveEvents>(relay),
        Some(&ActiveEvents::COLLISION_EVENTS)
    );
}
