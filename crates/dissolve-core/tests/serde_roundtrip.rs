#![cfg(feature = "serde")]

use dissolve_core::{
    ColliderShape, DissolveConfig, Dissolver, MinMax, MotionConstraints, PhysicsConfig,
    PixelBatch, PixelImage, Rgba, SplitMix64, Vec2,
};

#[test]
fn partial_config_fills_defaults() {
    let json = r#"{ "max_pixels": 64, "collider": "circle", "physics": { "force": { "min": 1.0, "max": 2.0 } } }"#;
    let config: DissolveConfig = serde_json::from_str(json).expect("config parses");

    assert_eq!(config.max_pixels, 64);
    assert_eq!(config.collider, Some(ColliderShape::Circle));
    let physics = config.physics.expect("physics present");
    assert_eq!(physics.force, MinMax::new(1.0, 2.0));
    assert_eq!(physics.drag, 0.5);
    assert_eq!(physics.constraints, MotionConstraints::FREEZE_ROTATION);
    assert_eq!(config.pixel_lifetime, MinMax::ZERO);
}

#[test]
fn batch_serializes_and_restores() {
    let config = DissolveConfig::default()
        .with_collider(ColliderShape::Box)
        .with_physics(PhysicsConfig {
            force: MinMax::new(0.5, 1.0),
            random_direction_strength: 1.0,
            ..Default::default()
        })
        .with_pixel_lifetime(MinMax::new(1.0, 2.0));
    let image = PixelImage::filled(3, 2, 16.0, Rgba::new(1.0, 0.5, 0.25, 1.0));

    let batch = Dissolver::new(config)
        .run(Some(&image), Vec2::new(2.0, 3.0), &mut SplitMix64::new(11))
        .unwrap();

    let json = serde_json::to_string(&batch).expect("serialize");
    let restored: PixelBatch = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(batch, restored);
}
