//! [`DissolveHost`] that realises pixels through Bevy [`Commands`].

use bevy_color::Color;
use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::name::Name;
use bevy_ecs::prelude::{Commands, Entity};
use bevy_math::{Vec2, Vec3};
use bevy_render::view::Visibility;
use bevy_sprite::Sprite;
use bevy_transform::components::GlobalTransform;
use dissolve_core::{DissolveError, DissolveHost, PixelEntity};

use crate::{DissolvePixel, PixelLifetime};

pub(crate) struct CommandsHost<'c, 'w, 's> {
    commands: &'c mut Commands<'w, 's>,
    source: Entity,
    source_global: GlobalTransform,
    pub(crate) spawned: Vec<Entity>,
    pub(crate) errors: Vec<DissolveError>,
}

impl<'c, 'w, 's> CommandsHost<'c, 'w, 's> {
    pub(crate) fn new(
        commands: &'c mut Commands<'w, 's>,
        source: Entity,
        source_global: GlobalTransform,
    ) -> Self {
        Self {
            commands,
            source,
            source_global,
            spawned: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl DissolveHost for CommandsHost<'_, '_, '_> {
    fn spawn_pixel(&mut self, pixel: &PixelEntity) {
        // Pixels are centred on their square so colliders line up with the visual.
        let center = pixel.center();
        let z = self.source_global.translation().z;
        let world = GlobalTransform::from_translation(Vec3::new(center.x, center.y, z));
        let transform = world.reparented_to(&self.source_global);
        let color = Color::srgba(pixel.color.r, pixel.color.g, pixel.color.b, pixel.color.a);

        let mut entity = self.commands.spawn((
            Name::new(pixel.name()),
            DissolvePixel {
                source: self.source,
                id: pixel.id,
            },
            Sprite::from_color(color, Vec2::splat(pixel.size)),
            transform,
            // Explicit so pixels stay shown once the source is hidden.
            Visibility::Visible,
            ChildOf(self.source),
        ));

        if let Some(seconds) = pixel.lifetime {
            entity.insert(PixelLifetime::from_seconds(seconds));
        }

        #[cfg(feature = "physics")]
        crate::physics::insert_pixel_physics(&mut entity, pixel);

        self.spawned.push(entity.id());
    }

    fn hide_source(&mut self) {
        self.commands.entity(self.source).insert(Visibility::Hidden);
    }

    fn report(&mut self, error: &DissolveError) {
        self.errors.push(error.clone());
    }
}
