use crate::{DissolveError, PixelEntity};

/// Engine-side collaborator that realises a dissolve pass.
pub trait DissolveHost {
    /// Create the entity described by `pixel` (visual, collider, body, impulse, lifetime).
    fn spawn_pixel(&mut self, pixel: &PixelEntity);

    /// Disable the source's own visual. Called once, after every pixel was spawned.
    fn hide_source(&mut self);

    /// Surface a non-silent precondition failure.
    fn report(&mut self, error: &DissolveError);
}

/// In-memory host, useful for tests and offline tooling.
#[derive(Debug, Default)]
pub struct VecHost {
    pub pixels: Vec<PixelEntity>,
    pub source_hidden: bool,
    pub diagnostics: Vec<DissolveError>,
}

impl DissolveHost for VecHost {
    fn spawn_pixel(&mut self, pixel: &PixelEntity) {
        self.pixels.push(pixel.clone());
    }

    fn hide_source(&mut self) {
        self.source_hidden = true;
    }

    fn report(&mut self, error: &DissolveError) {
        self.diagnostics.push(error.clone());
    }
}
