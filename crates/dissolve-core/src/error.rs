use thiserror::Error;

/// Precondition failures of a dissolve pass. Neither is transient; both leave the source untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DissolveError {
    #[error("no source image bound")]
    MissingSource,

    #[error("source image `{image}` must be read/write enabled to be dissolved")]
    UnreadableSource { image: String },
}

impl DissolveError {
    /// Missing sources are expected (e.g. a sprite that was never assigned) and stay silent.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::MissingSource)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("pixels_per_unit_override must be >= 0, got {0}")]
    NegativeScale(f32),

    #[error("invalid range for `{field}`: min={min}, max={max}")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("drag must be >= 0, got {0}")]
    NegativeDrag(f32),
}
