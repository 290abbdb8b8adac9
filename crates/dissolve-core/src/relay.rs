//! Layer-filtered enter/exit notification relay.

/// Bit set of layers; layer `n` is bit `1 << n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    pub const fn from_layer(layer: u8) -> Self {
        if layer < 32 {
            Self(1 << layer)
        } else {
            Self::NONE
        }
    }

    pub const fn with_layer(self, layer: u8) -> Self {
        Self(self.0 | Self::from_layer(layer).0)
    }

    pub const fn contains(self, layer: u8) -> bool {
        layer < 32 && self.0 & (1 << layer) != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelayKind {
    Enter,
    Exit,
}

/// Decides whether an overlap begin/end should be forwarded.
///
/// A one-shot relay latches after its first enter notification; from then on it forwards
/// neither enters nor exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerRelay {
    pub layers: LayerMask,
    pub one_shot: bool,
    triggered: bool,
}

impl TriggerRelay {
    pub fn new(layers: LayerMask) -> Self {
        Self {
            layers,
            one_shot: false,
            triggered: false,
        }
    }

    pub fn one_shot(mut self) -> Self {
        self.one_shot = true;
        self
    }

    pub fn has_triggered(&self) -> bool {
        self.triggered
    }

    fn armed(&self) -> bool {
        !self.one_shot || !self.triggered
    }

    /// Returns true when the enter notification should fire for an overlap with `layer`.
    pub fn on_enter(&mut self, layer: u8) -> bool {
        if !self.armed() || !self.layers.contains(layer) {
            return false;
        }
        if self.one_shot {
            self.triggered = true;
        }
        true
    }

    /// Returns true when the exit notification should fire for an overlap with `layer`.
    pub fn on_exit(&self, layer: u8) -> bool {
        self.armed() && self.layers.contains(layer)
    }

    pub fn handle(&mut self, kind: RelayKind, layer: u8) -> bool {
        match kind {
            RelayKind::Enter => self.on_enter(layer),
            RelayKind::Exit => self.on_exit(layer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_ignores_out_of_range_layers() {
        let mask = LayerMask::from_layer(3).with_layer(31);
        assert!(mask.contains(3));
        assert!(mask.contains(31));
        assert!(!mask.contains(4));
        assert!(!LayerMask::ALL.contains(32));
    }
}
