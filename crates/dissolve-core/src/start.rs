/// One-shot countdown before an automatic dissolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartDelay {
    delay_seconds: f32,
    elapsed_seconds: f32,
    fired: bool,
}

impl StartDelay {
    pub fn new(delay_seconds: f32) -> Self {
        Self {
            delay_seconds: delay_seconds.max(0.0),
            elapsed_seconds: 0.0,
            fired: false,
        }
    }

    pub fn delay_seconds(&self) -> f32 {
        self.delay_seconds
    }

    pub fn is_fired(&self) -> bool {
        self.fired
    }

    pub fn remaining_seconds(&self) -> f32 {
        (self.delay_seconds - self.elapsed_seconds).max(0.0)
    }

    /// Advance by `dt_seconds`. Returns true exactly once, on the advance that reaches the delay.
    pub fn advance(&mut self, dt_seconds: f32) -> bool {
        if self.fired {
            return false;
        }
        self.elapsed_seconds += dt_seconds.max(0.0);
        if self.elapsed_seconds >= self.delay_seconds {
            self.fired = true;
            return true;
        }
        false
    }
}
