#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// A forced dialog is active; the click was not counted.
    Suppressed,
    Counted,
    /// The threshold was exceeded; the counter is back at zero.
    Triggered,
}

/// Counts qualifying clicks and trips once the count exceeds `threshold`.
#[derive(Debug, Clone)]
pub struct ClickGate {
    threshold: u32,
    count: u32,
}

impl ClickGate {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            count: 0,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn register(&mut self, dialog_active: bool) -> GateOutcome {
        if dialog_active {
            return GateOutcome::Suppressed;
        }
        self.count += 1;
        if self.count > self.threshold {
            self.count = 0;
            GateOutcome::Triggered
        } else {
            GateOutcome::Counted
        }
    }

    /// Starts a fresh count once the forced dialog is resolved.
    pub fn rearm(&mut self) {
        self.count = 0;
    }
}
