use engine::{ClassList, NodeId, Surface};
use serde::Serialize;

const OVERLAY_CLASS: &str = "penalty-overlay";
const OPACITY_STEP_PERCENT: u32 = 15;
const OPACITY_CAP_PERCENT: u32 = 70;
const PULSING_FROM: u32 = 3;
const BLINKING_FROM: u32 = 5;
const ALERT_FROM: u32 = 3;
const ALERT_EXTREME_FROM: u32 = 6;

/// Page-wide tint. `Alert` and `AlertExtreme` never apply together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tint {
    Alert,
    AlertExtreme,
}

impl Tint {
    pub const ALL: [Tint; 2] = [Tint::Alert, Tint::AlertExtreme];

    pub fn class(self) -> &'static str {
        match self {
            Tint::Alert => "alert",
            Tint::AlertExtreme => "alert-extreme",
        }
    }
}

/// Visual intensity derived from the wrong-answer count alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PenaltyLevel {
    pub wrong_answers: u32,
    /// Kept in whole percent so the table stays exact.
    pub opacity_percent: u32,
    pub pulsing: bool,
    pub blinking: bool,
    pub tint: Option<Tint>,
}

impl PenaltyLevel {
    pub fn from_wrong_answers(wrong_answers: u32) -> Self {
        let tint = match wrong_answers {
            n if n >= ALERT_EXTREME_FROM => Some(Tint::AlertExtreme),
            n if n >= ALERT_FROM => Some(Tint::Alert),
            _ => None,
        };
        Self {
            wrong_answers,
            opacity_percent: wrong_answers
                .saturating_mul(OPACITY_STEP_PERCENT)
                .min(OPACITY_CAP_PERCENT),
            pulsing: wrong_answers >= PULSING_FROM,
            blinking: wrong_answers >= BLINKING_FROM,
            tint,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity_percent as f32 / 100.0
    }

    pub fn is_visible(&self) -> bool {
        self.wrong_answers > 0
    }

    /// CSS-style decimal, e.g. `0.45`.
    pub fn opacity_value(&self) -> String {
        format!(
            "{}.{:02}",
            self.opacity_percent / 100,
            self.opacity_percent % 100
        )
    }

    pub fn overlay_classes(&self) -> ClassList {
        let mut classes = ClassList::from_names([OVERLAY_CLASS]);
        if self.is_visible() {
            classes.push("visible");
        }
        if self.pulsing {
            classes.push("pulsing");
        }
        if self.blinking {
            classes.push("blinking");
        }
        classes
    }
}

/// The reddening layer over the board, plus the page tint.
#[derive(Debug, Clone)]
pub struct PenaltyOverlay {
    node: NodeId,
    page: NodeId,
    level: PenaltyLevel,
}

impl PenaltyOverlay {
    pub fn mount<S: Surface>(surface: &mut S, host: NodeId, page: NodeId) -> Self {
        let level = PenaltyLevel::from_wrong_answers(0);
        let node = surface.create_node(host, level.overlay_classes());
        Self { node, page, level }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn level(&self) -> PenaltyLevel {
        self.level
    }

    /// Re-renders every penalty visual from scratch for `wrong_answers`.
    pub fn recompute<S: Surface>(&mut self, surface: &mut S, wrong_answers: u32) -> PenaltyLevel {
        let level = PenaltyLevel::from_wrong_answers(wrong_answers);

        surface.set_classes(self.node, &level.overlay_classes());
        let opacity = level.is_visible().then(|| level.opacity_value());
        surface.set_style(self.node, "opacity", opacity.as_deref());

        for tint in Tint::ALL {
            if level.tint == Some(tint) {
                surface.add_class(self.page, tint.class());
            } else {
                surface.remove_class(self.page, tint.class());
            }
        }

        if level != self.level {
            tracing::debug!(
                wrong_answers,
                opacity = level.opacity(),
                tint = ?level.tint,
                "penalty level changed"
            );
        }
        self.level = level;
        level
    }
}
