use engine::{ClassList, NodeId, Surface};

/// Points gained since the last shown score, if any.
pub fn score_delta(previous: u64, score: u64) -> Option<u64> {
    score.checked_sub(previous).filter(|d| *d > 0)
}

/// Current/best score display. Remembers the last score it showed so gains can be flashed as
/// `+N`; durability of the best score is the game engine's business.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    last_score: u64,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_score(&self) -> u64 {
        self.last_score
    }

    /// Returns the delta that was flashed, if one was.
    pub fn update_score<S: Surface>(
        &mut self,
        surface: &mut S,
        container: NodeId,
        score: u64,
    ) -> Option<u64> {
        surface.clear_children(container);

        let delta = score_delta(self.last_score, score);
        self.last_score = score;
        surface.set_text(container, &score.to_string());

        if let Some(delta) = delta {
            surface.create_text_node(
                container,
                ClassList::from_names(["score-addition"]),
                &format!("+{delta}"),
            );
        }
        delta
    }

    pub fn update_best_score<S: Surface>(&self, surface: &mut S, container: NodeId, best: u64) {
        surface.set_text(container, &best.to_string());
    }
}
