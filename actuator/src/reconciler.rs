use engine::Surface;

use crate::config::MessageConfig;
use crate::mount::Mount;
use crate::score::ScoreBoard;
use crate::snapshot::{Grid, Metadata, Outcome};
use crate::tile_renderer::{SettleTile, TileRenderer};

const WON_CLASS: &str = "game-won";
const LOST_CLASS: &str = "game-over";

/// Full-frame redraw of the board: no diffing, every frame rebuilds every tile node.
#[derive(Debug, Clone)]
pub struct GridReconciler {
    tiles: TileRenderer,
    score: ScoreBoard,
    messages: MessageConfig,
}

impl GridReconciler {
    pub fn new(tiles: TileRenderer, messages: MessageConfig) -> Self {
        Self {
            tiles,
            score: ScoreBoard::new(),
            messages,
        }
    }

    pub fn score_board(&self) -> &ScoreBoard {
        &self.score
    }

    /// Rebuilds the tile layer from `grid`, then score and terminal messaging, in one pass.
    ///
    /// The returned settle work must run on the next redraw cycle.
    pub fn redraw<S: Surface>(
        &mut self,
        surface: &mut S,
        mount: &Mount,
        grid: &Grid,
        metadata: &Metadata,
    ) -> Vec<SettleTile> {
        surface.clear_children(mount.tile_container);

        let mut settles = Vec::new();
        for tile in grid.tiles() {
            settles.extend(self.tiles.render(surface, mount.tile_container, tile));
        }

        self.score
            .update_score(surface, mount.score_container, metadata.score);
        self.score
            .update_best_score(surface, mount.best_container, metadata.best_score);

        if let Some(outcome) = metadata.outcome() {
            self.show_message(surface, mount, outcome);
        }
        settles
    }

    pub fn show_message<S: Surface>(&self, surface: &mut S, mount: &Mount, outcome: Outcome) {
        let (class, text) = match outcome {
            Outcome::Won => (WON_CLASS, self.messages.won.as_str()),
            Outcome::Lost => (LOST_CLASS, self.messages.lost.as_str()),
        };
        surface.add_class(mount.message_container, class);
        surface.set_text(mount.message_text, text);
    }

    pub fn clear_message<S: Surface>(&self, surface: &mut S, mount: &Mount) {
        surface.remove_class(mount.message_container, WON_CLASS);
        surface.remove_class(mount.message_container, LOST_CLASS);
    }
}
