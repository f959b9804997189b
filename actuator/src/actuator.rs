use std::time::Duration;

use engine::{FrameScheduler, NodeId, Surface, ViewTree};
use serde::Serialize;

use crate::click_gate::{ClickGate, GateOutcome};
use crate::config::ActuatorConfig;
use crate::dialog::ForcedDialog;
use crate::engagement::{EngagementEffect, EngagementEvent, EngagementState, ForcedEngagement};
use crate::error::{ActuatorError, Result};
use crate::merge_message;
use crate::mount::Mount;
use crate::penalty::{PenaltyLevel, PenaltyOverlay};
use crate::reconciler::GridReconciler;
use crate::snapshot::{Grid, Metadata};
use crate::tile_renderer::{SettleTile, TileRenderer};

/// Work items owned by the scheduler. Plain data so pending work can be inspected in tests.
#[derive(Debug, Clone)]
enum Task {
    Redraw(Box<(Grid, Metadata)>),
    Settle(SettleTile),
    Engagement(EngagementEvent),
    ExpireMergeMessage(NodeId),
}

/// Read-only view of the session counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActuatorState {
    pub last_score: u64,
    pub click_count: u32,
    pub dialog_active: bool,
    pub wrong_answer_count: u32,
}

/// Presentation core for the tile game.
///
/// Owns the host surface and drives it from game snapshots and user clicks. Time is virtual:
/// the host calls `run_frame` on each redraw opportunity and `advance` as wall time passes.
pub struct Actuator<S: Surface> {
    surface: S,
    mount: Mount,
    config: ActuatorConfig,
    scheduler: FrameScheduler<Task>,
    reconciler: GridReconciler,
    gate: ClickGate,
    engagement: ForcedEngagement,
    dialog: Option<ForcedDialog>,
    overlay: PenaltyOverlay,
}

impl Actuator<ViewTree> {
    /// An actuator over an in-memory tree with the standard layout.
    pub fn headless(config: ActuatorConfig) -> Self {
        let mut tree = ViewTree::new();
        let mount = Mount::scaffold(&mut tree);
        Self::new(tree, mount, config)
    }
}

impl<S: Surface> Actuator<S> {
    pub fn new(mut surface: S, mount: Mount, config: ActuatorConfig) -> Self {
        let config = config.sanitized();
        let overlay = PenaltyOverlay::mount(&mut surface, mount.overlay_host, mount.page);
        let reconciler = GridReconciler::new(
            TileRenderer::new(config.super_tile_threshold),
            config.messages.clone(),
        );
        Self {
            surface,
            mount,
            scheduler: FrameScheduler::new(),
            reconciler,
            gate: ClickGate::new(config.click_threshold),
            engagement: ForcedEngagement::new(
                config.wrong_answer_dismiss_delay,
                config.reprompt_delay,
            ),
            dialog: None,
            overlay,
            config,
        }
    }

    /// Queues a full redraw for the next frame. The snapshot is checked up front; a rejected one
    /// leaves everything untouched.
    pub fn render(&mut self, grid: Grid, metadata: Metadata) -> Result<()> {
        if let Err(err) = grid.validate() {
            tracing::warn!(%err, "rejected grid snapshot");
            return Err(err);
        }
        self.scheduler
            .request_frame(Task::Redraw(Box::new((grid, metadata))));
        Ok(())
    }

    /// Clears the win/lose message. Click and penalty state survive restarts.
    pub fn continue_game(&mut self) {
        self.reconciler.clear_message(&mut self.surface, &self.mount);
    }

    /// A user click anywhere on the page. `target` is the node under the pointer, if known.
    ///
    /// Clicks on a dialog button answer the question and are never counted.
    pub fn click(&mut self, target: Option<NodeId>) -> GateOutcome {
        let option = target.and_then(|node| self.dialog.as_ref()?.option_at(node));
        if let Some(index) = option {
            let correct = self
                .config
                .question
                .options
                .get(index)
                .is_some_and(|o| o.correct);
            self.dispatch(EngagementEvent::Answer { correct });
            return GateOutcome::Suppressed;
        }

        let outcome = self
            .gate
            .register(self.engagement.state().is_dialog_active());
        if outcome == GateOutcome::Triggered {
            tracing::debug!(threshold = self.gate.threshold(), "click threshold exceeded");
            self.open_forced_question();
        }
        outcome
    }

    /// Picks option `index` of the forced question. A no-op while no dialog is on screen.
    pub fn answer(&mut self, index: usize) -> Result<()> {
        let options = &self.config.question.options;
        let option = options.get(index).ok_or(ActuatorError::UnknownOption {
            index,
            available: options.len(),
        })?;
        let correct = option.correct;
        self.dispatch(EngagementEvent::Answer { correct });
        Ok(())
    }

    /// Shows the forced question unless one is already active.
    pub fn open_forced_question(&mut self) {
        self.dispatch(EngagementEvent::Open);
    }

    pub fn show_merge_message(&mut self, text: &str) -> NodeId {
        let node = merge_message::show(&mut self.surface, self.mount.overlay_host, text);
        self.scheduler.set_timeout(
            self.config.merge_message_lifetime,
            Task::ExpireMergeMessage(node),
        );
        node
    }

    /// Runs everything queued for this redraw cycle. Returns how many tasks ran.
    pub fn run_frame(&mut self) -> usize {
        let tasks = self.scheduler.take_frame();
        let count = tasks.len();
        for task in tasks {
            self.run(task);
        }
        count
    }

    /// Runs redraw cycles until nothing new gets queued.
    pub fn flush_frames(&mut self) {
        while self.scheduler.has_pending_frame() {
            self.run_frame();
        }
    }

    /// Moves the clock forward by `dt`, firing every timer that comes due on the way.
    pub fn advance(&mut self, dt: Duration) {
        let until = self.scheduler.now().saturating_add(dt);
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run(task);
        }
        self.scheduler.settle(until);
    }

    pub fn tick(&mut self, dt: Duration) {
        self.advance(dt);
        self.run_frame();
    }

    pub fn state(&self) -> ActuatorState {
        ActuatorState {
            last_score: self.reconciler.score_board().last_score(),
            click_count: self.gate.count(),
            dialog_active: self.engagement.state().is_dialog_active(),
            wrong_answer_count: self.engagement.wrong_answers(),
        }
    }

    pub fn engagement_state(&self) -> EngagementState {
        self.engagement.state()
    }

    pub fn penalty_level(&self) -> PenaltyLevel {
        self.overlay.level()
    }

    pub fn dialog(&self) -> Option<&ForcedDialog> {
        self.dialog.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn config(&self) -> &ActuatorConfig {
        &self.config
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_timers()
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::Redraw(snapshot) => {
                let (grid, metadata) = *snapshot;
                tracing::debug!(
                    tiles = grid.tiles().count(),
                    score = metadata.score,
                    "redraw"
                );
                let settles =
                    self.reconciler
                        .redraw(&mut self.surface, &self.mount, &grid, &metadata);
                // Applying these in this same cycle would skip the move animation.
                for settle in settles {
                    self.scheduler.request_frame(Task::Settle(settle));
                }
            }
            Task::Settle(settle) => {
                if self.surface.is_attached(settle.node) {
                    self.surface.set_classes(settle.node, &settle.classes);
                    tracing::trace!(node = settle.node.0, "tile settled");
                }
            }
            Task::Engagement(event) => self.dispatch(event),
            Task::ExpireMergeMessage(node) => merge_message::expire(&mut self.surface, node),
        }
    }

    fn dispatch(&mut self, event: EngagementEvent) {
        for effect in self.engagement.handle(event) {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: EngagementEffect) {
        match effect {
            EngagementEffect::ShowDialog => {
                if self.dialog.is_none() {
                    self.dialog = Some(ForcedDialog::build(
                        &mut self.surface,
                        self.mount.overlay_host,
                        &self.config.question,
                    ));
                }
            }
            EngagementEffect::DismissDialog => {
                if let Some(dialog) = self.dialog.take() {
                    dialog.dismiss(&mut self.surface);
                }
            }
            EngagementEffect::ShakeDialog => {
                if let Some(dialog) = &self.dialog {
                    dialog.shake(&mut self.surface);
                }
            }
            EngagementEffect::ShowHint => {
                if let Some(dialog) = self.dialog.as_mut() {
                    dialog.show_hint(&mut self.surface);
                }
            }
            EngagementEffect::RecomputeOverlay { wrong_answers } => {
                self.overlay.recompute(&mut self.surface, wrong_answers);
            }
            EngagementEffect::Schedule { delay, event } => {
                self.scheduler.set_timeout(delay, Task::Engagement(event));
            }
            EngagementEffect::RearmGate => self.gate.rearm(),
        }
    }
}
