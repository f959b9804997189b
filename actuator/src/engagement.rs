use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementState {
    #[default]
    Idle,
    AwaitingAnswer,
    /// A wrong answer was given; the dialog is auto-dismissed and then shown again.
    Penalized { dismissed: bool },
}

impl EngagementState {
    /// True from the moment the dialog is first shown until a correct answer, including the gap
    /// between an auto-dismiss and the re-prompt.
    pub fn is_dialog_active(self) -> bool {
        !matches!(self, EngagementState::Idle)
    }

    /// True while the dialog is on screen and accepting answers.
    pub fn is_dialog_shown(self) -> bool {
        matches!(
            self,
            EngagementState::AwaitingAnswer | EngagementState::Penalized { dismissed: false }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementEvent {
    Open,
    Answer { correct: bool },
    /// Deferred: tag is the prompt epoch at scheduling time.
    DismissElapsed { epoch: u64 },
    ReopenElapsed { epoch: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementEffect {
    ShowDialog,
    DismissDialog,
    ShakeDialog,
    ShowHint,
    RecomputeOverlay { wrong_answers: u32 },
    Schedule {
        delay: Duration,
        event: EngagementEvent,
    },
    RearmGate,
}

/// The forced question state machine.
///
/// Transitions are pure: side-effects (building the dialog, timers, overlay updates) are reported
/// as `EngagementEffect`s so callers stay deterministic and easy to test. Deferred events carry the
/// epoch they were scheduled in and are dropped if the machine has moved on since.
#[derive(Debug, Clone)]
pub struct ForcedEngagement {
    state: EngagementState,
    wrong_answers: u32,
    epoch: u64,
    dismiss_delay: Duration,
    reprompt_delay: Duration,
}

impl ForcedEngagement {
    pub fn new(dismiss_delay: Duration, reprompt_delay: Duration) -> Self {
        Self {
            state: EngagementState::Idle,
            wrong_answers: 0,
            epoch: 0,
            dismiss_delay,
            reprompt_delay,
        }
    }

    pub fn state(&self) -> EngagementState {
        self.state
    }

    pub fn wrong_answers(&self) -> u32 {
        self.wrong_answers
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn handle(&mut self, event: EngagementEvent) -> Vec<EngagementEffect> {
        use EngagementEffect as Fx;
        use EngagementState as St;

        match (self.state, event) {
            (St::Idle, EngagementEvent::Open) => {
                self.show();
                vec![Fx::ShowDialog]
            }

            (state, EngagementEvent::Answer { correct: true }) if state.is_dialog_shown() => {
                self.state = St::Idle;
                self.wrong_answers = 0;
                self.epoch += 1;
                tracing::debug!("forced question resolved");
                vec![
                    Fx::DismissDialog,
                    Fx::RecomputeOverlay { wrong_answers: 0 },
                    Fx::RearmGate,
                ]
            }

            (St::AwaitingAnswer, EngagementEvent::Answer { correct: false }) => {
                self.state = St::Penalized { dismissed: false };
                let mut effects = self.penalize();
                effects.push(Fx::Schedule {
                    delay: self.dismiss_delay,
                    event: EngagementEvent::DismissElapsed { epoch: self.epoch },
                });
                effects
            }

            // Already on the re-prompt path: escalate, but keep the one pending chain.
            (St::Penalized { dismissed: false }, EngagementEvent::Answer { correct: false }) => {
                self.penalize()
            }

            (St::Penalized { dismissed: false }, EngagementEvent::DismissElapsed { epoch })
                if epoch == self.epoch =>
            {
                self.state = St::Penalized { dismissed: true };
                tracing::debug!(epoch, "penalized dialog dismissed");
                vec![
                    Fx::DismissDialog,
                    Fx::Schedule {
                        delay: self.reprompt_delay,
                        event: EngagementEvent::ReopenElapsed { epoch },
                    },
                ]
            }

            (St::Penalized { dismissed: true }, EngagementEvent::ReopenElapsed { epoch })
                if epoch == self.epoch =>
            {
                self.show();
                vec![Fx::ShowDialog]
            }

            (state, event) => {
                tracing::trace!(?state, ?event, "engagement event ignored");
                Vec::new()
            }
        }
    }

    fn show(&mut self) {
        self.state = EngagementState::AwaitingAnswer;
        self.epoch += 1;
        tracing::debug!(epoch = self.epoch, "forced question shown");
    }

    fn penalize(&mut self) -> Vec<EngagementEffect> {
        self.wrong_answers += 1;
        tracing::debug!(wrong_answers = self.wrong_answers, "wrong answer");
        vec![
            EngagementEffect::ShakeDialog,
            EngagementEffect::ShowHint,
            EngagementEffect::RecomputeOverlay {
                wrong_answers: self.wrong_answers,
            },
        ]
    }
}
