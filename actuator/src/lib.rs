//! Presentation core for a tile-merging puzzle: renders grid snapshots onto a `Surface`, animates
//! moves and merges, and runs the forced question with its escalating penalty overlay.

pub mod actuator;
pub mod click_gate;
pub mod config;
pub mod dialog;
pub mod engagement;
pub mod error;
pub mod merge_message;
pub mod mount;
pub mod penalty;
pub mod position;
pub mod rainbow;
pub mod reconciler;
pub mod score;
pub mod snapshot;
pub mod tile_renderer;

pub use actuator::{Actuator, ActuatorState};
pub use click_gate::GateOutcome;
pub use config::{ActuatorConfig, AnswerOption, ConfigStore, MessageConfig, QuestionConfig};
pub use engagement::EngagementState;
pub use error::{ActuatorError, Result};
pub use mount::Mount;
pub use penalty::{PenaltyLevel, Tint};
pub use snapshot::{Grid, Metadata, Outcome, Position, Tile};
