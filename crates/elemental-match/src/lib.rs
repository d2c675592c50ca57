//! Turn sequencing for elemental chess: move validation, capture mix and
//! reaction, ice slides, end-of-turn ticking and game-end detection.

mod config;
mod error;
mod events;
mod orchestrator;

pub mod generator;
pub mod pending;

pub use config::{DEFAULT_TIMEOUT, MatchConfig, ReactionSource};
pub use error::{GeneratorError, Rejection};
pub use events::{MatchEvent, MatchObserver};
pub use generator::{ElementGenerator, OfflineGenerator, ScriptedGenerator};
pub use orchestrator::{CaptureReport, Match, Phase, TriggerReport, TurnReport};
pub use pending::{CaptureTicket, PendingData, PendingSender};
