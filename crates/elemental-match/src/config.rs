//! Match configuration.

use std::time::Duration;

use elemental_core::BoardLayout;
use elemental_core::reaction::DEFAULT_EFFECT_CAP;

/// Default bound on each generator call and on waiting for pending data.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Where capture results come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReactionSource {
    /// Call the element generator directly.
    #[default]
    Generator,
    /// Wait for the mix and reaction to be delivered through the pending
    /// channel, typically by the opponent's client.
    Remote,
}

/// Knobs for a [`Match`](crate::Match).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Bound on each `mix` / `reaction` generator call.
    pub generator_timeout: Duration,
    /// Bound on waiting for remotely supplied data.
    pub pending_timeout: Duration,
    pub reaction_source: ReactionSource,
    /// Pause after each reaction wave. Zero disables pacing.
    pub presentation_delay: Duration,
    /// Maximum number of resolved effects per reaction.
    pub effect_cap: usize,
    /// Element overrides used when pieces are spawned.
    pub layout: BoardLayout,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            generator_timeout: DEFAULT_TIMEOUT,
            pending_timeout: DEFAULT_TIMEOUT,
            reaction_source: ReactionSource::Generator,
            presentation_delay: Duration::ZERO,
            effect_cap: DEFAULT_EFFECT_CAP,
            layout: BoardLayout::default(),
        }
    }
}

impl MatchConfig {
    pub fn with_generator_timeout(mut self, timeout: Duration) -> Self {
        self.generator_timeout = timeout;
        self
    }

    pub fn with_pending_timeout(mut self, timeout: Duration) -> Self {
        self.pending_timeout = timeout;
        self
    }

    pub fn with_reaction_source(mut self, source: ReactionSource) -> Self {
        self.reaction_source = source;
        self
    }

    pub fn with_presentation_delay(mut self, delay: Duration) -> Self {
        self.presentation_delay = delay;
        self
    }

    /// Set the effect cap. A cap of zero is raised to one.
    pub fn with_effect_cap(mut self, cap: usize) -> Self {
        self.effect_cap = cap.max(1);
        self
    }

    pub fn with_layout(mut self, layout: BoardLayout) -> Self {
        self.layout = layout;
        self
    }
}
