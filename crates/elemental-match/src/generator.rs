//! The external element generator and bounded calls into it.

use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use elemental_core::Element;
use elemental_core::reaction::{MixResult, ReactionContext, ReactionDescriptor};
use tracing::debug;

use crate::error::GeneratorError;

/// Produces new elements and reaction descriptors for captures.
///
/// Implementations may block; calls are made from a worker thread and
/// abandoned after the configured timeout. Output is untrusted and gets
/// validated by the reaction pipeline.
pub trait ElementGenerator: Send + Sync {
    /// Mix the attacker's and defender's elements.
    fn mix(&self, attacker: &Element, defender: &Element) -> Result<MixResult, GeneratorError>;

    /// Describe the reaction for a mix at the captured square.
    fn reaction(
        &self,
        mix: &MixResult,
        context: &ReactionContext,
    ) -> Result<ReactionDescriptor, GeneratorError>;
}

/// A generator that is never reachable; every capture uses the local
/// fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

impl ElementGenerator for OfflineGenerator {
    fn mix(&self, _attacker: &Element, _defender: &Element) -> Result<MixResult, GeneratorError> {
        Err(GeneratorError::Unavailable {
            reason: "offline".to_string(),
        })
    }

    fn reaction(

        &self,

        _mix: &MixResult,

        _context: &ReactionContext,

    ) -> Result<ReactionDescriptor, GeneratorError> {
        Err(GeneratorError::Unavailable {
            reason: "offline".to_string(),
        })
    }
}

/// A generator that replays fixed JSON documents, decoding them on every
/// call. Useful for tooling and for replaying captured generator output.
#[derive(Debug, Clone)]
pub struct ScriptedGenerator {
    mix_json: String,
    reaction_json: String,
}

impl ScriptedGenerator {
    pub fn new(mix_json: impl Into<String>, reaction_json: impl Into<String>) -> ScriptedGenerator {
        ScriptedGenerator {
            mix_json: mix_json.into(),
            reaction_json: reaction_json.into(),
        }
    }
}

impl ElementGenerator for ScriptedGenerator {
    fn mix(&self, _attacker: &Element, _defender: &Element) -> Result<MixResult, GeneratorError> {
        Ok(MixResult::from_json(&self.mix_json)?)
    }

    fn reaction(

        &self,

        _mix: &MixResult,

        _context: &ReactionContext,

    ) -> Result<ReactionDescriptor, GeneratorError> {
        Ok(ReactionDescriptor::from_json(&self.reaction_json)?)
    }
}

/// Run `call` on a worker thread and wait at most `timeout` for its answer.
///
/// A late answer is dropped with the channel; it never reaches the caller.
pub fn call_with_timeout<T, F>(timeout: Duration, call: F) -> Result<T, GeneratorError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, GeneratorError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(call());
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            debug!(?timeout, "generator call abandoned");
            Err(GeneratorError::TimedOut { waited: timeout })
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(GeneratorError::Disconnected),
    }
}

/// Bounded [`ElementGenerator::mix`].
pub fn mix_with_timeout(
    generator: &Arc<dyn ElementGenerator>,
    attacker: &Element,
    defender: &Element,
    timeout: Duration,
) -> Result<MixResult, GeneratorError> {
    let generator = Arc::clone(generator);
    let (attacker, defender) = (attacker.clone(), defender.clone());
    call_with_timeout(timeout, move || generator.mix(&attacker, &defender))
}

/// Bounded [`ElementGenerator::reaction`].
pub fn reaction_with_timeout(
    generator: &Arc<dyn ElementGenerator>,
    mix: &MixResult,
    context: &ReactionContext,
    timeout: Duration,
) -> Result<ReactionDescriptor, GeneratorError> {
    let generator = Arc::clone(generator);
    let (mix, context) = (mix.clone(), context.clone());
    call_with_timeout(timeout, move || generator.reaction(&mix, &context))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sleepy(Duration);

    impl ElementGenerator for Sleepy {
        fn mix(
            &self,
            attacker: &Element,
            _defender: &Element,
        ) -> Result<MixResult, GeneratorError> {
            thread::sleep(self.0);
            Ok(MixResult::unchanged(attacker))
        }

        fn reaction(

            &self,

            _mix: &MixResult,

            _context: &ReactionContext,

        ) -> Result<ReactionDescriptor, GeneratorError> {
            thread::sleep(self.0);
            Ok(ReactionDescriptor::default())
        }
    }

    fn fire() -> Element {
        Element::new("Fire", "🔥")
    }

    #[test]
    fn fast_call_returns_value() {
        let value = call_with_timeout(Duration::from_secs(5), || Ok(7)).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn slow_generator_times_out() {
        let generator: Arc<dyn ElementGenerator> = Arc::new(Sleepy(Duration::from_millis(500)));
        let result = mix_with_timeout(&generator, &fire(), &fire(), Duration::from_millis(10));
        assert_eq!(
            result,
            Err(GeneratorError::TimedOut {
                waited: Duration::from_millis(10)
            })
        );
    }

    #[test]
    fn panicking_worker_is_disconnected() {
        let result: Result<u8, _> =
            call_with_timeout(Duration::from_secs(5), || panic!("worker died"));
        assert_eq!(result, Err(GeneratorError::Disconnected));
    }

    #[test]
    fn offline_is_unavailable() {
        let generator: Arc<dyn ElementGenerator> = Arc::new(OfflineGenerator);
        let result = mix_with_timeout(&generator, &fire(), &fire(), Duration::from_secs(5));
        assert!(matches!(result, Err(GeneratorError::Unavailable { .. })));
    }

    #[test]
    fn scripted_decodes_and_reports_garbage() {
        let generator =
            ScriptedGenerator::new(r#"{"element": "Magma", "winner": "Fire"}"#, "not json");
        let mix = generator.mix(&fire(), &fire()).unwrap();
        assert_eq!(mix.element, "Magma");
        let context = ReactionContext {
            square: elemental_core::Square::D5,
            attacker_kind: elemental_core::PieceKind::Queen,
            attacker_side: elemental_core::Side::White,
            defender_kind: elemental_core::PieceKind::Pawn,
            defender_side: elemental_core::Side::Black,
            combined_value: 10,
            tier: elemental_core::reaction::PowerTier::Massive,
            attacker_element: fire(),
            defender_element: fire(),
            enemies_nearby: 0,
            friendlies_nearby: 0,
        };
        assert!(matches!(
            generator.reaction(&mix, &context),
            Err(GeneratorError::Malformed { .. })
        ));
    }
}
