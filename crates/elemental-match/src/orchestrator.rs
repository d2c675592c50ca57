//! The Move/Capture state machine.
//!
//! A turn runs `Idle → Moving → (CaptureResolving → ReactionApplying)? →
//! TurnAdvancing → Idle`, or ends in `GameOver`. [`Match::submit_move`] runs
//! a whole turn; [`Match::begin_move`] and [`Match::complete_move`] split it
//! at the point where capture data is awaited, so a caller can reset the
//! match while a resolution is still pending.

use std::sync::Arc;
use std::thread;

use elemental_core::movegen::castling_rook;
use elemental_core::reaction::{
    MixResult, ReactionContext, ReactionDescriptor, ReactionPlan, TradeOutcome, Trigger, WaveReport,
    apply_wave, plan_reaction,
};
use elemental_core::{
    BoardDump, BoardError, BoardState, GameOutcome, Piece, PieceId, PieceKind, Side, Square,
    SquareSet, TickReport, TileEffectKind, game_status, legal_moves, tick_side,
};
use elemental_engine::{FlatBoard, RankedMove, SearchControl, SearchLimits, rank_moves};
use tracing::{debug, info, warn};

use crate::config::{MatchConfig, ReactionSource};
use crate::error::Rejection;
use crate::events::{MatchEvent, MatchObserver};
use crate::generator::{ElementGenerator, OfflineGenerator, mix_with_timeout, reaction_with_timeout};
use crate::pending::{PendingReaction, PendingSender};

/// Where the match is within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Moving,
    CaptureResolving,
    ReactionApplying,
    TurnAdvancing,
    GameOver,
}

/// The capture half of a [`TurnReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureReport {
    pub captured: Piece,
    pub mix: MixResult,
    pub trade: TradeOutcome,
    pub plan: ReactionPlan,
    pub applied: WaveReport,
}

/// Everything that happened during one completed turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub side: Side,
    pub from: Square,
    pub to: Square,
    pub castle: Option<(Square, Square)>,
    pub promoted: bool,
    pub capture: Option<CaptureReport>,
    /// Ice slide of the mover, as (from, to).
    pub slide: Option<(Square, Square)>,
    pub tick: TickReport,
    pub outcome: Option<GameOutcome>,
}

/// Result of [`Match::trigger_reaction`].
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerReport {
    pub plan: ReactionPlan,
    pub applied: WaveReport,
    pub outcome: Option<GameOutcome>,
}

/// A move that has been committed but not yet resolved.
#[derive(Debug, Clone)]
struct InFlight {
    side: Side,
    from: Square,
    to: Square,
    mover: PieceId,
    castle: Option<(Square, Square)>,
    promoted: bool,
    captured: Option<Piece>,
}

/// One elemental chess match.
///
/// Owns the board; all mutation goes through this type on the caller's
/// thread. Only generator calls run on worker threads, and their answers
/// are bounded by the configured timeouts.
pub struct Match {
    config: MatchConfig,
    board: BoardState,
    side_to_move: Side,
    phase: Phase,
    turn: u32,
    outcome: Option<GameOutcome>,
    in_flight: Option<InFlight>,
    generator: Arc<dyn ElementGenerator>,
    pending: PendingReaction,
    observers: Vec<Box<dyn MatchObserver>>,
}

impl Match {
    /// A match from the starting position with an offline generator.
    pub fn new(config: MatchConfig) -> Match {
        let board = BoardState::starting_position(&config.layout);
        Match::from_position(config, board, Side::White)
    }

    /// A match from an arbitrary position.
    pub fn from_position(config: MatchConfig, board: BoardState, side_to_move: Side) -> Match {
        Match {
            config,
            board,
            side_to_move,
            phase: Phase::Idle,
            turn: 1,
            outcome: None,
            in_flight: None,
            generator: Arc::new(OfflineGenerator),
            pending: PendingReaction::new(),
            observers: Vec::new(),
        }
    }

    /// Replace the element generator.
    pub fn with_generator(mut self, generator: Arc<dyn ElementGenerator>) -> Match {
        self.generator = generator;
        self
    }

    /// Register an observer. Observers are notified in registration order.
    pub fn add_observer(&mut self, observer: impl MatchObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Plies started so far, counting from 1.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Text dump of the current position.
    pub fn dump(&self) -> BoardDump<'_> {
        self.board.dump(self.side_to_move)
    }

    /// Handle for delivering remotely computed capture results.
    pub fn pending_sender(&self) -> PendingSender {
        self.pending.sender()
    }

    /// Current match generation; bumped by every [`Match::reset`].
    pub fn generation(&self) -> u64 {
        self.pending.generation()
    }

    /// Destinations the piece on `sq` may move to right now.
    ///
    /// Empty unless the match is idle and the piece belongs to the side to
    /// move.
    pub fn legal_targets(&self, sq: Square) -> SquareSet {
        if self.phase != Phase::Idle || self.board.side_at(sq) != Some(self.side_to_move) {
            return SquareSet::EMPTY;
        }
        legal_moves(&self.board, sq)
    }

    /// Start over from the starting position, abandoning any move still in
    /// flight and any pending capture data.
    pub fn reset(&mut self) {
        let generation = self.pending.invalidate();
        self.board = BoardState::starting_position(&self.config.layout);
        self.side_to_move = Side::White;
        self.phase = Phase::Idle;
        self.turn = 1;
        self.outcome = None;
        self.in_flight = None;
        info!(generation, "match reset");
        self.emit(MatchEvent::TurnChanged {
            side_to_move: Side::White,
            turn: 1,
        });
    }

    /// Play a full turn.
    pub fn submit_move(
        &mut self,
        side: Side,
        from: Square,
        to: Square,
    ) -> Result<TurnReport, Rejection> {
        self.begin_move(side, from, to)?;
        self.complete_move()
    }

    /// Validate and commit a move without resolving it.
    ///
    /// The pieces are relocated (rook included for a castle, promotion
    /// applied) and the match waits in `CaptureResolving` or `TurnAdvancing`
    /// until [`Match::complete_move`] is called.
    pub fn begin_move(&mut self, side: Side, from: Square, to: Square) -> Result<Phase, Rejection> {
        match self.phase {
            Phase::Idle => {}
            Phase::GameOver => return Err(Rejection::GameOver),
            _ => return Err(Rejection::MoveInProgress),
        }
        if side != self.side_to_move {
            return Err(Rejection::WrongSide {
                expected: self.side_to_move,
                found: side,
            });
        }
        let Some(piece) = self.board.piece_at(from).filter(|p| p.side() == side) else {
            return Err(Rejection::NoPiece { side, square: from });
        };
        let mover = piece.id();
        let is_pawn = piece.kind() == PieceKind::Pawn;
        if !legal_moves(&self.board, from).contains(to) {
            debug!(%from, %to, ?side, "illegal move rejected");
            return Err(Rejection::IllegalMove { from, to });
        }

        self.phase = Phase::Moving;
        let castle = castling_rook(&self.board, from, to);
        let captured = self.board.relocate(from, to);
        if let Some((rook_from, rook_to)) = castle {
            self.board.relocate(rook_from, rook_to);
        }
        let promoted = is_pawn && to.row() == side.promotion_row();
        if promoted {
            self.board.promote(to, PieceKind::Queen);
        }
        debug!(%from, %to, ?side, capture = captured.is_some(), promoted, "move committed");

        self.emit(MatchEvent::MoveCommitted {
            side,
            from,
            to,
            castle,
            promoted,
        });
        if let Some(piece) = &captured {
            self.emit(MatchEvent::PieceCaptured {
                square: to,
                piece: piece.clone(),
            });
        }

        self.phase = if captured.is_some() {
            Phase::CaptureResolving
        } else {
            Phase::TurnAdvancing
        };
        self.in_flight = Some(InFlight {
            side,
            from,
            to,
            mover,
            castle,
            promoted,
            captured,
        });
        Ok(self.phase)
    }

    /// Resolve the move started by [`Match::begin_move`]: capture mix and
    /// reaction, ice slide, end-of-turn tick and game-end detection.
    pub fn complete_move(&mut self) -> Result<TurnReport, Rejection> {
        let Some(flight) = self.in_flight.take() else {
            return Err(Rejection::NothingInProgress);
        };

        let capture = match &flight.captured {
            Some(captured) => self.resolve_capture(&flight, captured.clone()),
            None => None,
        };
        let slide = self.slide_on_ice(flight.mover, flight.from, flight.to);
        let (tick, outcome) = self.advance_turn(flight.side);

        Ok(TurnReport {
            side: flight.side,
            from: flight.from,
            to: flight.to,
            castle: flight.castle,
            promoted: flight.promoted,
            capture,
            slide,
            tick,
            outcome,
        })
    }

    /// Resolve a reaction at `square` without a capture.
    ///
    /// The fallback keys on the element of the piece standing on `square`,
    /// if any. Ends the game if the reaction removes a king.
    pub fn trigger_reaction(
        &mut self,
        square: Square,
        acting: Side,
        trade: TradeOutcome,
        descriptor: Option<&ReactionDescriptor>,
    ) -> Result<TriggerReport, Rejection> {
        match self.phase {
            Phase::Idle => {}
            Phase::GameOver => return Err(Rejection::GameOver),
            _ => return Err(Rejection::MoveInProgress),
        }

        let element = self
            .board
            .piece_at(square)
            .map(|p| p.element().name.clone())
            .unwrap_or_default();
        let plan = plan_reaction(
            &self.board,
            Trigger {
                square,
                acting,
                outcome: trade,
                element: &element,
                cap: self.config.effect_cap,
            },
            descriptor,
        );

        self.phase = Phase::ReactionApplying;
        let applied = self.apply_plan(&plan);
        let outcome = self.end_of_turn_check();
        match outcome {
            Some(outcome) => self.finish(outcome),
            None => self.phase = Phase::Idle,
        }
        Ok(TriggerReport { plan, applied, outcome })
    }

    /// Rank candidate moves for the side to move with the search engine,
    /// keeping only moves the effect-aware rules allow.
    pub fn suggest_moves(&self, limits: SearchLimits, control: &SearchControl) -> Vec<RankedMove> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        let snapshot = FlatBoard::from_state(&self.board, self.side_to_move);
        let unbounded = SearchLimits {
            count: usize::MAX,
            ..limits
        };
        rank_moves(&snapshot, unbounded, control)
            .into_iter()
            .filter(|m| self.legal_targets(m.from).contains(m.to))
            .take(limits.count)
            .collect()
    }

    fn resolve_capture(&mut self, flight: &InFlight, captured: Piece) -> Option<CaptureReport> {
        let Some(attacker) = self.board.piece_at(flight.to).cloned() else {
            warn!(square = %flight.to, "capturing piece vanished before resolution");
            return None;
        };

        let context = ReactionContext::capture(&self.board, flight.to, &attacker, &captured);
        let (mix, descriptor) = self.fetch_reaction(flight.to, &attacker, &captured, &context);
        let trade = TradeOutcome::from_winner(&mix.winner, attacker.element(), captured.element());
        self.board.set_element(flight.to, mix.to_element(attacker.element()));

        self.phase = Phase::ReactionApplying;
        let plan = plan_reaction(
            &self.board,
            Trigger {
                square: flight.to,
                acting: flight.side,
                outcome: trade,
                element: &attacker.element().name,
                cap: self.config.effect_cap,
            },
            descriptor.as_ref(),
        );
        debug!(
            square = %flight.to,
            element = %mix.element,
            ?trade,
            effects = plan.effect_count(),
            fallback = plan.used_fallback,
            "capture resolved"
        );
        self.emit(MatchEvent::CaptureResolved {
            square: flight.to,
            mix: mix.clone(),
            trade,
            flavor: plan.flavor.clone(),
            used_fallback: plan.used_fallback,
        });

        let applied = self.apply_plan(&plan);
        Some(CaptureReport {
            captured,
            mix,
            trade,
            plan,
            applied,
        })
    }

    /// Obtain the mix and reaction for a capture from the configured source.
    /// Failures degrade to the unchanged mix and no descriptor.
    fn fetch_reaction(
        &self,
        square: Square,
        attacker: &Piece,
        defender: &Piece,
        context: &ReactionContext,
    ) -> (MixResult, Option<ReactionDescriptor>) {
        match self.config.reaction_source {
            ReactionSource::Generator => {
                let timeout = self.config.generator_timeout;
                let mixed = mix_with_timeout(
                    &self.generator,
                    attacker.element(),
                    defender.element(),
                    timeout,
                );
                let mix = match mixed {
                    Ok(mix) => mix,
                    Err(err) => {
                        warn!(error = %err, "element mix failed, keeping attacker element");
                        return (MixResult::unchanged(attacker.element()), None);
                    }
                };
                match reaction_with_timeout(&self.generator, &mix, context, timeout) {
                    Ok(descriptor) => (mix, Some(descriptor)),
                    Err(err) => {
                        warn!(error = %err, "reaction generator failed, using fallback");
                        (mix, None)
                    }
                }
            }
            ReactionSource::Remote => {
                let waited = self
                    .pending
                    .wait(self.turn, square, self.config.pending_timeout);
                match waited {
                    Ok(data) => {
                        let mix = data
                            .mix
                            .unwrap_or_else(|| MixResult::unchanged(attacker.element()));
                        (mix, data.descriptor)
                    }
                    Err(err) => {
                        warn!(error = %err, "no pending reaction, using fallback");
                        (MixResult::unchanged(attacker.element()), None)
                    }
                }
            }
        }
    }

    fn apply_plan(&mut self, plan: &ReactionPlan) -> WaveReport {
        let mut total = WaveReport::default();
        for (index, wave) in plan.waves.iter().enumerate() {
            let report = apply_wave(&mut self.board, wave);
            total.destroyed.extend(report.destroyed.iter().cloned());
            total.pushed.extend(report.pushed.iter().copied());
            total.applied += report.applied;
            self.emit(MatchEvent::ReactionWave {
                index,
                wave: wave.clone(),
                report,
            });
            if !self.config.presentation_delay.is_zero() {
                thread::sleep(self.config.presentation_delay);
            }
        }
        total
    }

    /// Keep sliding the mover across ice in the direction it entered,
    /// stopping on the first non-ice tile or before an occupied one.
    fn slide_on_ice(
        &mut self,
        mover: PieceId,
        from: Square,
        to: Square,
    ) -> Option<(Square, Square)> {
        let start = self.board.find_piece(mover)?;
        if !self.board.has_tile_effect(start, TileEffectKind::Ice) {
            return None;
        }
        let (d_row, d_col) = from.delta_to(to);
        let (step_row, step_col) = (d_row.signum(), d_col.signum());

        let mut current = start;
        while let Some(next) = current.offset(step_row, step_col) {
            if self.board.is_occupied(next) {
                break;
            }
            current = next;
            if self.board.is_wall(next) || !self.board.has_tile_effect(next, TileEffectKind::Ice) {
                break;
            }
        }
        if current == start {
            return None;
        }

        self.board.relocate(start, current);
        debug!(from = %start, to = %current, "slid on ice");
        self.emit(MatchEvent::Slid {
            from: start,
            to: current,
        });
        Some((start, current))
    }

    fn advance_turn(&mut self, side: Side) -> (TickReport, Option<GameOutcome>) {
        self.phase = Phase::TurnAdvancing;
        let tick = tick_side(&mut self.board, side);
        if !tick.is_empty() {
            self.emit(MatchEvent::Ticked {
                side,
                report: tick.clone(),
            });
        }

        self.side_to_move = !side;
        let outcome = self.end_of_turn_check();
        match outcome {
            Some(outcome) => self.finish(outcome),
            None => {
                self.turn += 1;
                self.phase = Phase::Idle;
                self.emit(MatchEvent::TurnChanged {
                    side_to_move: self.side_to_move,
                    turn: self.turn,
                });
            }
        }
        (tick, outcome)
    }

    /// A vanished king decides the game; any other broken invariant aborts
    /// it. Otherwise checkmate and stalemate are checked for the side to
    /// move.
    fn end_of_turn_check(&self) -> Option<GameOutcome> {
        match self.board.validate() {
            Ok(()) | Err(BoardError::MissingKing { .. }) => {
                game_status(&self.board, self.side_to_move)
            }
            Err(err) => {
                warn!(error = %err, "board invariant broken, aborting match");
                Some(GameOutcome::Aborted)
            }
        }
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.outcome = Some(outcome);
        self.phase = Phase::GameOver;
        info!(%outcome, turn = self.turn, "game over");
        self.emit(MatchEvent::GameOver { outcome });
    }

    fn emit(&mut self, event: MatchEvent) {
        for observer in &mut self.observers {
            observer.notify(&event);
        }
    }
}
