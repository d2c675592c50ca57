//! End-to-end match scenarios.
//!
//! Each test drives a [`Match`] through real turns and checks the board,
//! the turn reports, and the emitted notifications.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use elemental_core::reaction::{MixResult, ReactionContext, ReactionDescriptor, TradeOutcome};
use elemental_core::{
    BoardLayout, BoardState, Element, GameOutcome, PieceEffect, PieceEffectKind, Side, Square,
    TileEffect, TileEffectKind,
};
use elemental_match::{
    ElementGenerator, GeneratorError, Match, MatchConfig, MatchEvent, PendingData, Phase,
    ReactionSource, Rejection, ScriptedGenerator,
};
use serde_json::json;

fn fire_queen_layout() -> BoardLayout {
    BoardLayout::new()
        .with_override(Side::White, Square::D4, "Fire", "🔥")
        .with_override(Side::Black, Square::D5, "Plant", "🌱")
}

fn fire_queen_match(config: MatchConfig, placement: &str) -> Match {
    let layout = fire_queen_layout();
    let board = BoardState::from_placement(placement, &layout).unwrap();
    Match::from_position(config.with_layout(layout), board, Side::White)
}

fn event_names(events: &[MatchEvent]) -> Vec<&'static str> {
    events
        .iter()
        .map(|e| match e {
            MatchEvent::MoveCommitted { .. } => "move",
            MatchEvent::PieceCaptured { .. } => "captured",
            MatchEvent::CaptureResolved { .. } => "resolved",
            MatchEvent::ReactionWave { .. } => "wave",
            MatchEvent::Slid { .. } => "slid",
            MatchEvent::Ticked { .. } => "ticked",
            MatchEvent::TurnChanged { .. } => "turn",
            MatchEvent::GameOver { .. } => "game_over",
        })
        .collect()
}

// ── Capture with the local fallback ──────────────────────────────────────────

#[test]
fn fire_queen_capture_burns_empty_neighbours_and_survives() {
    let mut game = fire_queen_match(MatchConfig::default(), "4k3/8/8/3p4/3Q4/8/8/4K3");

    let report = game.submit_move(Side::White, Square::D4, Square::D5).unwrap();
    let capture = report.capture.expect("capture report");
    assert_eq!(capture.captured.element().name, "Plant");
    assert_eq!(capture.trade, TradeOutcome::Draw);
    assert!(capture.plan.used_fallback);
    assert_eq!(capture.plan.effect_count(), 8, "every empty neighbour of d5 burns");

    for sq in [
        Square::C4,
        Square::D4,
        Square::E4,
        Square::C5,
        Square::E5,
        Square::C6,
        Square::D6,
        Square::E6,
    ] {
        let tile = game.board().tile_effect(sq, TileEffectKind::Burning);
        assert!(tile.is_some_and(|t| t.owner == Side::White), "{sq} should burn for white");
    }
    assert!(!game.board().has_tile_effect(Square::D5, TileEffectKind::Burning));

    let plies = [
        (Side::Black, Square::E8, Square::F8),
        (Side::White, Square::E1, Square::F1),
        (Side::Black, Square::F8, Square::E8),
        (Side::White, Square::F1, Square::E1),
        (Side::Black, Square::E8, Square::F8),
        (Side::White, Square::E1, Square::F1),
    ];
    for (side, from, to) in plies {
        let report = game.submit_move(side, from, to).unwrap();
        assert!(report.tick.destroyed.is_empty(), "nothing should burn on {from}{to}");
    }

    let queen = game.board().piece_at(Square::D5).expect("queen survives");
    assert_eq!(queen.element().name, "Fire");
    assert!(
        game.board().tile_effects(Square::E5).is_empty(),
        "fallback burning expires after the owner's turns run out"
    );
}

#[test]
fn capture_emits_events_in_order() {
    let mut game = fire_queen_match(MatchConfig::default(), "4k3/8/8/3p4/3Q4/8/8/4K3");
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    game.add_observer(move |event: &MatchEvent| sink.borrow_mut().push(event.clone()));

    game.submit_move(Side::White, Square::D4, Square::D5).unwrap();

    let events = events.borrow();
    assert_eq!(event_names(&events), ["move", "captured", "resolved", "wave", "turn"]);
    assert!(matches!(
        events[4],
        MatchEvent::TurnChanged {
            side_to_move: Side::Black,
            turn: 2
        }
    ));
}

// ── Generator paths ──────────────────────────────────────────────────────────

struct SlowGenerator;

impl ElementGenerator for SlowGenerator {
    fn mix(&self, _attacker: &Element, _defender: &Element) -> Result<MixResult, GeneratorError> {
        thread::sleep(Duration::from_millis(500));
        Ok(MixResult {
            element: "Too Late".to_string(),
            glyph: String::new(),
            winner: "draw".to_string(),
            rationale: String::new(),
        })
    }

    fn reaction(

        &self,

        _mix: &MixResult,

        _context: &ReactionContext,

    ) -> Result<ReactionDescriptor, GeneratorError> {
        Ok(ReactionDescriptor::default())
    }
}

#[test]
fn slow_generator_falls_back() {
    let config = MatchConfig::default().with_generator_timeout(Duration::from_millis(20));
    let mut game = fire_queen_match(config, "4k3/8/8/3p4/3Q4/8/8/4K3")
        .with_generator(Arc::new(SlowGenerator));

    let report = game.submit_move(Side::White, Square::D4, Square::D5).unwrap();
    let capture = report.capture.unwrap();
    assert_eq!(capture.mix.element, "Fire");
    assert!(capture.plan.used_fallback);
    assert_eq!(game.phase(), Phase::Idle);
}

#[test]
fn scripted_generator_debuffs_enemies_after_a_won_trade() {
    let generator = ScriptedGenerator::new(
        r#"{"element": "Steam", "glyph": "♨", "winner": "Fire", "rationale": "fire boils the sap"}"#,
        r#"{"effects": [{"pattern": "+", "distance": 2, "target": "debuff", "effect": "stun", "duration": 1}],
            "flavor": "scalding mist"}"#,
    );
    let mut game = fire_queen_match(MatchConfig::default(), "4k3/8/3n4/3p4/3Q4/8/8/4K3")
        .with_generator(Arc::new(generator));

    let report = game.submit_move(Side::White, Square::D4, Square::D5).unwrap();
    let capture = report.capture.unwrap();
    assert_eq!(capture.trade, TradeOutcome::Won);
    assert!(!capture.plan.used_fallback);
    assert_eq!(capture.plan.flavor, "scalding mist");

    let queen = game.board().piece_at(Square::D5).unwrap();
    assert_eq!(queen.element().name, "Steam");
    assert!(game.board().piece_at(Square::D6).unwrap().is_stunned());
    assert!(game.legal_targets(Square::D6).is_empty());
    assert_eq!(
        game.submit_move(Side::Black, Square::D6, Square::E4),
        Err(Rejection::IllegalMove {
            from: Square::D6,
            to: Square::E4
        })
    );
}

// ── Remote data ──────────────────────────────────────────────────────────────

fn remote_config() -> MatchConfig {
    MatchConfig::default()
        .with_reaction_source(ReactionSource::Remote)
        .with_pending_timeout(Duration::from_millis(50))
}

#[test]
fn remote_data_is_used_when_delivered() {
    let mut game = fire_queen_match(remote_config(), "4k3/8/8/3p4/3Q4/8/8/4K3");
    let sender = game.pending_sender();
    let descriptor = ReactionDescriptor {
        effects: vec![json!({
            "pattern": "ring",
            "distance": 2,
            "target": "empty",
            "effect": "ice",
            "duration": 1
        })],
        flavor: "frozen bloom".to_string(),
    };
    sender
        .deliver(
            sender.ticket(game.turn(), Square::D5),
            PendingData {
                mix: Some(MixResult {
                    element: "Ash".to_string(),
                    glyph: String::new(),
                    winner: "Plant".to_string(),
                    rationale: String::new(),
                }),
                descriptor: Some(descriptor),
            },
        )
        .unwrap();

    let report = game.submit_move(Side::White, Square::D4, Square::D5).unwrap();
    let capture = report.capture.unwrap();
    assert_eq!(capture.trade, TradeOutcome::Lost);
    assert!(!capture.plan.used_fallback);
    assert_eq!(capture.plan.effect_count(), 8, "cap limits the ring of sixteen");
    assert_eq!(game.board().piece_at(Square::D5).unwrap().element().name, "Ash");
    let iced = Square::all()
        .filter(|&sq| game.board().has_tile_effect(sq, TileEffectKind::Ice))
        .count();
    assert_eq!(iced, 8);
}

#[test]
fn reset_discards_stale_remote_data() {
    let mut game = Match::new(remote_config());
    let sender = game.pending_sender();
    let stale = sender.ticket(3, Square::D5);
    game.reset();
    sender
        .deliver(
            stale,
            PendingData {
                mix: Some(MixResult {
                    element: "Ghost".to_string(),
                    glyph: String::new(),
                    winner: "draw".to_string(),
                    rationale: String::new(),
                }),
                descriptor: None,
            },
        )
        .unwrap();

    game.submit_move(Side::White, Square::E2, Square::E4).unwrap();
    game.submit_move(Side::Black, Square::D7, Square::D5).unwrap();
    let report = game.submit_move(Side::White, Square::E4, Square::D5).unwrap();
    let capture = report.capture.unwrap();
    assert_eq!(capture.mix.element, "Wind", "stale mix must not apply");
    assert!(capture.plan.used_fallback);
}

fn remote_mix(element: &str) -> PendingData {
    PendingData {
        mix: Some(MixResult {
            element: element.to_string(),
            glyph: String::new(),
            winner: "draw".to_string(),
            rationale: String::new(),
        }),
        descriptor: None,
    }
}

#[test]
fn late_remote_data_is_not_applied_to_the_next_capture() {
    let mut game = fire_queen_match(remote_config(), "4k3/8/8/p2p4/3Q4/8/8/4K3");
    let sender = game.pending_sender();

    let first = game.submit_move(Side::White, Square::D4, Square::D5).unwrap();
    let first = first.capture.unwrap();
    assert!(first.plan.used_fallback, "nothing arrived within the pending timeout");
    assert_eq!(first.mix.element, "Fire");

    sender
        .deliver(sender.ticket(1, Square::D5), remote_mix("LateForFirstCapture"))
        .unwrap();
    game.submit_move(Side::Black, Square::E8, Square::F8).unwrap();
    assert_eq!(game.turn(), 3);
    sender
        .deliver(sender.ticket(3, Square::A5), remote_mix("Mist"))
        .unwrap();

    let second = game.submit_move(Side::White, Square::D5, Square::A5).unwrap();
    let second = second.capture.unwrap();
    assert_eq!(second.mix.element, "Mist");
    assert_eq!(game.board().piece_at(Square::A5).unwrap().element().name, "Mist");
}

#[test]
fn late_remote_data_alone_leaves_the_next_capture_on_fallback() {
    let mut game = fire_queen_match(remote_config(), "4k3/8/8/p2p4/3Q4/8/8/4K3");
    let sender = game.pending_sender();

    game.submit_move(Side::White, Square::D4, Square::D5).unwrap();
    sender
        .deliver(sender.ticket(1, Square::D5), remote_mix("LateForFirstCapture"))
        .unwrap();
    game.submit_move(Side::Black, Square::E8, Square::F8).unwrap();

    let second = game.submit_move(Side::White, Square::D5, Square::A5).unwrap();
    let second = second.capture.unwrap();
    assert_eq!(second.mix.element, "Fire");
    assert!(second.plan.used_fallback);
}

// ── Game end ─────────────────────────────────────────────────────────────────

const BACK_RANK: &str = "6k1/5ppp/1b6/8/8/8/8/3RK3";

#[test]
fn stunned_defender_cannot_prevent_mate() {
    let mut board: BoardState = BACK_RANK.parse().unwrap();
    board.add_piece_effect(Square::B6, PieceEffect::new(PieceEffectKind::Stun, 2));
    let mut game = Match::from_position(MatchConfig::default(), board, Side::White);

    let report = game.submit_move(Side::White, Square::D1, Square::D8).unwrap();
    assert_eq!(
        report.outcome,
        Some(GameOutcome::Checkmate {
            winner: Side::White
        })
    );
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(
        game.submit_move(Side::Black, Square::G8, Square::H8),
        Err(Rejection::GameOver)
    );
}

#[test]
fn free_defender_blocks_mate() {
    let board: BoardState = BACK_RANK.parse().unwrap();
    let mut game = Match::from_position(MatchConfig::default(), board, Side::White);

    let report = game.submit_move(Side::White, Square::D1, Square::D8).unwrap();
    assert_eq!(report.outcome, None);
    assert!(game.legal_targets(Square::B6).contains(Square::D8));
}

#[test]
fn game_over_event_carries_outcome() {
    let mut board: BoardState = BACK_RANK.parse().unwrap();
    board.add_piece_effect(Square::B6, PieceEffect::new(PieceEffectKind::Stun, 2));
    let mut game = Match::from_position(MatchConfig::default(), board, Side::White);
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&outcomes);
    game.add_observer(move |event: &MatchEvent| {
        if let MatchEvent::GameOver { outcome } = event {
            sink.borrow_mut().push(*outcome);
        }
    });

    game.submit_move(Side::White, Square::D1, Square::D8).unwrap();
    assert_eq!(
        *outcomes.borrow(),
        [GameOutcome::Checkmate {
            winner: Side::White
        }]
    );
}

// ── Castling ─────────────────────────────────────────────────────────────────

#[test]
fn castling_moves_the_rook() {
    let board: BoardState = "4k3/8/8/8/8/8/8/R3K2R".parse().unwrap();
    let mut game = Match::from_position(MatchConfig::default(), board, Side::White);
    let report = game.submit_move(Side::White, Square::E1, Square::G1).unwrap();
    assert_eq!(report.castle, Some((Square::H1, Square::F1)));
    assert!(game.board().piece_at(Square::F1).is_some());
    assert!(game.board().piece_at(Square::H1).is_none());
}

#[test]
fn castling_needs_every_precondition() {
    let cases: [(&str, &str); 3] = [
        ("4kr2/8/8/8/8/8/8/R3K2R", "attacked square between king and rook"),
        ("4r1k1/8/8/8/8/8/8/R3K2R", "king in check"),
        ("4k3/8/8/8/8/8/8/R3KN1R", "occupied square between king and rook"),
    ];
    for (placement, why) in cases {
        let board: BoardState = placement.parse().unwrap();
        let game = Match::from_position(MatchConfig::default(), board, Side::White);
        assert!(!game.legal_targets(Square::E1).contains(Square::G1), "{why}");
    }

    let mut board: BoardState = "4k3/8/8/8/8/8/8/R3K2R".parse().unwrap();
    board.set_moved(Square::H1, true);
    let game = Match::from_position(MatchConfig::default(), board, Side::White);
    assert!(!game.legal_targets(Square::E1).contains(Square::G1), "moved rook");
    assert!(game.legal_targets(Square::E1).contains(Square::C1));

    let mut board: BoardState = "4k3/8/8/8/8/8/8/R3K2R".parse().unwrap();
    board.set_moved(Square::E1, true);
    let game = Match::from_position(MatchConfig::default(), board, Side::White);
    let targets = game.legal_targets(Square::E1);
    assert!(!targets.contains(Square::G1), "moved king");
    assert!(!targets.contains(Square::C1), "moved king");
    assert!(targets.contains(Square::F1));

    let walls = [
        (Square::F1, Square::G1, Square::C1),
        (Square::D1, Square::C1, Square::G1),
    ];
    for (wall, blocked, open) in walls {
        let mut board: BoardState = "4k3/8/8/8/8/8/8/R3K2R".parse().unwrap();
        let tile = TileEffect::new(TileEffectKind::Occupied, -1, Side::Black);
        board.add_tile_effect(wall, tile);
        let game = Match::from_position(MatchConfig::default(), board, Side::White);
        let targets = game.legal_targets(Square::E1);
        assert!(!targets.contains(blocked), "wall on {wall}");
        assert!(targets.contains(open), "wall on {wall} leaves the other side open");
    }
}
