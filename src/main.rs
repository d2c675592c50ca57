use std::time::Duration;

use anyhow::{Context, Result, bail};
use elemental_core::all_legal_moves;
use elemental_engine::{SearchControl, SearchLimits};
use elemental_match::{Match, MatchConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const MAX_PLIES: u32 = 40;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    info!("elemental starting");

    let config = MatchConfig::default().with_generator_timeout(Duration::from_millis(200));
    let mut game = Match::new(config);
    let limits = SearchLimits { depth: 2, count: 1 };

    while game.outcome().is_none() && game.turn() <= MAX_PLIES {
        let ply = game.turn();
        let side = game.side_to_move();
        let suggestion = game
            .suggest_moves(limits, &SearchControl::new())
            .first()
            .map(|m| (m.from, m.to));
        let (from, to) = match suggestion {
            Some(mv) => mv,
            None => {
                // Search only knows plain chess; fall back to any rules-legal move.
                warn!(ply, "no search suggestion, playing first legal move");
                match all_legal_moves(game.board(), side).first() {
                    Some(mv) => (mv.from, mv.to),
                    None => bail!("{side} has no legal move on ply {ply}"),
                }
            }
        };

        let report = game
            .submit_move(side, from, to)
            .with_context(|| format!("{side} could not play {from}{to}"))?;
        match &report.capture {
            Some(capture) => println!(
                "{ply:>3}. {side} {from}{to} takes {} -> {} ({} effects)",
                capture.captured.element(),
                capture.mix.element,
                capture.plan.effect_count()
            ),
            None => println!("{ply:>3}. {side} {from}{to}"),
        }
    }

    println!("\n{}", game.dump());
    match game.outcome() {
        Some(outcome) => println!("result: {outcome}"),
        None => println!("result: unfinished after {MAX_PLIES} plies"),
    }
    Ok(())
}
