//! Capture results supplied from outside the match.
//!
//! In a remote match the opponent's client computes the mix and reaction and
//! delivers them here. Every delivery carries a [`CaptureTicket`] naming the
//! match generation, turn and square it was computed for. A reset bumps the
//! generation, and the turn moves on after every capture, so anything that
//! arrives for an abandoned match or an earlier capture is discarded instead
//! of applied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use elemental_core::Square;
use elemental_core::reaction::{MixResult, ReactionDescriptor};
use tracing::debug;

use crate::error::GeneratorError;

/// The payload of one delivery. Either half may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingData {
    pub mix: Option<MixResult>,
    pub descriptor: Option<ReactionDescriptor>,
}

/// Identifies the capture a delivery belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureTicket {
    pub generation: u64,
    /// Turn number of the capturing move, as reported by `Match::turn`.
    pub turn: u32,
    /// Square the capture happened on.
    pub square: Square,
}

#[derive(Debug)]
struct Delivery {
    ticket: CaptureTicket,
    data: PendingData,
}

/// Cloneable handle used by a transport to deliver capture results.
#[derive(Debug, Clone)]
pub struct PendingSender {
    generation: Arc<AtomicU64>,
    tx: mpsc::Sender<Delivery>,
}

impl PendingSender {
    /// The generation a delivery computed now should carry.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Ticket for the capture on `square` during `turn` of the current
    /// generation.
    pub fn ticket(&self, turn: u32, square: Square) -> CaptureTicket {
        CaptureTicket {
            generation: self.generation(),
            turn,
            square,
        }
    }

    /// Deliver `data` computed for the capture named by `ticket`.
    pub fn deliver(&self, ticket: CaptureTicket, data: PendingData) -> Result<(), GeneratorError> {
        self.tx
            .send(Delivery { ticket, data })
            .map_err(|_| GeneratorError::Disconnected)
    }
}

/// Receiving end owned by the match.
#[derive(Debug)]
pub struct PendingReaction {
    generation: Arc<AtomicU64>,
    tx: mpsc::Sender<Delivery>,
    rx: mpsc::Receiver<Delivery>,
}

impl Default for PendingReaction {
    fn default() -> Self {
        PendingReaction::new()
    }
}

impl PendingReaction {
    pub fn new() -> PendingReaction {
        let (tx, rx) = mpsc::channel();
        PendingReaction {
            generation: Arc::new(AtomicU64::new(0)),
            tx,
            rx,
        }
    }

    pub fn sender(&self) -> PendingSender {
        PendingSender {
            generation: Arc::clone(&self.generation),
            tx: self.tx.clone(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Abandon everything in flight: bump the generation and drop queued
    /// deliveries. Returns the new generation.
    pub fn invalidate(&self) -> u64 {
        let next = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let dropped = self.rx.try_iter().count();
        debug!(generation = next, dropped, "pending reactions invalidated");
        next
    }

    /// Wait up to `timeout` for the delivery belonging to the capture on
    /// `square` during `turn`. Deliveries for any other capture or
    /// generation are discarded while waiting.
    pub fn wait(
        &self,
        turn: u32,
        square: Square,
        timeout: Duration,
    ) -> Result<PendingData, GeneratorError> {
        let deadline = Instant::now() + timeout;
        let expected = CaptureTicket {
            generation: self.generation(),
            turn,
            square,
        };
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(delivery) if delivery.ticket == expected => return Ok(delivery.data),
                Ok(delivery) => {
                    debug!(
                        stale = ?delivery.ticket,
                        expected = ?expected,
                        "discarding pending reaction for another capture"
                    );
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    return Err(GeneratorError::TimedOut { waited: timeout });
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    return Err(GeneratorError::Disconnected);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(name: &str) -> PendingData {
        PendingData {
            mix: Some(MixResult {
                element: name.to_string(),
                glyph: String::new(),
                winner: "draw".to_string(),
                rationale: String::new(),
            }),
            descriptor: None,
        }
    }

    fn element(got: PendingData) -> Option<String> {
        got.mix.map(|m| m.element)
    }

    #[test]
    fn delivery_for_current_capture_arrives() {
        let pending = PendingReaction::new();
        let sender = pending.sender();
        sender.deliver(sender.ticket(3, Square::D5), data("Steam")).unwrap();
        let got = pending.wait(3, Square::D5, Duration::from_millis(100)).unwrap();
        assert_eq!(element(got), Some("Steam".to_string()));
    }

    #[test]
    fn stale_generation_is_skipped() {
        let pending = PendingReaction::new();
        let sender = pending.sender();
        let old = sender.ticket(3, Square::D5);
        pending.invalidate();
        sender.deliver(old, data("Old")).unwrap();
        sender.deliver(sender.ticket(3, Square::D5), data("New")).unwrap();
        let got = pending.wait(3, Square::D5, Duration::from_millis(100)).unwrap();
        assert_eq!(element(got), Some("New".to_string()));
    }

    #[test]
    fn delivery_for_an_earlier_capture_is_skipped() {
        let pending = PendingReaction::new();
        let sender = pending.sender();
        sender.deliver(sender.ticket(1, Square::D5), data("Earlier")).unwrap();
        sender.deliver(sender.ticket(3, Square::C6), data("OtherSquare")).unwrap();
        assert!(matches!(
            pending.wait(3, Square::A5, Duration::from_millis(20)),
            Err(GeneratorError::TimedOut { .. })
        ));

        sender.deliver(sender.ticket(3, Square::A5), data("Current")).unwrap();
        let got = pending.wait(3, Square::A5, Duration::from_millis(100)).unwrap();
        assert_eq!(element(got), Some("Current".to_string()));
    }

    #[test]
    fn invalidate_drops_queued_data() {
        let pending = PendingReaction::new();
        let sender = pending.sender();
        let ticket = sender.ticket(1, Square::D5);
        sender.deliver(ticket, data("Queued")).unwrap();
        assert_eq!(pending.invalidate(), 1);
        assert!(matches!(
            pending.wait(1, Square::D5, Duration::from_millis(20)),
            Err(GeneratorError::TimedOut { .. })
        ));
    }

    #[test]
    fn late_delivery_from_another_thread() {
        let pending = PendingReaction::new();
        let sender = pending.sender();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            sender.deliver(sender.ticket(2, Square::E4), data("Late")).unwrap();
        });
        let got = pending.wait(2, Square::E4, Duration::from_secs(5)).unwrap();
        handle.join().unwrap();
        assert_eq!(element(got), Some("Late".to_string()));
    }
}
