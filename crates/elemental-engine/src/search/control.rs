//! Search control: external stop flag and node accounting.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Controls when a search should stop.
///
/// Cloning shares the stop flag, so a caller can hand a clone to a worker
/// thread and cancel it later.
#[derive(Debug, Clone, Default)]
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
    node_limit: Option<u64>,
}

impl SearchControl {
    /// Control with no limits.
    pub fn new() -> SearchControl {
        SearchControl::default()
    }

    /// Control sharing an existing stop flag.
    pub fn with_flag(stopped: Arc<AtomicBool>) -> SearchControl {
        SearchControl {
            stopped,
            node_limit: None,
        }
    }

    /// Stop once `nodes` have been visited.
    pub fn with_node_limit(mut self, nodes: u64) -> SearchControl {
        self.node_limit = Some(nodes);
        self
    }

    /// Request that the search stop.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Return `true` if the search should abort now.
    pub fn should_stop(&self, nodes: u64) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }
        if let Some(limit) = self.node_limit
            && nodes >= limit
        {
            self.stopped.store(true, Ordering::Release);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_shared_between_clones() {
        let control = SearchControl::new();
        let worker = control.clone();
        assert!(!worker.should_stop(0));
        control.stop();
        assert!(worker.should_stop(0));
    }

    #[test]
    fn node_limit_trips_and_latches() {
        let control = SearchControl::new().with_node_limit(100);
        assert!(!control.should_stop(99));
        assert!(control.should_stop(100));
        assert!(control.should_stop(0));
    }
}
