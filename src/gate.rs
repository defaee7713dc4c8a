//! Single-flight guard for resolver exchanges.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, trace};

/// Allows at most one outstanding resolver exchange per board.
///
/// Entering hands out a [`GatePass`]; the gate reopens when the pass is
/// released or dropped, so every exit path of the guarded exchange frees it,
/// including a future dropped mid-flight.
#[derive(Debug, Clone, Default)]
pub struct RequestGate {
    busy: Arc<AtomicBool>,
}

impl RequestGate {
    /// Creates an open gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an exchange is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Claims the gate. `None` means an exchange is already in flight and
    /// the caller must drop its action.
    pub fn try_enter(&self) -> Option<GatePass> {
        match self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {
                trace!("Gate entered");
                Some(GatePass {
                    busy: Arc::clone(&self.busy),
                })
            }
            Err(_) => {
                debug!("Gate busy, action dropped");
                None
            }
        }
    }

    fn leave(busy: &AtomicBool) {
        busy.store(false, Ordering::Release);
        trace!("Gate left");
    }
}

/// Proof of holding a [`RequestGate`]. Releases it on drop.
#[derive(Debug)]
pub struct GatePass {
    busy: Arc<AtomicBool>,
}

impl GatePass {
    /// Releases the gate now.
    pub fn release(self) {
        drop(self);
    }

    /// Whether this pass was issued by `gate`.
    pub fn belongs_to(&self, gate: &RequestGate) -> bool {
        Arc::ptr_eq(&self.busy, &gate.busy)
    }
}

impl Drop for GatePass {
    fn drop(&mut self) {
        RequestGate::leave(&self.busy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_entry_refused_until_release() {
        let gate = RequestGate::new();
        let pass = gate.try_enter().expect("open gate");

        assert!(gate.is_busy());
        assert!(gate.try_enter().is_none());

        pass.release();
        assert!(!gate.is_busy());
        assert!(gate.try_enter().is_some());
    }

    #[test]
    fn test_drop_releases() {
        let gate = RequestGate::new();
        {
            let _pass = gate.try_enter().expect("open gate");
            assert!(gate.is_busy());
        }
        assert!(!gate.is_busy());
    }

    #[test]
    fn test_pass_from_replaced_gate_does_not_touch_new_one() {
        let old = RequestGate::new();
        let pass = old.try_enter().expect("open gate");
        let fresh = RequestGate::new();
        let held = fresh.try_enter().expect("open gate");

        assert!(!pass.belongs_to(&fresh));
        drop(pass);
        assert!(fresh.is_busy());
        drop(held);
    }
}
