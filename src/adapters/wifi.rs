//! WiFi state monitor adapter.
//!
//! Implements [`WifiStatePort`] for the host.  The camera's network
//! supervisor (or the stdin harness in `main.rs`) feeds raw observations
//! into [`WifiMonitor::observe`]; the monitor turns them into transitions
//! and fans each one out to the registered callbacks.
//!
//! ## Dispatch policy
//!
//! - An observation identical to the previous one is a poll repeat, not a
//!   transition, and is not dispatched.
//! - Every other observation is dispatched synchronously, in registration
//!   order, before `observe` returns.  No buffering, no coalescing.
//! - The first callback error stops the fan-out and is returned as-is.

use log::{debug, info};

use crate::app::events::{ConnectionStateEvent, DeviceState, StateReason};
use crate::app::ports::{StateCallback, WifiStatePort};
use crate::error::{NotifyError, SetupError};

const MAX_CALLBACKS: usize = 4;

// ───────────────────────────────────────────────────────────────
// WiFi monitor
// ───────────────────────────────────────────────────────────────

pub struct WifiMonitor {
    callbacks: heapless::Vec<StateCallback, MAX_CALLBACKS>,
    last: Option<ConnectionStateEvent>,
    transitions: u64,
}

impl WifiMonitor {
    pub fn new() -> Self {
        Self {
            callbacks: heapless::Vec::new(),
            last: None,
            transitions: 0,
        }
    }

    /// The most recent transition, if any has been observed.
    pub fn current(&self) -> Option<ConnectionStateEvent> {
        self.last
    }

    /// Number of transitions dispatched so far.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Record an observation.  Returns `Ok(true)` when it was a transition
    /// and every callback accepted it.
    pub fn observe(&mut self, state: DeviceState, reason: StateReason) -> Result<bool, NotifyError> {
        let ev = ConnectionStateEvent::new(state, reason);
        if self.last == Some(ev) {
            debug!("WiFi: {:?}/{} unchanged", state, reason);
            return Ok(false);
        }

        match self.last {
            Some(prev) => info!("WiFi: {:?} -> {:?} ({})", prev.state, state, reason),
            None => info!("WiFi: initial state {:?} ({})", state, reason),
        }
        self.last = Some(ev);
        self.transitions += 1;

        for cb in &mut self.callbacks {
            cb(ev)?;
        }
        Ok(true)
    }
}

impl Default for WifiMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl WifiStatePort for WifiMonitor {
    fn register_state_callback(&mut self, callback: StateCallback) -> Result<(), SetupError> {
        self.callbacks
            .push(callback)
            .map_err(|_| SetupError::CallbackTableFull)?;
        debug!("WiFi: callback #{} registered", self.callbacks.len());
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
