//! Lockout interlock supervisor.
//!
//! Runs **every tick after the FSM** and enforces the one hard safety
//! invariant of the system: the pump relay must never be energised while
//! the lockout is latched.  The state handlers already honour this; the
//! supervisor is the independent backstop that clamps the command and
//! records the violation if they ever do not.
//!
//! A violation is a firmware bug, not an operating condition — it is
//! logged at `error!` and counted so bench tests can assert on it.

use crate::fsm::context::ActuatorCommands;
use crate::fsm::StateId;
use log::error;

/// Interlock supervisor.
pub struct LockoutInterlock {
    /// Number of clamped pump commands since boot.
    violations: u32,
}

impl LockoutInterlock {
    pub fn new() -> Self {
        Self { violations: 0 }
    }

    /// Clamp the actuator commands against the current mode.
    /// Returns `true` if a violation was clamped.
    pub fn enforce(&mut self, mode: StateId, commands: &mut ActuatorCommands) -> bool {
        if mode == StateId::LockedOut && commands.pump_on {
            self.violations = self.violations.saturating_add(1);
            error!(
                "INTERLOCK: pump commanded on while locked out — clamped (violation #{})",
                self.violations
            );
            commands.pump_on = false;
            return true;
        }
        false
    }

    /// Total clamped commands since boot (0 in a healthy system).
    pub fn violations(&self) -> u32 {
        self.violations
    }
}
