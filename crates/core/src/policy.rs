// SPDX-License-Identifier: MIT

//! Pure restart-policy evaluation (SPEC_FULL.md §4.5 "Restart policy evaluation").
//!
//! Kept free of any I/O so it can be unit-tested against [`crate::clock::FakeClock`] without
//! forking real processes or sleeping for `reset_timer` to elapse.

use std::time::Instant;

use crate::clock::Clock;
use crate::launch_options::RestartPolicy;
use crate::status::RestartMode;

/// Outcome of evaluating the restart policy after a child has exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartOutcome {
    /// Relaunch the process. `restart_count` is the value to store going forward (already
    /// incremented for this restart).
    Restart { restart_count: u32 },
    /// Do not relaunch. `error` is `Some("max")` when a policy actively blocked the restart
    /// (`Prevent`, or the restart ceiling was reached); `None` for a plain terminal exit where
    /// no restart was ever configured.
    Terminal { error: Option<&'static str> },
}

/// Decide whether a service should be relaunched, and compute its next `restart_count`.
///
/// `last_dead_instant` is the previous death's monotonic timestamp (`None` the first time a
/// service dies). `died_at` is `clock.now()` at the moment of this death.
pub fn evaluate_restart(
    mode: RestartMode,
    policy: &RestartPolicy,
    restart_count: u32,
    last_dead_instant: Option<Instant>,
    died_at: Instant,
) -> RestartOutcome {
    if mode == RestartMode::Prevent {
        return RestartOutcome::Terminal { error: Some("max") };
    }

    let should_restart = mode == RestartMode::Force || (mode == RestartMode::Normal && policy.enabled);
    if !should_restart {
        return RestartOutcome::Terminal { error: None };
    }

    let mut restart_count = restart_count;
    if mode == RestartMode::Normal {
        let lived_long_enough = match last_dead_instant {
            Some(prev) => died_at.saturating_duration_since(prev) > policy.reset_timer(),
            None => true,
        };
        if lived_long_enough {
            restart_count = 0;
        }
        if restart_count >= policy.max {
            return RestartOutcome::Terminal { error: Some("max") };
        }
    }

    RestartOutcome::Restart { restart_count: restart_count + 1 }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
