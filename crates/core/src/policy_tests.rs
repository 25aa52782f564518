// SPDX-License-Identifier: MIT

use super::*;
use crate::clock::FakeClock;
use std::time::Duration;

fn policy(enabled: bool, max: u32, reset_timer_ms: u64) -> RestartPolicy {
    RestartPolicy { enabled, max, reset_timer_ms }
}

#[test]
fn disabled_normal_policy_is_a_plain_terminal_stop() {
    let clock = FakeClock::new();
    let outcome = evaluate_restart(RestartMode::Normal, &policy(false, 0, 0), 0, None, clock.now());
    assert_eq!(outcome, RestartOutcome::Terminal { error: None });
}

#[test]
fn prevent_always_blocks_regardless_of_policy() {
    let clock = FakeClock::new();
    let outcome = evaluate_restart(RestartMode::Prevent, &policy(true, 10, 0), 0, None, clock.now());
    assert_eq!(outcome, RestartOutcome::Terminal { error: Some("max") });
}

#[test]
fn force_restarts_once_even_when_policy_disabled() {
    let clock = FakeClock::new();
    let outcome = evaluate_restart(RestartMode::Force, &policy(false, 0, 0), 0, None, clock.now());
    assert_eq!(outcome, RestartOutcome::Restart { restart_count: 1 });
}

#[test]
fn three_quick_deaths_hit_the_ceiling_on_the_third() {
    let clock = FakeClock::new();
    let p = policy(true, 2, 10_000);

    let died_at_1 = clock.now();
    let first = evaluate_restart(RestartMode::Normal, &p, 0, None, died_at_1);
    assert_eq!(first, RestartOutcome::Restart { restart_count: 1 });

    clock.advance(Duration::from_millis(10));
    let died_at_2 = clock.now();
    let second = evaluate_restart(RestartMode::Normal, &p, 1, Some(died_at_1), died_at_2);
    assert_eq!(second, RestartOutcome::Restart { restart_count: 2 });

    clock.advance(Duration::from_millis(10));
    let died_at_3 = clock.now();
    let third = evaluate_restart(RestartMode::Normal, &p, 2, Some(died_at_2), died_at_3);
    assert_eq!(third, RestartOutcome::Terminal { error: Some("max") });
}

#[test]
fn restart_count_resets_once_the_process_outlives_reset_timer() {
    let clock = FakeClock::new();
    let p = policy(true, 2, 1_000);

    let died_at_1 = clock.now();
    // Process lives for 2s this time, well past the 1s reset_timer.
    clock.advance(Duration::from_secs(2));
    let died_at_2 = clock.now();

    let outcome = evaluate_restart(RestartMode::Normal, &p, 2, Some(died_at_1), died_at_2);
    // Without the reset this would hit the ceiling (2 >= max); with the reset it's count 0 -> 1.
    assert_eq!(outcome, RestartOutcome::Restart { restart_count: 1 });
}

#[test]
fn first_ever_death_treats_missing_last_dead_instant_as_a_reset() {
    let clock = FakeClock::new();
    let p = policy(true, 1, 60_000);
    let outcome = evaluate_restart(RestartMode::Normal, &p, 5, None, clock.now());
    // restart_count is stale garbage from a reused entry; the reset brings it to 0 before the
    // ceiling check, so a single restart is still allowed against max = 1.
    assert_eq!(outcome, RestartOutcome::Restart { restart_count: 1 });
}

#[test]
fn zero_max_never_restarts_even_after_a_reset() {
    let clock = FakeClock::new();
    let p = policy(true, 0, 60_000);
    let outcome = evaluate_restart(RestartMode::Normal, &p, 0, None, clock.now());
    assert_eq!(outcome, RestartOutcome::Terminal { error: Some("max") });
}
