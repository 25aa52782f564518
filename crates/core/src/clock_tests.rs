// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn fake_clock_advances_monotonic_and_epoch() {
    let clock = FakeClock::new();
    let t0 = clock.now();
    let e0 = clock.epoch_secs();

    clock.advance(Duration::from_secs(5));

    assert_eq!(clock.now(), t0 + Duration::from_secs(5));
    assert_eq!(clock.epoch_secs(), e0 + 5);
}

#[test]
fn fake_clock_set_epoch_secs_is_absolute() {
    let clock = FakeClock::new();
    clock.set_epoch_secs(42);
    assert_eq!(clock.epoch_secs(), 42);
}

#[test]
fn system_clock_epoch_is_plausible() {
    let clock = SystemClock;
    // Any time after this crate was written.
    assert!(clock.epoch_secs() > 1_700_000_000);
}
