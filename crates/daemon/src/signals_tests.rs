// SPDX-License-Identifier: MIT

use super::*;
use nix::sys::signal::{raise, Signal};

#[tokio::test]
async fn sigint_is_routed_as_shutdown() {
    let mut router = SignalRouter::spawn().unwrap();
    // give the spawned listener a tick to register before we raise.
    tokio::task::yield_now().await;
    raise(Signal::SIGINT).unwrap();

    let event = tokio::time::timeout(std::time::Duration::from_secs(1), router.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event, SignalEvent::Shutdown);
}
