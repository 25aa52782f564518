// SPDX-License-Identifier: MIT

//! Signal router (SPEC_FULL.md §4.4): `SIGINT` requests shutdown, `SIGCHLD` triggers a reap
//! pass. Both arrive via `tokio::signal::unix::signal`, which is backed by a self-pipe under
//! the hood — the daemon never installs a raw `sigaction` handler itself.

use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalEvent {
    Shutdown,
    Reap,
}

pub struct SignalRouter {
    rx: mpsc::UnboundedReceiver<SignalEvent>,
}

impl SignalRouter {
    pub fn spawn() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigchld = signal(SignalKind::child())?;

        let (tx, rx) = mpsc::unbounded_channel();

        let int_tx = tx.clone();
        tokio::spawn(async move {
            while sigint.recv().await.is_some() {
                if int_tx.send(SignalEvent::Shutdown).is_err() {
                    return;
                }
            }
        });

        tokio::spawn(async move {
            while sigchld.recv().await.is_some() {
                if tx.send(SignalEvent::Reap).is_err() {
                    return;
                }
            }
        });

        Ok(Self { rx })
    }

    pub async fn recv(&mut self) -> Option<SignalEvent> {
        self.rx.recv().await
    }
}

#[cfg(test)]
#[path = "signals_tests.rs"]
mod tests;
