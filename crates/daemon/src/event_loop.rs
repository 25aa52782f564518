// SPDX-License-Identifier: MIT

//! Event loop (SPEC_FULL.md §4.3): a single-threaded readiness-notification demultiplexer
//! presenting the spec's `register`/`add`/`del`/`wait` contract over a thin wrapper around
//! `tokio::io::unix::AsyncFd`.
//!
//! Sources are tagged enum variants, not boxed closures — dispatch happens by matching on
//! [`Source`] in the supervisor's own loop, the same explicit-dispatch style the teacher's
//! code favors over trait-object callback registries.

use std::collections::HashMap;
use std::os::fd::RawFd;

use tokio::io::unix::AsyncFd;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// What a registered source's readiness means to the supervisor. `SIGCHLD`/`SIGINT` are
/// handled by [`crate::signals::SignalRouter`] instead of going through this loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    ChildIo,
}

pub type Token = u64;

/// One readiness notification: which source fired, on which fd.
#[derive(Debug, Clone, Copy)]
pub struct Ready {
    pub token: Token,
    pub source: Source,
    pub fd: RawFd,
}

struct RawFdWrap(RawFd);

impl std::os::fd::AsRawFd for RawFdWrap {
    fn as_raw_fd(&self) -> RawFd {
        self.0
    }
}

pub struct EventLoop {
    next_token: Token,
    sources: HashMap<Token, Source>,
    watchers: HashMap<RawFd, JoinHandle<()>>,
    tx: mpsc::UnboundedSender<Ready>,
    rx: mpsc::UnboundedReceiver<Ready>,
}

impl Default for EventLoop {
    fn default() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { next_token: 0, sources: HashMap::new(), watchers: HashMap::new(), tx, rx }
    }
}

impl EventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new callback tag, returning its stable token.
    pub fn register(&mut self, source: Source) -> Token {
        let token = self.next_token;
        self.next_token += 1;
        self.sources.insert(token, source);
        token
    }

    /// Subscribe `fd` for readability, dispatching under `token`'s tag. Replaces any prior
    /// subscription on the same fd.
    pub fn add(&mut self, fd: RawFd, token: Token) -> std::io::Result<()> {
        self.del(fd);
        let Some(&source) = self.sources.get(&token) else {
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, "add() called with unregistered token"));
        };
        let async_fd = AsyncFd::new(RawFdWrap(fd))?;
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            loop {
                let mut guard = match async_fd.readable().await {
                    Ok(guard) => guard,
                    Err(_) => return,
                };
                if tx.send(Ready { token, source, fd }).is_err() {
                    return;
                }
                guard.clear_ready();
            }
        });
        self.watchers.insert(fd, handle);
        Ok(())
    }

    /// Unsubscribe `fd`. Idempotent.
    pub fn del(&mut self, fd: RawFd) {
        if let Some(handle) = self.watchers.remove(&fd) {
            handle.abort();
        }
    }

    /// Block until the next source is ready, or `None` once [`EventLoop::shutdown`] has
    /// drained every in-flight notification.
    pub async fn wait(&mut self) -> Option<Ready> {
        self.rx.recv().await
    }

    /// Stop accepting new notifications; `wait` returns `None` once drained.
    pub fn shutdown(&mut self) {
        for (_, handle) in self.watchers.drain() {
            handle.abort();
        }
        self.rx.close();
    }
}

#[cfg(test)]
#[path = "event_loop_tests.rs"]
mod tests;
