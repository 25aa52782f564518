// SPDX-License-Identifier: MIT

//! Control-socket transport (SPEC_FULL.md §6): binds `NSGOD_API`, accepts WebSocket
//! connections, and turns each into a [`TransportEvent`] stream the daemon's single select
//! loop consumes. No RPC dispatch happens here — per-connection tasks only move bytes; the
//! request is handed to the caller as data, the same split the teacher draws between
//! `listener::mod`'s per-connection task and the dispatch performed by its caller.

use std::collections::HashMap;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, UnixListener};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, warn};

use nsgod_wire::envelope::RpcRequest;

use crate::error::TransportError;

pub type ClientId = u64;

/// Something the transport layer observed; the caller's select loop matches on this to decide
/// whether to register a new client, dispatch a request, or drop a client's outbound sender.
pub enum TransportEvent {
    Connected(ClientId, mpsc::UnboundedSender<Message>),
    Request(ClientId, RpcRequest),
    Disconnected(ClientId),
}

enum Bound {
    Unix(UnixListener),
    Tcp(TcpListener),
}

/// Parse `NSGOD_API`. `ws+unix://<path>` binds a UNIX domain socket at `<path>`; anything else
/// is parsed as a `host:port` TCP address.
async fn bind(addr: &str) -> Result<Bound, TransportError> {
    if let Some(path) = addr.strip_prefix("ws+unix://") {
        if path.is_empty() {
            return Err(TransportError::InvalidAddr {
                addr: addr.to_string(),
                reason: "empty unix socket path",
            });
        }
        // A stale socket file from a previous unclean shutdown would otherwise make bind()
        // fail with AddrInUse; the lock file is what actually guards against a second live
        // daemon, so it's safe to clear this out first.
        let _ = std::fs::remove_file(path);
        let listener = UnixListener::bind(path).map_err(TransportError::Bind)?;
        Ok(Bound::Unix(listener))
    } else {
        let listener = TcpListener::bind(addr).await.map_err(TransportError::Bind)?;
        Ok(Bound::Tcp(listener))
    }
}

/// Owns the accept loop (spawned as a background task) and exposes the merged event stream.
pub struct Transport {
    events_rx: mpsc::UnboundedReceiver<TransportEvent>,
}

impl Transport {
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let bound = bind(addr).await?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        match bound {
            Bound::Unix(listener) => {
                tokio::spawn(accept_loop_unix(listener, events_tx));
            }
            Bound::Tcp(listener) => {
                tokio::spawn(accept_loop_tcp(listener, events_tx));
            }
        }

        Ok(Self { events_rx })
    }

    pub async fn next_event(&mut self) -> Option<TransportEvent> {
        self.events_rx.recv().await
    }
}

async fn accept_loop_unix(listener: UnixListener, events_tx: mpsc::UnboundedSender<TransportEvent>) {
    let mut next_id: ClientId = 0;
    loop {
        let (io, _) = match listener.accept().await {
            Ok(pair) => pair,
            Err(err) => {
                warn!(%err, "control socket accept failed");
                continue;
            }
        };
        let id = next_id;
        next_id += 1;
        let events_tx = events_tx.clone();
        tokio::spawn(async move {
            if let Err(err) = serve_client(id, io, events_tx).await {
                debug!(client = id, %err, "client connection ended");
            }
        });
    }
}

async fn accept_loop_tcp(listener: TcpListener, events_tx: mpsc::UnboundedSender<TransportEvent>) {
    let mut next_id: ClientId = 0;
    loop {
        let (io, _) = match listener.accept().await {
            Ok(pair) => pair,
            Err(err) => {
                warn!(%err, "control socket accept failed");
                continue;
            }
        };
        let id = next_id;
        next_id += 1;
        let events_tx = events_tx.clone();
        tokio::spawn(async move {
            if let Err(err) = serve_client(id, io, events_tx).await {
                debug!(client = id, %err, "client connection ended");
            }
        });
    }
}

async fn serve_client<IO>(
    id: ClientId,
    io: IO,
    events_tx: mpsc::UnboundedSender<TransportEvent>,
) -> Result<(), tokio_tungstenite::tungstenite::Error>
where
    IO: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    let ws = tokio_tungstenite::accept_async(io).await?;
    let (mut sink, mut stream) = ws.split();

    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Message>();
    if events_tx.send(TransportEvent::Connected(id, out_tx)).is_err() {
        return Ok(());
    }

    loop {
        tokio::select! {
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<RpcRequest>(&text) {
                            Ok(request) => {
                                if events_tx.send(TransportEvent::Request(id, request)).is_err() {
                                    break;
                                }
                            }
                            Err(err) => warn!(client = id, %err, "malformed rpc request"),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        warn!(client = id, %err, "control socket read error");
                        break;
                    }
                }
            }
            out = out_rx.recv() => {
                match out {
                    Some(message) => {
                        if sink.send(message).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }

    let _ = events_tx.send(TransportEvent::Disconnected(id));
    Ok(())
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
