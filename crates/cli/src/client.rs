// SPDX-License-Identifier: MIT

//! Control-socket client: connects to `NSGOD_API`, issues JSON-RPC calls, and exposes the
//! notification stream for `log`/`wait`/`attach` to subscribe to.
//!
//! Grounded on the teacher's own WebSocket client (`crates/adapters/src/agent/coop/ws.rs`):
//! the same `tokio_tungstenite::client_async` handshake over a bare stream, generalized to
//! also allow a TCP control address the way `crates/daemon/src/transport.rs` accepts one.

use std::pin::Pin;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use serde_json::Value;
use tokio::net::{TcpStream, UnixStream};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::WebSocketStream;

use nsgod_wire::envelope::{RpcNotification, RpcRequest, RpcResponse};

use crate::error::ClientError;

const HANDSHAKE_URI: &str = "ws://localhost/";

/// The write half of a split [`RpcClient`], used by `attach` to interleave outgoing `send`/
/// `resize` calls with concurrent reads from [`ClientStream`].
pub type ClientSink = Pin<Box<dyn Sink<Message, Error = WsError> + Send>>;
/// The read half of a split [`RpcClient`].
pub type ClientStream = Pin<Box<dyn Stream<Item = Result<Message, WsError>> + Send>>;

/// Send a fire-and-forget JSON-RPC request over a split sink; `attach` doesn't wait for
/// `send`/`resize` responses, only for the `output`/`started` notifications on the read side.
pub async fn send_request(sink: &mut ClientSink, method: &str, params: Value) -> Result<(), ClientError> {
    let request = RpcRequest { id: 0, method: method.to_string(), params };
    let text = serde_json::to_string(&request).map_err(ClientError::Encode)?;
    sink.send(Message::Text(text)).await.map_err(ClientError::Handshake)
}

/// Read the next frame off a split stream and parse it as a notification, skipping anything
/// else (stray RPC responses, pings).
pub async fn next_notification(stream: &mut ClientStream) -> Result<RpcNotification, ClientError> {
    loop {
        let message = stream.next().await.ok_or(ClientError::ConnectionClosed)?.map_err(ClientError::Handshake)?;
        match message {
            Message::Text(text) => {
                if let Ok(notification) = serde_json::from_str::<RpcNotification>(&text) {
                    return Ok(notification);
                }
            }
            Message::Close(_) => return Err(ClientError::ConnectionClosed),
            _ => {}
        }
    }
}

/// A connected control-socket session. `call` is used for request/response RPCs; subscribing
/// commands (`log`, `wait`, `attach`) drive `next_notification` in a loop instead.
pub enum RpcClient {
    Unix(WebSocketStream<UnixStream>),
    Tcp(WebSocketStream<TcpStream>),
}

impl RpcClient {
    pub async fn connect(addr: &str) -> Result<Self, ClientError> {
        if let Some(path) = addr.strip_prefix("ws+unix://") {
            let stream = UnixStream::connect(path).await.map_err(ClientError::Connect)?;
            let (ws, _) =
                tokio_tungstenite::client_async(HANDSHAKE_URI, stream).await.map_err(ClientError::Handshake)?;
            Ok(Self::Unix(ws))
        } else {
            let stream = TcpStream::connect(addr).await.map_err(ClientError::Connect)?;
            let (ws, _) =
                tokio_tungstenite::client_async(HANDSHAKE_URI, stream).await.map_err(ClientError::Handshake)?;
            Ok(Self::Tcp(ws))
        }
    }

    async fn send_message(&mut self, message: Message) -> Result<(), ClientError> {
        let result = match self {
            Self::Unix(ws) => ws.send(message).await,
            Self::Tcp(ws) => ws.send(message).await,
        };
        result.map_err(ClientError::Handshake)
    }

    async fn next_message(&mut self) -> Result<Message, ClientError> {
        let next = match self {
            Self::Unix(ws) => ws.next().await,
            Self::Tcp(ws) => ws.next().await,
        };
        next.ok_or(ClientError::ConnectionClosed)?.map_err(ClientError::Handshake)
    }

    /// Issue one RPC call and wait for its matching response, skipping any notification
    /// frames that arrive first (a subscription may already be active on this connection).
    pub async fn call(&mut self, id: u64, method: &str, params: Value) -> Result<Value, ClientError> {
        let request = RpcRequest { id, method: method.to_string(), params };
        let text = serde_json::to_string(&request).map_err(ClientError::Encode)?;
        self.send_message(Message::Text(text)).await?;

        loop {
            let message = self.next_message().await?;
            let Message::Text(text) = message else {
                if matches!(message, Message::Close(_)) {
                    return Err(ClientError::ConnectionClosed);
                }
                continue;
            };
            let Ok(response) = serde_json::from_str::<RpcResponse>(&text) else { continue };
            if response.id != id {
                continue;
            }
            return match (response.result, response.error) {
                (Some(result), _) => Ok(result),
                (None, Some(error)) => Err(ClientError::Remote(error.message)),
                (None, None) => Ok(Value::Null),
            };
        }
    }

    /// Send a raw text frame without waiting for a response (used by `attach` to forward
    /// stdin bytes via `send`, fire-and-forget).
    pub async fn notify(&mut self, method: &str, params: Value) -> Result<(), ClientError> {
        let request = RpcRequest { id: 0, method: method.to_string(), params };
        let text = serde_json::to_string(&request).map_err(ClientError::Encode)?;
        self.send_message(Message::Text(text)).await
    }

    /// Wait for the next server-pushed event, ignoring any stray RPC response frames.
    pub async fn next_notification(&mut self) -> Result<RpcNotification, ClientError> {
        loop {
            let message = self.next_message().await?;
            match message {
                Message::Text(text) => {
                    if let Ok(notification) = serde_json::from_str::<RpcNotification>(&text) {
                        return Ok(notification);
                    }
                }
                Message::Close(_) => return Err(ClientError::ConnectionClosed),
                _ => {}
            }
        }
    }

    /// Split into independent read/write halves so `attach` can forward stdin and watch
    /// SIGWINCH concurrently with reading `output`/`started` notifications.
    pub fn split(self) -> (ClientSink, ClientStream) {
        match self {
            Self::Unix(ws) => {
                let (sink, stream) = ws.split();
                (Box::pin(sink), Box::pin(stream))
            }
            Self::Tcp(ws) => {
                let (sink, stream) = ws.split();
                (Box::pin(sink), Box::pin(stream))
            }
        }
    }
}
