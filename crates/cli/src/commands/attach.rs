// SPDX-License-Identifier: MIT

//! `attach <service>`: puts the controlling terminal into raw mode, forwards stdin to the
//! service's `send` method, relays its `output` back to stdout, and keeps the daemon's idea
//! of the window size in sync via `resize` on `SIGWINCH` and on every `started` (the service
//! may have just been re-execed by a restart and lost its prior size).

use std::io::Write;

use serde_json::json;
use tokio::io::AsyncReadExt;
use tokio::signal::unix::{signal, SignalKind};

use nsgod_wire::events::{OutputEvent, StartedEvent};

use crate::client::{next_notification, send_request, ClientSink, RpcClient};
use crate::error::ClientError;
use crate::terminal::{current_size, RawModeGuard};

pub async fn run(client: RpcClient, service: String) -> Result<(), ClientError> {
    let _raw = RawModeGuard::enable()?;
    let (mut sink, mut stream) = client.split();

    send_resize(&mut sink, &service).await?;

    let mut winch = signal(SignalKind::window_change()).map_err(ClientError::Signal)?;
    let mut stdin = tokio::io::stdin();
    let mut buf = [0u8; 4096];

    loop {
        tokio::select! {
            read = stdin.read(&mut buf) => {
                let n = read.map_err(ClientError::Stdin)?;
                if n == 0 {
                    return Ok(());
                }
                let data = String::from_utf8_lossy(&buf[..n]).into_owned();
                send_request(&mut sink, "send", json!({ "service": service, "data": data })).await?;
            }
            _ = winch.recv() => {
                send_resize(&mut sink, &service).await?;
            }
            notification = next_notification(&mut stream) => {
                let notification = notification?;
                match notification.event.as_str() {
                    "output" => {
                        if let Ok(event) = serde_json::from_value::<OutputEvent>(notification.data) {
                            if event.service == service {
                                let mut stdout = std::io::stdout();
                                let _ = stdout.write_all(event.data.as_bytes());
                                let _ = stdout.flush();
                            }
                        }
                    }
                    "started" => {
                        if let Ok(event) = serde_json::from_value::<StartedEvent>(notification.data) {
                            if event.service == service {
                                send_resize(&mut sink, &service).await?;
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}

async fn send_resize(sink: &mut ClientSink, service: &str) -> Result<(), ClientError> {
    let (column, row) = current_size()?;
    send_request(sink, "resize", json!({ "service": service, "column": column, "row": row })).await
}
