// SPDX-License-Identifier: MIT

//! Entry point: bootstrap the sandbox, acquire the lock, then drive the single select loop
//! that ties together child I/O, signals, and the RPC transport (SPEC_FULL.md §4, §5).
//!
//! The runtime is built with `new_current_thread`, not `#[tokio::main]`'s default
//! multi-thread flavor — the daemon is specified as strictly single-threaded and
//! cooperative, with exactly one task ever calling `Supervisor::dispatch`.

use std::collections::HashMap;
use std::process::ExitCode;

use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing::{info, warn};

use nsgod_daemon::env;
use nsgod_daemon::lockfile::LockFile;
use nsgod_daemon::sandbox;
use nsgod_daemon::signals::{SignalEvent, SignalRouter};
use nsgod_daemon::supervisor::Supervisor;
use nsgod_daemon::transport::{ClientId, Transport, TransportEvent};

use nsgod_wire::envelope::{RpcNotification, RpcResponse};

fn main() -> ExitCode {
    let debug = env::debug();

    let notify = match sandbox::init(debug) {
        Ok(notify) => notify,
        Err(err) => {
            eprintln!("nsgod: sandbox bootstrap failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env::log_filter()))
        .init();

    let lock = match LockFile::acquire(&env::lock_path()) {
        Ok(lock) => lock,
        Err(err) => {
            tracing::error!(%err, "failed to acquire lock file");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!(%err, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(run(notify));
    lock.remove();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "daemon exited with error");
            ExitCode::FAILURE
        }
    }
}

async fn run(notify: Option<nix::sys::eventfd::EventFd>) -> anyhow::Result<()> {
    let (notify_tx, mut notify_rx) = mpsc::unbounded_channel();
    let mut supervisor = Supervisor::new(notify_tx);
    let mut signals = SignalRouter::spawn()?;
    let mut transport = Transport::bind(&env::api_addr()).await?;

    if let Some(notify) = notify {
        sandbox::notify_ready(notify)?;
    }
    info!(addr = %env::api_addr(), "nsgod listening");

    let mut clients: HashMap<ClientId, mpsc::UnboundedSender<Message>> = HashMap::new();

    loop {
        tokio::select! {
            event = transport.next_event() => {
                match event {
                    Some(TransportEvent::Connected(id, sender)) => {
                        clients.insert(id, sender);
                    }
                    Some(TransportEvent::Disconnected(id)) => {
                        clients.remove(&id);
                    }
                    Some(TransportEvent::Request(id, request)) => {
                        let response = match supervisor.dispatch(&request.method, request.params) {
                            Ok(result) => RpcResponse::ok(request.id, result),
                            Err(message) => RpcResponse::err(request.id, message),
                        };
                        send_to(&clients, id, &response);
                    }
                    None => break,
                }
            }
            signal = signals.recv() => {
                match signal {
                    Some(SignalEvent::Reap) => supervisor.reap(),
                    Some(SignalEvent::Shutdown) | None => {
                        info!("shutdown requested");
                        break;
                    }
                }
            }
            ready = supervisor.event_loop_mut().wait() => {
                match ready {
                    Some(ready) => supervisor.handle_child_io(ready.fd),
                    None => break,
                }
            }
            notification = notify_rx.recv() => {
                match notification {
                    Some(notification) => broadcast(&mut clients, &notification),
                    None => break,
                }
            }
        }
    }

    supervisor.event_loop_mut().shutdown();
    Ok(())
}

fn send_to(clients: &HashMap<ClientId, mpsc::UnboundedSender<Message>>, id: ClientId, response: &RpcResponse) {
    let Some(sender) = clients.get(&id) else { return };
    match serde_json::to_string(response) {
        Ok(text) => {
            let _ = sender.send(Message::Text(text));
        }
        Err(err) => warn!(%err, "failed to serialize rpc response"),
    }
}

fn broadcast(
    clients: &mut HashMap<ClientId, mpsc::UnboundedSender<Message>>,
    notification: &nsgod_daemon::supervisor::Notification,
) {
    let payload = RpcNotification { event: notification.name().to_string(), data: notification.data() };
    let text = match serde_json::to_string(&payload) {
        Ok(text) => text,
        Err(err) => {
            warn!(%err, "failed to serialize rpc notification");
            return;
        }
    };
    clients.retain(|_, sender| sender.send(Message::Text(text.clone())).is_ok());
}
