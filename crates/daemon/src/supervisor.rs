// SPDX-License-Identifier: MIT

//! Supervisor state machine + RPC dispatch (SPEC_FULL.md §4.5): owns the `ServiceTable`,
//! applies RPC requests, reaps children, and emits `output`/`started`/`stopped`/`updated`
//! notifications.
//!
//! Grounded on `examples/original_source/src/nsgod.cpp`'s handler registrations, generalized
//! from raw `status_map`/`fdmap`/`pidmap` globals to the core crate's `ServiceTable`.

use std::collections::BTreeMap;
use std::os::fd::RawFd;

use nix::sys::signal::{kill, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use nsgod_core::clock::{Clock, SystemClock};
use nsgod_core::error::SupervisorError;
use nsgod_core::launch_options::LaunchOptions;
use nsgod_core::policy::{evaluate_restart, RestartOutcome};
use nsgod_core::service::ServiceState;
use nsgod_core::status::RestartMode;
use nsgod_core::table::ServiceTable;

use nsgod_wire::envelope::ok_response;
use nsgod_wire::events::{OutputEvent, RestartNotice, StartedEvent, StoppedEvent, UpdatedEvent};
use nsgod_wire::methods::{
    EraseParams, KillParams, ResizeParams, SendParams, StartParams, StatusParams,
};
use nsgod_wire::service_wire::ServiceStateWire;

use crate::event_loop::{EventLoop, Source};
use crate::launch;
use crate::tty;

pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// `strerror(3)`, for surfacing OS call failures the way the upstream `nsgod.cpp` does.
fn strerror(errno: i32) -> String {
    // SAFETY: `libc::strerror` returns a pointer to a static/thread-local buffer valid until
    // the next call on this thread; the daemon's single-threaded runtime (SPEC_FULL.md §5)
    // never calls it concurrently, and the `CStr` is copied out before returning.
    unsafe { std::ffi::CStr::from_ptr(libc::strerror(errno)).to_string_lossy().into_owned() }
}

/// Outbound notification, serialized by the transport layer into an `RpcNotification`.
#[derive(Debug, Clone)]
pub enum Notification {
    Output(OutputEvent),
    Started(StartedEvent),
    Stopped(StoppedEvent),
    Updated(UpdatedEvent),
}

impl Notification {
    pub fn name(&self) -> &'static str {
        match self {
            Notification::Output(_) => "output",
            Notification::Started(_) => "started",
            Notification::Stopped(_) => "stopped",
            Notification::Updated(_) => "updated",
        }
    }

    pub fn data(&self) -> Value {
        match self {
            Notification::Output(e) => serde_json::to_value(e).unwrap_or(Value::Null),
            Notification::Started(e) => serde_json::to_value(e).unwrap_or(Value::Null),
            Notification::Stopped(e) => serde_json::to_value(e).unwrap_or(Value::Null),
            Notification::Updated(e) => serde_json::to_value(e).unwrap_or(Value::Null),
        }
    }
}

pub struct Supervisor<C: Clock = SystemClock> {
    table: ServiceTable,
    clock: C,
    event_loop: EventLoop,
    child_io_token: u64,
    notify_tx: mpsc::UnboundedSender<Notification>,
}

impl Supervisor<SystemClock> {
    pub fn new(notify_tx: mpsc::UnboundedSender<Notification>) -> Self {
        Self::with_clock(SystemClock, notify_tx)
    }
}

impl<C: Clock> Supervisor<C> {
    pub fn with_clock(clock: C, notify_tx: mpsc::UnboundedSender<Notification>) -> Self {
        let mut event_loop = EventLoop::new();
        let child_io_token = event_loop.register(Source::ChildIo);
        Self { table: ServiceTable::new(), clock, event_loop, child_io_token, notify_tx }
    }

    /// JSON-RPC allows omitting `params` entirely, which `RpcRequest` surfaces as `Value::Null`
    /// (SPEC_FULL.md §6). Every param DTO here derives `Deserialize` for a JSON object, which
    /// rejects `null` outright, so callers with no arguments (`status`, `ping`) would otherwise
    /// fail before their own `#[serde(default)]` fields ever apply.
    fn normalize_params(params: Value) -> Value {
        if params.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            params
        }
    }

    fn emit(&self, notification: Notification) {
        let _ = self.notify_tx.send(notification);
    }

    fn emit_updated(&self) {
        let services = self
            .table
            .iter()
            .map(|(name, state)| (name.clone(), ServiceStateWire::from(state)))
            .collect::<BTreeMap<_, _>>();
        self.emit(Notification::Updated(UpdatedEvent { services }));
    }

    pub fn event_loop_mut(&mut self) -> &mut EventLoop {
        &mut self.event_loop
    }

    /// Dispatch one RPC method call. Returns the `result` value on success, or the message
    /// string to surface as an RPC error.
    pub fn dispatch(&mut self, method: &str, params: Value) -> Result<Value, String> {
        debug!(method, "dispatching rpc request");
        match method {
            "ping" => Ok(params),
            "version" => Ok(Value::String(VERSION.to_string())),
            "start" => self.start(params),
            "send" => self.send(params).map_err(|e| e.to_string()),
            "resize" => self.resize(params).map_err(|e| e.to_string()),
            "erase" => self.erase(params).map_err(|e| e.to_string()),
            "status" => self.status(params).map_err(|e| e.to_string()),
            "kill" => self.kill(params).map_err(|e| e.to_string()),
            "shutdown" => {
                // Route through the same SIGINT path as an external signal, per SPEC_FULL.md
                // §4.5 ("unified exit path through the signal router").
                let _ = kill(Pid::this(), Signal::SIGINT);
                Ok(Value::Null)
            }
            other => Err(format!("unknown method {other:?}")),
        }
    }

    fn start(&mut self, params: Value) -> Result<Value, String> {
        let params: StartParams = serde_json::from_value(Self::normalize_params(params))
            .map_err(|e| nsgod_wire::error::ProtocolError::Malformed(e.to_string()).to_string())?;
        if let Some(existing) = self.table.get(&params.service) {
            if existing.status != nsgod_core::status::ServiceStatus::Exited {
                return Err(SupervisorError::AlreadyExists.to_string());
            }
            self.retire_entry(&params.service);
        }

        let state = self
            .launch_and_insert(&params.service, params.options)
            .map_err(|e| e.to_string())?;
        let wire = ServiceStateWire::from(&state);
        info!(service = %params.service, pid = state.pid, "service started");
        self.emit_updated();
        Ok(serde_json::to_value(wire).unwrap_or(Value::Null))
    }

    fn launch_and_insert(
        &mut self,
        name: &str,
        options: LaunchOptions,
    ) -> Result<ServiceState, crate::error::LaunchError> {
        let (launched, log_fd) = launch::create_process(&options)?;
        self.event_loop.add(launched.io_fd, self.child_io_token).ok();
        let state = ServiceState::new(name, options, launched, log_fd, &self.clock);
        self.table.insert(state.clone());
        Ok(state)
    }

    fn retire_entry(&mut self, name: &str) {
        if let Some(state) = self.table.remove(name) {
            self.close_fds(&state);
        }
    }

    /// Closes whatever descriptors this entry still owns. A hangup already closed them via
    /// [`ServiceState::take_closed_fds`] and left `io_fd` at its `-1` sentinel and `log_fd` at
    /// `None`, so this is a no-op for an entry that already hung up — it only has real work to
    /// do for a service erased (or replaced by `start`) while its child is still alive.
    fn close_fds(&mut self, state: &ServiceState) {
        if state.io_fd >= 0 {
            self.event_loop.del(state.io_fd);
            let _ = nix::unistd::close(state.io_fd);
        }
        if let Some(log_fd) = state.log_fd {
            let _ = nix::unistd::close(log_fd);
        }
    }

    fn send(&mut self, params: Value) -> Result<Value, SupervisorError> {
        let params: SendParams = serde_json::from_value(Self::normalize_params(params))
            .map_err(|_| SupervisorError::NotFound)?;
        let state = self.table.get(&params.service).ok_or(SupervisorError::NotFound)?;
        if state.status == nsgod_core::status::ServiceStatus::Exited {
            return Err(SupervisorError::Exited);
        }
        let _ = nix::unistd::write(
            unsafe { std::os::fd::BorrowedFd::borrow_raw(state.io_fd) },
            params.data.as_bytes(),
        );
        Ok(ok_response(&params.service))
    }

    fn resize(&mut self, params: Value) -> Result<Value, SupervisorError> {
        let params: ResizeParams =
            serde_json::from_value(Self::normalize_params(params)).map_err(|_| SupervisorError::NotFound)?;
        let state = self.table.get(&params.service).ok_or(SupervisorError::NotFound)?;
        if state.status == nsgod_core::status::ServiceStatus::Exited {
            return Err(SupervisorError::Exited);
        }
        if !state.is_pty() {
            return Err(SupervisorError::NotAPty);
        }
        let _ = tty::resize(state.io_fd, params.column, params.row);
        Ok(ok_response(&params.service))
    }

    fn erase(&mut self, params: Value) -> Result<Value, SupervisorError> {
        let params: EraseParams =
            serde_json::from_value(Self::normalize_params(params)).map_err(|_| SupervisorError::NotFound)?;
        let state = self.table.get(&params.service).ok_or(SupervisorError::NotFound)?;
        if state.status != nsgod_core::status::ServiceStatus::Exited {
            return Err(SupervisorError::NotExited);
        }
        self.retire_entry(&params.service);
        self.emit_updated();
        Ok(ok_response(&params.service))
    }

    fn status(&mut self, params: Value) -> Result<Value, SupervisorError> {
        let params: StatusParams =
            serde_json::from_value(Self::normalize_params(params)).map_err(|_| SupervisorError::NotFound)?;
        match params.service {
            Some(name) => {
                let state = self.table.get(&name).ok_or(SupervisorError::NotFound)?;
                Ok(serde_json::to_value(ServiceStateWire::from(state)).unwrap_or(Value::Null))
            }
            None => {
                let services = self
                    .table
                    .iter()
                    .map(|(name, state)| (name.clone(), ServiceStateWire::from(state)))
                    .collect::<BTreeMap<_, _>>();
                Ok(serde_json::to_value(services).unwrap_or(Value::Null))
            }
        }
    }

    /// `kill` passes the signal number straight to the raw syscall rather than through
    /// `nix::sys::signal::Signal`, since that enum has no `0` variant and `kill(pid, 0)` (the
    /// existence-check form, SPEC_FULL.md §8) is a required case. A failure surfaces
    /// `strerror(errno)` verbatim, matching the upstream `nsgod.cpp:149`
    /// (`throw std::runtime_error(strerror(errno))`) rather than collapsing every OS failure
    /// into "target service not exists.".
    fn kill(&mut self, params: Value) -> Result<Value, SupervisorError> {
        let params: KillParams =
            serde_json::from_value(Self::normalize_params(params)).map_err(|_| SupervisorError::NotFound)?;
        let state = self.table.get_mut(&params.service).ok_or(SupervisorError::NotFound)?;
        state.restart_mode = params.restart.unwrap_or(RestartMode::Normal);
        let pid = state.pid;
        // SAFETY: `pid` is a plain integer and `params.signal` an arbitrary caller-supplied
        // signal number (including 0); `libc::kill` itself does nothing unsafe with them.
        let ret = unsafe { libc::kill(pid, params.signal) };
        if ret != 0 {
            let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(libc::EINVAL);
            return Err(SupervisorError::Os(strerror(errno)));
        }
        Ok(Value::Null)
    }

    /// Reap every child currently in `WNOHANG` state, per SPEC_FULL.md §4.4/§4.5. Called in
    /// response to `SignalEvent::Reap`.
    pub fn reap(&mut self) {
        loop {
            let status = waitpid(
                Pid::from_raw(-1),
                Some(WaitPidFlag::WNOHANG | WaitPidFlag::WUNTRACED | WaitPidFlag::WCONTINUED),
            );
            match status {
                Ok(WaitStatus::StillAlive) | Err(_) => break,
                Ok(status) => {
                    if !self.handle_wait_status(status) {
                        break;
                    }
                }
            }
        }
    }

    /// Returns `false` when there is nothing more to reap this pass.
    fn handle_wait_status(&mut self, status: WaitStatus) -> bool {
        let pid = match status.pid() {
            Some(pid) => pid.as_raw(),
            None => return false,
        };
        let Some(name) = self.table.name_for_pid(pid).map(str::to_string) else { return true };

        match status {
            WaitStatus::Stopped(_, _) => self.handle_stopped(&name),
            WaitStatus::Continued(_) => self.handle_continued(&name),
            WaitStatus::Exited(_, _) | WaitStatus::Signaled(_, _, _) => self.handle_exited(&name),
            _ => {}
        }
        true
    }

    fn handle_stopped(&mut self, name: &str) {
        let Some(state) = self.table.get_mut(name) else { return };
        if state.options.waitstop && state.status == nsgod_core::status::ServiceStatus::Waiting {
            let _ = kill(Pid::from_raw(state.pid), Signal::SIGCONT);
            state.status = nsgod_core::status::ServiceStatus::Running;
            self.emit(Notification::Started(StartedEvent { service: name.to_string() }));
        } else if let Some(state) = self.table.get_mut(name) {
            state.status = nsgod_core::status::ServiceStatus::Stopped;
        }
        self.emit_updated();
    }

    fn handle_continued(&mut self, name: &str) {
        if let Some(state) = self.table.get_mut(name) {
            state.status = nsgod_core::status::ServiceStatus::Running;
        }
        self.emit_updated();
    }

    fn handle_exited(&mut self, name: &str) {
        self.table.mark_exited(name, &self.clock);
        info!(service = name, "service exited");

        let (mode, policy, restart_count, last_dead_instant, died_at) = {
            let Some(state) = self.table.get(name) else { return };
            (
                state.restart_mode,
                state.options.restart,
                state.restart_count,
                state.last_dead_instant,
                self.clock.now(),
            )
        };

        match evaluate_restart(mode, &policy, restart_count, last_dead_instant, died_at) {
            RestartOutcome::Terminal { error } => {
                self.emit(Notification::Stopped(StoppedEvent {
                    service: name.to_string(),
                    restart: error.map(|e| RestartNotice::Terminal { error: e.to_string() }),
                }));
            }
            RestartOutcome::Restart { restart_count } => {
                let options = self.table.get(name).map(|s| s.options.clone());
                let Some(options) = options else { return };
                match launch::create_process(&options) {
                    Ok((launched, log_fd)) => {
                        self.event_loop.add(launched.io_fd, self.child_io_token).ok();
                        self.table.splice_restarted(name, launched, log_fd, restart_count, &self.clock);
                        self.emit(Notification::Stopped(StoppedEvent {
                            service: name.to_string(),
                            restart: Some(RestartNotice::Scheduled {
                                max: policy.max,
                                current: restart_count,
                            }),
                        }));
                    }
                    Err(err) => {
                        warn!(service = name, %err, "restart launch failed");
                        self.emit(Notification::Stopped(StoppedEvent {
                            service: name.to_string(),
                            restart: Some(RestartNotice::Terminal {
                                error: "failed to restart".to_string(),
                            }),
                        }));
                    }
                }
            }
        }
        self.emit_updated();
    }

    /// Read available output from a child's `io_fd`, append to its log if present, and emit
    /// `output`; unregister and close on EOF (hangup).
    pub fn handle_child_io(&mut self, fd: RawFd) {
        let Some(name) = self.table.name_for_fd(fd).map(str::to_string) else { return };
        let mut buf = [0u8; 0xFFFF];
        let borrowed = unsafe { std::os::fd::BorrowedFd::borrow_raw(fd) };
        match nix::unistd::read(borrowed, &mut buf) {
            Ok(0) | Err(_) => {
                self.event_loop.del(fd);
                self.table.drop_fd(fd);
                let log_fd = self.table.get_mut(&name).and_then(ServiceState::take_closed_fds);
                let _ = nix::unistd::close(fd);
                if let Some(log_fd) = log_fd {
                    let _ = nix::unistd::close(log_fd);
                }
            }
            Ok(n) => {
                if let Some(state) = self.table.get(&name) {
                    if let Some(log_fd) = state.log_fd {
                        let borrowed_log = unsafe { std::os::fd::BorrowedFd::borrow_raw(log_fd) };
                        let _ = nix::unistd::write(borrowed_log, &buf[..n]);
                    }
                }
                let data = String::from_utf8_lossy(&buf[..n]).into_owned();
                self.emit(Notification::Output(OutputEvent { service: name, data }));
            }
        }
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
