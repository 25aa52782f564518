// SPDX-License-Identifier: MIT

//! Terminal raw-mode guard and window-size query for `attach` (SPEC_FULL.md §6).
//!
//! Grounded on `examples/gavv-reclog/src/term.rs`'s `termios`-via-`rustix` style, generalized
//! from its canonical-no-echo mode to the full `cfmakeraw` transformation `attach` needs.

use rustix::termios::{self, InputModes, LocalModes, OptionalActions, OutputModes, Termios};

use crate::error::ClientError;

fn make_raw(term: &mut Termios) {
    term.input_modes &= !(InputModes::IGNBRK
        | InputModes::BRKINT
        | InputModes::PARMRK
        | InputModes::ISTRIP
        | InputModes::INLCR
        | InputModes::IGNCR
        | InputModes::ICRNL
        | InputModes::IXON);
    term.output_modes &= !OutputModes::OPOST;
    term.local_modes &=
        !(LocalModes::ECHO | LocalModes::ECHONL | LocalModes::ICANON | LocalModes::ISIG | LocalModes::IEXTEN);
}

/// Puts stdin into raw mode (no echo, non-canonical) for the lifetime of the guard, restoring
/// the previous terminal state on drop — including on early return or panic unwind, so
/// `attach` never leaves the user's shell in raw mode.
pub struct RawModeGuard {
    saved: Termios,
}

impl RawModeGuard {
    pub fn enable() -> Result<Self, ClientError> {
        let fd = rustix::stdio::stdin();
        let saved = termios::tcgetattr(fd).map_err(ClientError::Termios)?;
        let mut raw = saved.clone();
        make_raw(&mut raw);
        termios::tcsetattr(fd, OptionalActions::Now, &raw).map_err(ClientError::Termios)?;
        Ok(Self { saved })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = termios::tcsetattr(rustix::stdio::stdin(), OptionalActions::Now, &self.saved);
    }
}

/// Current `(columns, rows)` of stdout's controlling terminal.
pub fn current_size() -> Result<(u16, u16), ClientError> {
    let ws = termios::tcgetwinsize(rustix::stdio::stdout()).map_err(ClientError::Termios)?;
    Ok((ws.ws_col, ws.ws_row))
}

#[cfg(test)]
#[path = "terminal_tests.rs"]
mod tests;
