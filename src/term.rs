//! Terminal initialization and interrogation.
//!
//! This module provides functions to initialize the terminal in raw mode such that
//! keystrokes can be read without blocking. It also provides a means of detecting
//! terminal size changes via signal handlers.

use crate::ansi;
use crate::error::{Error, Result};
use crate::size::Size;
use libc::{c_int, c_void, sigaction, sighandler_t, siginfo_t, termios, winsize};
use libc::{SA_SIGINFO, SIGWINCH, STDIN_FILENO, STDOUT_FILENO, TCSAFLUSH, TIOCGWINSZ, VMIN, VTIME};
use std::io::{self, Read, Write};
use std::mem::MaybeUninit;
use std::ptr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Puts the terminal into raw mode.
///
/// The terminal mode is changed such that raw bytes are read from standard input without
/// buffering. Raw mode is configured such that reads do not block indefinitely when no
/// bytes are available. In this case, the underlying driver waits `1/10` second before
/// returning with nothing.
pub fn init() -> Result<()> {
    default_term().and_then(|mut term| unsafe {
        libc::cfmakeraw(&mut term);
        term.c_cc[VMIN] = 0;
        term.c_cc[VTIME] = 1;
        check_err(libc::tcsetattr(STDIN_FILENO, TCSAFLUSH, &term))
    })
}

/// Restores the terminal to its original configuration.
pub fn restore() -> Result<()> {
    default_term()
        .and_then(|term| unsafe { check_err(libc::tcsetattr(STDIN_FILENO, TCSAFLUSH, &term)) })
}

/// Returns the size of the terminal.
///
/// Calls to this function always query the underlying driver, as the terminal size may
/// have changed since the prior request. If the driver is unable to answer, the size
/// is inferred by moving the cursor to the bottom-right corner and asking the terminal
/// where the cursor landed, which requires the terminal to be in raw mode.
pub fn size() -> Result<Size> {
    let win = unsafe {
        let mut win = MaybeUninit::<winsize>::uninit();
        check_err(libc::ioctl(STDOUT_FILENO, TIOCGWINSZ, win.as_mut_ptr()))
            .map(|_| win.assume_init())
    };
    match win {
        Ok(win) if win.ws_col > 0 => Ok(Size::new(win.ws_row as u32, win.ws_col as u32)),
        _ => probe_size(&mut io::stdin(), &mut io::stdout()),
    }
}

/// Infers the terminal size by way of a cursor position report.
fn probe_size<R: Read, W: Write>(input: &mut R, output: &mut W) -> Result<Size> {
    output.write_all(ansi::bottom_right().as_bytes())?;
    output.write_all(ansi::request_cursor().as_bytes())?;
    output.flush()?;

    // Reply is terminated by `R`, though a read timeout also ends it.
    let mut reply = Vec::new();
    for b in input.bytes() {
        let b = b?;
        if b == b'R' {
            break;
        }
        reply.push(b);
    }
    parse_cursor_report(&reply)
}

/// Parses a cursor position report of the form `ESC [ rows ; cols`, excluding the
/// terminating `R`.
fn parse_cursor_report(reply: &[u8]) -> Result<Size> {
    let fields = reply
        .strip_prefix(b"\x1b[")
        .and_then(|fields| std::str::from_utf8(fields).ok())
        .and_then(|fields| fields.split_once(';'));
    match fields {
        Some((rows, cols)) => match (rows.parse::<u32>(), cols.parse::<u32>()) {
            (Ok(rows), Ok(cols)) if cols > 0 => Ok(Size::new(rows, cols)),
            _ => Err(Error::term_size(reply)),
        },
        None => Err(Error::term_size(reply)),
    }
}

/// Returns `true` if the terminal size changed.
///
/// If this function returns `true`, all subsequent calls will return `false` until the
/// terminal size once again changes.
pub fn size_changed() -> bool {
    WINSIZE_CHANGED.swap(false, Ordering::Relaxed)
}

fn check_err(err: c_int) -> Result<()> {
    if err < 0 { Err(Error::os()) } else { Ok(()) }
}

/// Ensures that default terminal configuration is captured at most once.
static DEFAULT_TERM: OnceLock<Result<termios>> = OnceLock::new();

/// Returns the default terminal configuration that can be used for restoring after
/// changing into raw mode.
fn default_term() -> Result<termios> {
    let def_term = DEFAULT_TERM.get_or_init(|| {
        register_winsize_handler()?;
        let term = unsafe {
            let mut term = MaybeUninit::<termios>::uninit();
            check_err(libc::tcgetattr(STDIN_FILENO, term.as_mut_ptr()))?;
            term.assume_init()
        };
        Ok(term)
    });
    match def_term {
        Ok(term) => Ok(*term),
        Err(Error::Os { cause }) => Err(Error::os_cloning(cause)),
        Err(e) => panic!("unexpected error: {e}"),
    }
}

/// Used by signal handler to convey that the terminal size changed.
static WINSIZE_CHANGED: AtomicBool = AtomicBool::new(false);

/// Signal handler that gets invoked when the terminal size changes.
extern "C" fn winsize_handler(_: c_int, _: *mut siginfo_t, _: *mut c_void) {
    WINSIZE_CHANGED.store(true, Ordering::Relaxed);
}

/// Registers the signal handler to capture changes in terminal size.
fn register_winsize_handler() -> Result<()> {
    unsafe {
        let mut sigact = MaybeUninit::<sigaction>::zeroed();
        let sigact_ptr = sigact.as_mut_ptr();
        check_err(libc::sigemptyset(&mut (*sigact_ptr).sa_mask))?;
        (*sigact_ptr).sa_flags = SA_SIGINFO;
        (*sigact_ptr).sa_sigaction = winsize_handler as *const () as sighandler_t;
        check_err(libc::sigaction(SIGWINCH, sigact_ptr, ptr::null_mut()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_report() {
        assert_eq!(parse_cursor_report(b"\x1b[24;80").unwrap(), Size::new(24, 80));
        assert_eq!(parse_cursor_report(b"\x1b[1;1").unwrap(), Size::new(1, 1));
    }

    #[test]
    fn parse_invalid_report() {
        let replies: [&[u8]; 5] = [b"", b"24;80", b"\x1b[24", b"\x1b[x;80", b"\x1b[24;0"];
        for reply in replies {
            assert!(matches!(
                parse_cursor_report(reply),
                Err(Error::TermSize { .. })
            ));
        }
    }

    #[test]
    fn probe_writes_request_and_reads_reply() {
        let mut input = &b"\x1b[40;132Rx"[..];
        let mut output = Vec::new();
        let size = probe_size(&mut input, &mut output).unwrap();
        assert_eq!(size, Size::new(40, 132));
        assert_eq!(output, b"\x1b[999C\x1b[999B\x1b[6n");
        assert_eq!(input, b"x");
    }
}
