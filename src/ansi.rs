//! A collection of functions that produce ANSI control sequences used in the
//! rendering of terminal output.
//!
//! Of particular note, ANSI sequences related to cursor positioning are `1`-based,
//! so functions in this module that accept *row* and *column* are presumed to be
//! `0`-based and silently add `1` to values.

use crate::size::Point;

pub fn clear_screen() -> &'static str {
    "\x1b[2J"
}

pub fn home_cursor() -> &'static str {
    "\x1b[H"
}

pub fn clear_line() -> &'static str {
    "\x1b[K"
}

pub fn show_cursor() -> &'static str {
    "\x1b[?25h"
}

pub fn hide_cursor() -> &'static str {
    "\x1b[?25l"
}

pub fn reverse_video(on: bool) -> &'static str {
    if on { "\x1b[7m" } else { "\x1b[m" }
}

pub fn set_cursor(p: Point) -> String {
    format!("\x1b[{};{}H", p.row + 1, p.col + 1)
}

/// Asks the terminal to report the cursor position as `ESC [ row ; col R`.
pub fn request_cursor() -> &'static str {
    "\x1b[6n"
}

/// Moves the cursor as far right and down as the terminal allows.
pub fn bottom_right() -> &'static str {
    "\x1b[999C\x1b[999B"
}
