//! Conversions between logical and rendered columns.
//!
//! A row is stored as raw bytes, where each byte occupies exactly one *logical*
//! column. When drawn to the terminal, tabs are expanded with spaces up to the next
//! tab stop, so a byte may occupy more than one *rendered* column. The functions in
//! this module translate between the two coordinate spaces.

use std::ops::RangeInclusive;

/// Permissible widths of a tab stop.
pub const TAB_STOPS: RangeInclusive<usize> = 1..=16;

/// Returns the rendered form of `content`, where each tab is replaced by enough
/// spaces to reach the next multiple of `tab_stop`.
pub fn expand(content: &[u8], tab_stop: usize) -> Vec<u8> {
    let tabs = content.iter().filter(|&&b| b == b'\t').count();
    let mut rendered = Vec::with_capacity(content.len() + tabs * (tab_stop - 1));
    for &b in content {
        if b == b'\t' {
            rendered.push(b' ');
            while rendered.len() % tab_stop != 0 {
                rendered.push(b' ');
            }
        } else {
            rendered.push(b);
        }
    }
    rendered
}

/// Returns the rendered column corresponding to the logical column `cx`.
///
/// If `cx` extends beyond the end of `content`, only the bytes in `content` are
/// counted.
pub fn cx_to_rx(content: &[u8], cx: usize, tab_stop: usize) -> usize {
    content.iter().take(cx).fold(0, |rx, &b| advance(rx, b, tab_stop))
}

/// Returns the logical column corresponding to the rendered column `rx`.
///
/// The result is the first logical column whose cumulative rendered width exceeds
/// `rx`, or `content.len()` if no such column exists. Since a tab spans several
/// rendered columns, every `rx` inside a tab maps back to that tab's column.
pub fn rx_to_cx(content: &[u8], rx: usize, tab_stop: usize) -> usize {
    let mut width = 0;
    for (cx, &b) in content.iter().enumerate() {
        width = advance(width, b, tab_stop);
        if width > rx {
            return cx;
        }
    }
    content.len()
}

/// Returns the rendered column following byte `b` when placed at column `rx`.
#[inline(always)]
fn advance(rx: usize, b: u8, tab_stop: usize) -> usize {
    if b == b'\t' {
        rx + (tab_stop - 1) - (rx % tab_stop) + 1
    } else {
        rx + 1
    }
}
