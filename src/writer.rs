//! A buffered abstraction over terminal output that accumulates an entire frame and
//! sends it in a single write, which avoids visible tearing.

use crate::ansi;
use crate::size::Point;
use std::io::{self, Write};

pub struct Writer {
    out: Vec<u8>,
}

impl Writer {
    pub fn new() -> Writer {
        Writer { out: Vec::new() }
    }

    /// Sends buffered content to `sink` in a single write.
    pub fn send<W: Write>(&mut self, sink: &mut W) -> io::Result<()> {
        if self.out.len() > 0 {
            sink.write_all(self.as_bytes())?;
            sink.flush()?;
            self.out.clear();
        }
        Ok(())
    }

    pub fn clear_screen(&mut self) -> &mut Writer {
        self.write_str(ansi::clear_screen())
    }

    pub fn home_cursor(&mut self) -> &mut Writer {
        self.write_str(ansi::home_cursor())
    }

    pub fn clear_line(&mut self) -> &mut Writer {
        self.write_str(ansi::clear_line())
    }

    pub fn set_cursor(&mut self, cursor: Point) -> &mut Writer {
        self.out.extend_from_slice(ansi::set_cursor(cursor).as_bytes());
        self
    }

    pub fn show_cursor(&mut self) -> &mut Writer {
        self.write_str(ansi::show_cursor())
    }

    pub fn hide_cursor(&mut self) -> &mut Writer {
        self.write_str(ansi::hide_cursor())
    }

    pub fn reverse_video(&mut self, on: bool) -> &mut Writer {
        self.write_str(ansi::reverse_video(on))
    }

    pub fn newline(&mut self) -> &mut Writer {
        self.write_str("\r\n")
    }

    pub fn write(&mut self, b: u8) -> &mut Writer {
        self.out.push(b);
        self
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Writer {
        self.out.extend_from_slice(bytes);
        self
    }

    pub fn write_str(&mut self, text: &str) -> &mut Writer {
        self.write_bytes(text.as_bytes())
    }

    /// Returns the buffered content that has not yet been sent.
    pub fn as_bytes(&self) -> &[u8] {
        &self.out
    }
}
