//! Screen rendering.
//!
//! A frame is composed in its entirety from the document and the viewport state,
//! then sent to the terminal in one write. Nothing is retained between frames.

use crate::document::Document;
use crate::size::{Point, Size};
use crate::writer::Writer;

/// Position of the cursor in the document.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Cursor {
    /// Logical column.
    pub cx: usize,

    /// Row, which may equal the number of rows in the document.
    pub cy: usize,

    /// Rendered column, always derived from `cx`.
    pub rx: usize,
}

/// The window into the document that is visible on the terminal.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Viewport {
    pub row_off: usize,
    pub col_off: usize,

    /// Number of rows available for text, which excludes the status and message
    /// lines.
    pub rows: usize,
    pub cols: usize,
}

impl Viewport {
    /// Number of terminal rows reserved beneath the text area.
    pub const RESERVED_ROWS: u32 = 2;

    /// Creates a viewport for a terminal of `size`.
    pub fn new(size: Size) -> Viewport {
        let mut view = Viewport {
            row_off: 0,
            col_off: 0,
            rows: 1,
            cols: 1,
        };
        view.resize(size);
        view
    }

    /// Adjusts the viewport to a terminal of `size`, reserving rows for the status
    /// and message lines.
    pub fn resize(&mut self, size: Size) {
        self.rows = size.rows.saturating_sub(Self::RESERVED_ROWS).max(1) as usize;
        self.cols = size.cols.max(1) as usize;
    }

    /// Adjusts offsets such that the cursor at row `cy` and rendered column `rx` is
    /// visible, moving the viewport only as far as necessary.
    pub fn scroll(&mut self, cy: usize, rx: usize) {
        if cy < self.row_off {
            self.row_off = cy;
        }
        if cy >= self.row_off + self.rows {
            self.row_off = cy + 1 - self.rows;
        }
        if rx < self.col_off {
            self.col_off = rx;
        }
        if rx >= self.col_off + self.cols {
            self.col_off = rx + 1 - self.cols;
        }
    }

    /// Returns `true` if the cursor at row `cy` and rendered column `rx` is visible.
    pub fn contains(&self, cy: usize, rx: usize) -> bool {
        cy >= self.row_off
            && cy < self.row_off + self.rows
            && rx >= self.col_off
            && rx < self.col_off + self.cols
    }
}

/// Everything beyond the document and viewport that appears in a frame.
pub struct Status<'a> {
    /// Name of the file associated with the document, if any.
    pub name: Option<&'a str>,

    /// Message to show on the bottom line, which should already account for expiry.
    pub message: Option<&'a str>,
}

/// Composes frames with a welcome `banner` shown when the document is empty.
pub struct Renderer {
    banner: String,
}

impl Renderer {
    /// Maximum number of bytes of the file name shown on the status line.
    const NAME_WIDTH: usize = 20;

    const NO_NAME: &'static str = "[No Name]";

    pub fn new(banner: &str) -> Renderer {
        Renderer {
            banner: banner.to_string(),
        }
    }

    /// Returns a writer containing a complete frame.
    pub fn render(
        &self,
        doc: &Document,
        view: &Viewport,
        cursor: &Cursor,
        status: &Status,
    ) -> Writer {
        let mut w = Writer::new();
        w.hide_cursor().home_cursor();
        self.draw_rows(&mut w, doc, view);
        Self::draw_status(&mut w, doc, view, cursor, status.name);
        Self::draw_message(&mut w, view, status.message);
        w.set_cursor(Point::new(
            cursor.cy.saturating_sub(view.row_off) as u32,
            cursor.rx.saturating_sub(view.col_off) as u32,
        ))
        .show_cursor();
        w
    }

    fn draw_rows(&self, w: &mut Writer, doc: &Document, view: &Viewport) {
        for y in 0..view.rows {
            if let Some(row) = doc.row(y + view.row_off) {
                let rendered = row.rendered();
                let start = view.col_off.min(rendered.len());
                let end = (start + view.cols).min(rendered.len());
                w.write_bytes(&rendered[start..end]);
            } else if doc.rows() == 0 && y == view.rows / 3 {
                let banner = &self.banner.as_bytes()[..self.banner.len().min(view.cols)];
                let pad = (view.cols - banner.len()) / 2;
                w.write(b'~')
                    .write_bytes(&b" ".repeat(pad))
                    .write_bytes(banner);
            } else {
                w.write(b'~');
            }
            w.clear_line().newline();
        }
    }

    fn draw_status(
        w: &mut Writer,
        doc: &Document,
        view: &Viewport,
        cursor: &Cursor,
        name: Option<&str>,
    ) {
        let name = name.unwrap_or(Self::NO_NAME).as_bytes();
        let name = &name[..name.len().min(Self::NAME_WIDTH)];
        let modified = if doc.is_modified() { "(modified)" } else { "" };

        let mut left = name.to_vec();
        left.extend_from_slice(format!(" {modified} - {} lines", doc.rows()).as_bytes());
        left.truncate(view.cols);
        let right = format!("{}/{}", cursor.cy + 1, doc.rows());

        w.reverse_video(true).write_bytes(&left);
        let mut len = left.len();
        while len < view.cols {
            if view.cols - len == right.len() {
                w.write_str(&right);
                break;
            } else {
                w.write(b' ');
                len += 1;
            }
        }
        w.reverse_video(false).newline();
    }

    fn draw_message(w: &mut Writer, view: &Viewport, message: Option<&str>) {
        w.clear_line();
        if let Some(message) = message {
            let bytes = message.as_bytes();
            w.write_bytes(&bytes[..bytes.len().min(view.cols)]);
        }
    }
}
