//! Editor.
//!
//! An [`Editor`] owns the document along with everything needed to edit it: the
//! cursor, the viewport, the most recent search and the status message. Every
//! editing operation is a method on the editor, and none of them perform terminal
//! I/O, which is left to the controller.

use crate::config::Settings;
use crate::document::Document;
use crate::echo::Echo;
use crate::error::Error;
use crate::io;
use crate::key::{self, Key};
use crate::render::{Cursor, Status, Viewport};
use crate::search::{self, Match, Session};
use crate::size::Size;
use std::time::Duration;
use tracing::{info, warn};

pub struct Editor {
    doc: Document,

    /// An optional path if the document is associated with a file.
    path: Option<String>,

    cursor: Cursor,
    view: Viewport,

    /// Matches from the most recent search.
    session: Session,

    echo: Echo,

    /// Number of additional quit requests required to discard unsaved changes.
    quit_times: usize,

    /// Remaining quit requests before unsaved changes are discarded.
    quit_left: usize,

    /// Key that most recently requested to quit, named in the confirmation message.
    quit_key: Key,
}

impl Editor {
    pub fn new(doc: Document, path: Option<String>, size: Size, settings: &Settings) -> Editor {
        Editor {
            doc,
            path,
            cursor: Cursor::default(),
            view: Viewport::new(size),
            session: Session::empty(),
            echo: Echo::new(Duration::from_secs(settings.message_secs)),
            quit_times: settings.quit_times,
            quit_left: settings.quit_times,
            quit_key: key::CTRL_Q,
        }
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn view(&self) -> &Viewport {
        &self.view
    }

    /// Returns the status to be drawn beneath the document.
    pub fn status(&self) -> Status<'_> {
        Status {
            name: self.path(),
            message: self.echo.text(),
        }
    }

    pub fn set_echo(&mut self, text: &str) {
        self.echo.set(text);
    }

    pub fn clear_echo(&mut self) {
        self.echo.clear();
    }

    pub fn resize(&mut self, size: Size) {
        self.view.resize(size);
        self.scroll();
    }

    /// Recomputes the rendered column of the cursor and adjusts the viewport so
    /// the cursor remains visible.
    pub fn scroll(&mut self) {
        self.cursor.rx = self.doc.cx_to_rx(self.cursor.cy, self.cursor.cx);
        self.view.scroll(self.cursor.cy, self.cursor.rx);
        debug_assert!(self.view.contains(self.cursor.cy, self.cursor.rx));
    }

    pub fn move_left(&mut self) {
        if self.cursor.cx > 0 {
            self.cursor.cx -= 1;
        } else if self.cursor.cy > 0 {
            self.cursor.cy -= 1;
            self.cursor.cx = self.doc.row_len(self.cursor.cy);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor.cy < self.doc.rows() {
            if self.cursor.cx < self.doc.row_len(self.cursor.cy) {
                self.cursor.cx += 1;
            } else {
                self.cursor.cy += 1;
                self.cursor.cx = 0;
            }
        }
        self.snap_col();
    }

    pub fn move_up(&mut self) {
        if self.cursor.cy > 0 {
            self.cursor.cy -= 1;
        }
        self.snap_col();
    }

    /// Moves the cursor down, which may place it on the empty row following the
    /// last row of the document.
    pub fn move_down(&mut self) {
        if self.cursor.cy < self.doc.rows() {
            self.cursor.cy += 1;
        }
        self.snap_col();
    }

    pub fn move_page_up(&mut self) {
        for _ in 0..self.view.rows {
            self.move_up();
        }
    }

    pub fn move_page_down(&mut self) {
        for _ in 0..self.view.rows {
            self.move_down();
        }
    }

    pub fn move_start(&mut self) {
        self.cursor.cx = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor.cx = self.doc.row_len(self.cursor.cy);
    }

    /// Clamps the cursor column to the length of the current row.
    fn snap_col(&mut self) {
        self.cursor.cx = self.cursor.cx.min(self.doc.row_len(self.cursor.cy));
    }

    /// Inserts `c` at the cursor, appending a new row first if the cursor is past the
    /// last row.
    pub fn insert_char(&mut self, c: u8) {
        if self.cursor.cy == self.doc.rows() {
            self.doc.insert_row(self.cursor.cy, b"");
        }
        self.doc.insert_char(self.cursor.cy, self.cursor.cx, c);
        self.cursor.cx += 1;
    }

    /// Breaks the current row at the cursor, or inserts an empty row above it when
    /// the cursor is at the start of the row.
    pub fn insert_line(&mut self) {
        if self.cursor.cx == 0 {
            self.doc.insert_row(self.cursor.cy, b"");
        } else {
            self.doc.split_row(self.cursor.cy, self.cursor.cx);
        }
        self.cursor.cy += 1;
        self.cursor.cx = 0;
    }

    /// Removes the character left of the cursor.
    ///
    /// At the start of a row, the row is joined to the one above. At the very start of
    /// the document, the first row is removed only if it is empty.
    pub fn remove_left(&mut self) {
        let Cursor { cx, cy, .. } = self.cursor;
        if cy == self.doc.rows() {
            return;
        }
        if cx > 0 {
            self.doc.delete_char(cy, cx - 1);
            self.cursor.cx -= 1;
        } else if cy > 0 {
            if let Some(len) = self.doc.join_row(cy) {
                self.cursor.cy -= 1;
                self.cursor.cx = len;
            }
        } else if self.doc.row_len(0) == 0 {
            self.doc.delete_row(0);
        }
    }

    /// Removes the character under the cursor, which joins the following row when
    /// the cursor is at the end of a row.
    pub fn remove_right(&mut self) {
        self.move_right();
        self.remove_left();
    }

    /// Writes the document to `path`, which becomes the associated path if
    /// successful.
    ///
    /// The outcome is reported as the status message. A failure leaves the document
    /// and its modified state intact.
    pub fn save(&mut self, path: &str) {
        match io::write_file(path, &self.doc) {
            Ok(n) => {
                info!(path, bytes = n, changes = self.doc.modified(), "saved");
                self.doc.set_clean();
                self.set_echo(&format!("{n} bytes saved on {path}."));
                self.path = Some(path.to_string());
            }
            Err(e) => {
                warn!(path, error = %e, "save failed");
                let text = match e {
                    Error::Io { cause, .. } => format!("Error on save: {cause}"),
                    e => format!("Error on save: {e}"),
                };
                self.set_echo(&text);
            }
        }
    }

    /// Replaces the current search with the matches of `term`, moving the cursor to
    /// the first match if any.
    pub fn search(&mut self, term: &[u8]) {
        self.session = search::search(&self.doc, term);
        if let Some(m) = self.session.current() {
            self.goto_match(m);
        }
    }

    pub fn search_next(&mut self) {
        if let Some(m) = self.session.next() {
            self.goto_match(m);
        }
    }

    pub fn search_prev(&mut self) {
        if let Some(m) = self.session.prev() {
            self.goto_match(m);
        }
    }

    fn goto_match(&mut self, m: Match) {
        self.cursor.cy = m.row;
        self.cursor.cx = m.col;
        self.set_echo(&format!(
            "Match {} of {} at {}:{}",
            self.session.index() + 1,
            self.session.len(),
            m.row + 1,
            m.start + 1
        ));
    }

    /// Returns `true` if the editor may quit, otherwise a warning is shown and the
    /// number of remaining quit requests is decremented.
    pub fn try_quit(&mut self) -> bool {
        if self.doc.is_modified() && self.quit_left > 0 {
            self.set_echo(&format!(
                "The file has unsaved changes, press {} {} more times to force quit.",
                self.quit_key.label(),
                self.quit_left
            ));
            self.quit_left -= 1;
            false
        } else {
            true
        }
    }

    pub fn set_quit_key(&mut self, key: Key) {
        self.quit_key = key;
    }

    /// Restores the number of quit requests needed to discard unsaved changes.
    pub fn reset_quit(&mut self) {
        self.quit_left = self.quit_times;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn editor_of(lines: &[&str]) -> Editor {
        let mut doc = Document::new(4);
        for (i, line) in lines.iter().enumerate() {
            doc.insert_row(i, line.as_bytes());
        }
        doc.set_clean();
        Editor::new(doc, None, Size::new(10, 20), &Settings::default())
    }

    fn lines(editor: &Editor) -> Vec<String> {
        (0..editor.doc.rows())
            .filter_map(|i| editor.doc.row(i))
            .map(|row| String::from_utf8_lossy(row.content()).into_owned())
            .collect()
    }

    fn at(editor: &Editor) -> (usize, usize) {
        (editor.cursor.cy, editor.cursor.cx)
    }

    #[test]
    fn move_horizontally_with_wraparound() {
        let mut editor = editor_of(&["ab", "c"]);
        editor.move_right();
        editor.move_right();
        assert_eq!(at(&editor), (0, 2));
        editor.move_right();
        assert_eq!(at(&editor), (1, 0));
        editor.move_left();
        assert_eq!(at(&editor), (0, 2));
        editor.move_start();
        editor.move_left();
        assert_eq!(at(&editor), (0, 0));
    }

    #[test]
    fn move_vertically_with_clamping() {
        let mut editor = editor_of(&["long line", "ab"]);
        editor.move_end();
        editor.move_down();
        assert_eq!(at(&editor), (1, 2));
        editor.move_down();
        assert_eq!(at(&editor), (2, 0));
        editor.move_down();
        assert_eq!(at(&editor), (2, 0));
        editor.move_up();
        editor.move_up();
        editor.move_up();
        assert_eq!(at(&editor), (0, 0));
    }

    #[test]
    fn move_by_page() {
        let rows = vec!["x"; 30];
        let mut editor = editor_of(&rows);
        editor.move_page_down();
        assert_eq!(at(&editor), (8, 0));
        editor.move_page_down();
        editor.move_page_down();
        editor.move_page_down();
        assert_eq!(at(&editor), (30, 0));
        editor.move_page_up();
        assert_eq!(at(&editor), (22, 0));
    }

    #[test]
    fn insert_past_last_row() {
        let mut editor = editor_of(&[]);
        for c in b"hello" {
            editor.insert_char(*c);
        }
        assert_eq!(lines(&editor), vec!["hello"]);
        assert_eq!(at(&editor), (0, 5));
        assert!(editor.doc.is_modified());
    }

    #[test]
    fn insert_line_splits_or_opens() {
        let mut editor = editor_of(&["abcd"]);
        editor.move_right();
        editor.move_right();
        editor.insert_line();
        assert_eq!(lines(&editor), vec!["ab", "cd"]);
        assert_eq!(at(&editor), (1, 0));
        editor.insert_line();
        assert_eq!(lines(&editor), vec!["ab", "", "cd"]);
        assert_eq!(at(&editor), (2, 0));
    }

    #[test]
    fn remove_left_joins_rows() {
        let mut editor = editor_of(&["foo", "bar"]);
        editor.move_down();
        editor.remove_left();
        assert_eq!(lines(&editor), vec!["foobar"]);
        assert_eq!(at(&editor), (0, 3));
        editor.remove_left();
        assert_eq!(lines(&editor), vec!["fobar"]);
        assert_eq!(at(&editor), (0, 2));
    }

    #[test]
    fn remove_left_at_document_start() {
        let mut editor = editor_of(&["x", "y"]);
        editor.remove_left();
        assert_eq!(lines(&editor), vec!["x", "y"]);

        let mut editor = editor_of(&["", "y"]);
        editor.remove_left();
        assert_eq!(lines(&editor), vec!["y"]);
    }

    #[test]
    fn remove_left_past_last_row_does_nothing() {
        let mut editor = editor_of(&["x"]);
        editor.move_down();
        editor.remove_left();
        assert_eq!(lines(&editor), vec!["x"]);
        assert_eq!(at(&editor), (1, 0));
    }

    #[test]
    fn remove_right_joins_following_row() {
        let mut editor = editor_of(&["ab", "cd"]);
        editor.remove_right();
        assert_eq!(lines(&editor), vec!["b", "cd"]);
        editor.move_end();
        editor.remove_right();
        assert_eq!(lines(&editor), vec!["bcd"]);
        assert_eq!(at(&editor), (0, 1));
    }

    #[test]
    fn search_moves_cursor_past_match() {
        let mut editor = editor_of(&["banana"]);
        editor.search(b"an");
        assert_eq!(at(&editor), (0, 3));
        assert_eq!(editor.echo.text(), Some("Match 1 of 2 at 1:2"));
        editor.search_next();
        assert_eq!(at(&editor), (0, 5));
        editor.search_next();
        assert_eq!(at(&editor), (0, 3));
        editor.search_prev();
        assert_eq!(at(&editor), (0, 5));
    }

    #[test]
    fn search_without_matches_keeps_cursor() {
        let mut editor = editor_of(&["banana", "x"]);
        editor.move_down();
        editor.search(b"xyz");
        assert_eq!(at(&editor), (1, 0));
        editor.search_next();
        editor.search_prev();
        assert_eq!(at(&editor), (1, 0));
    }

    #[test]
    fn scroll_tracks_rendered_column() {
        let mut editor = editor_of(&["\t\t\t\t\t\tx"]);
        editor.move_end();
        editor.scroll();
        assert_eq!(editor.cursor.rx, 25);
        assert_eq!(editor.view.col_off, 6);
        assert!(editor.view.contains(editor.cursor.cy, editor.cursor.rx));
    }

    #[test]
    fn save_marks_document_clean() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt").display().to_string();
        let mut editor = editor_of(&[]);
        for c in b"hello" {
            editor.insert_char(*c);
        }
        editor.save(&path);
        assert_eq!(fs::read(&path).unwrap(), b"hello\n");
        assert!(!editor.doc.is_modified());
        assert_eq!(editor.path(), Some(path.as_str()));
        assert_eq!(
            editor.echo.text(),
            Some(format!("6 bytes saved on {path}.").as_str())
        );
    }

    #[test]
    fn save_failure_keeps_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing/a.txt").display().to_string();
        let mut editor = editor_of(&["x"]);
        editor.insert_char(b'y');
        editor.save(&path);
        assert!(editor.doc.is_modified());
        assert_eq!(editor.path(), None);
        assert!(editor.echo.text().unwrap().starts_with("Error on save: "));
    }

    #[test]
    fn quit_requires_confirmation_when_modified() {
        let mut editor = editor_of(&["x"]);
        assert!(editor.try_quit());

        editor.insert_char(b'y');
        assert!(!editor.try_quit());
        assert_eq!(
            editor.echo.text(),
            Some("The file has unsaved changes, press Ctrl-Q 2 more times to force quit.")
        );
        assert!(!editor.try_quit());
        editor.reset_quit();
        assert!(!editor.try_quit());
        assert!(!editor.try_quit());
        assert!(editor.try_quit());
    }

    #[test]
    fn quit_message_names_quit_key() {
        let mut editor = editor_of(&["x"]);
        editor.insert_char(b'y');
        editor.set_quit_key(Key::Control(24));
        assert!(!editor.try_quit());
        assert_eq!(
            editor.echo.text(),
            Some("The file has unsaved changes, press Ctrl-X 2 more times to force quit.")
        );
    }
}
