//! Document.
//!
//! A document is an ordered sequence of [`Row`]s, one per line of text, where each
//! row carries both its raw *content* and a *rendered* form with tabs expanded. The
//! rendered form is rebuilt synchronously whenever content changes, so it is always
//! consistent by the time any caller reads it.
//!
//! Mutating operations with out-of-range positions are quietly ignored rather than
//! treated as errors. Every mutation that actually takes effect increments the
//! [modification counter](Document::modified).

use crate::coord;
use crate::error::Result;
use std::io::BufRead;

/// A single line of text.
#[derive(Debug)]
pub struct Row {
    /// Raw bytes of the line, excluding the line terminator.
    content: Vec<u8>,

    /// Tab-expanded form of [`content`](Self::content).
    rendered: Vec<u8>,
}

impl Row {
    fn new(content: &[u8], tab_stop: usize) -> Row {
        let mut row = Row {
            content: content.to_vec(),
            rendered: Vec::new(),
        };
        row.update(tab_stop);
        row
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn rendered(&self) -> &[u8] {
        &self.rendered
    }

    /// Returns the number of logical columns in this row.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    fn update(&mut self, tab_stop: usize) {
        self.rendered = coord::expand(&self.content, tab_stop);
    }
}

#[derive(Debug)]
pub struct Document {
    rows: Vec<Row>,
    modified: usize,
    tab_stop: usize,
}

impl Document {
    /// Creates an empty document whose rows are rendered using `tab_stop`.
    pub fn new(tab_stop: usize) -> Document {
        Document {
            rows: Vec::new(),
            modified: 0,
            tab_stop,
        }
    }

    /// Creates a document by reading lines from `reader`.
    ///
    /// Each line becomes a row with all trailing `\n` and `\r` bytes stripped. The
    /// resulting document is considered unmodified.
    pub fn read<R: BufRead>(reader: &mut R, tab_stop: usize) -> Result<Document> {
        let mut doc = Document::new(tab_stop);
        let mut line = Vec::new();
        while reader.read_until(b'\n', &mut line)? > 0 {
            while let Some(b'\n' | b'\r') = line.last() {
                line.pop();
            }
            doc.rows.push(Row::new(&line, tab_stop));
            line.clear();
        }
        Ok(doc)
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    /// Returns the length of the row at `at`, or `0` if no such row exists.
    pub fn row_len(&self, at: usize) -> usize {
        self.rows.get(at).map(|row| row.len()).unwrap_or(0)
    }

    /// Returns the number of changes since the document was loaded or last saved,
    /// where `0` means the document is clean.
    pub fn modified(&self) -> usize {
        self.modified
    }

    pub fn is_modified(&self) -> bool {
        self.modified > 0
    }

    /// Marks the document as clean, normally after a successful save.
    pub fn set_clean(&mut self) {
        self.modified = 0;
    }

    /// Inserts a new row containing `text` at `at`, where `at` may equal the number
    /// of rows to append.
    pub fn insert_row(&mut self, at: usize, text: &[u8]) {
        if at <= self.rows.len() {
            self.rows.insert(at, Row::new(text, self.tab_stop));
            self.modified += 1;
        }
    }

    pub fn delete_row(&mut self, at: usize) {
        if at < self.rows.len() {
            self.rows.remove(at);
            self.modified += 1;
        }
    }

    /// Inserts `c` into the row at `row` before column `at`.
    ///
    /// A column beyond the end of the row is treated as the end of the row.
    pub fn insert_char(&mut self, row: usize, at: usize, c: u8) {
        let tab_stop = self.tab_stop;
        if let Some(r) = self.rows.get_mut(row) {
            let at = at.min(r.content.len());
            r.content.insert(at, c);
            r.update(tab_stop);
            self.modified += 1;
        }
    }

    /// Removes the character at column `at` in the row at `row`.
    pub fn delete_char(&mut self, row: usize, at: usize) {
        let tab_stop = self.tab_stop;
        if let Some(r) = self.rows.get_mut(row) {
            if at < r.content.len() {
                r.content.remove(at);
                r.update(tab_stop);
                self.modified += 1;
            }
        }
    }

    /// Inserts `s` into the row at `row` before column `at`.
    pub fn insert_str(&mut self, row: usize, at: usize, s: &[u8]) {
        let tab_stop = self.tab_stop;
        if let Some(r) = self.rows.get_mut(row) {
            if at <= r.content.len() {
                r.content.splice(at..at, s.iter().copied());
                r.update(tab_stop);
                self.modified += 1;
            }
        }
    }

    /// Splits the row at `row` such that everything from column `at` onward moves to
    /// a new row immediately below.
    pub fn split_row(&mut self, row: usize, at: usize) {
        let tab_stop = self.tab_stop;
        if let Some(r) = self.rows.get_mut(row) {
            let at = at.min(r.content.len());
            let tail = r.content.split_off(at);
            r.update(tab_stop);
            self.insert_row(row + 1, &tail);
        }
    }

    /// Appends the content of the row at `row` to the end of the preceding row, then
    /// deletes the row at `row`.
    ///
    /// Returns the length of the preceding row prior to joining, which is where the
    /// joined content begins, or `None` if `row` is either `0` or out of range.
    pub fn join_row(&mut self, row: usize) -> Option<usize> {
        if row > 0 && row < self.rows.len() {
            let prev_len = self.rows[row - 1].len();
            let content = std::mem::take(&mut self.rows[row].content);
            self.insert_str(row - 1, prev_len, &content);
            self.delete_row(row);
            Some(prev_len)
        } else {
            None
        }
    }

    /// Returns the rendered column corresponding to the logical column `cx` in the
    /// row at `row`, or `0` if no such row exists.
    pub fn cx_to_rx(&self, row: usize, cx: usize) -> usize {
        self.row(row)
            .map(|r| coord::cx_to_rx(r.content(), cx, self.tab_stop))
            .unwrap_or(0)
    }

    /// Returns the logical column corresponding to the rendered column `rx` in the
    /// row at `row`, or `0` if no such row exists.
    pub fn rx_to_cx(&self, row: usize, rx: usize) -> usize {
        self.row(row)
            .map(|r| coord::rx_to_cx(r.content(), rx, self.tab_stop))
            .unwrap_or(0)
    }

    /// Returns the content of every row, each followed by a single `\n`.
    pub fn to_flat_text(&self) -> Vec<u8> {
        let size = self.rows.iter().map(|row| row.len() + 1).sum();
        self.rows
            .iter()
            .fold(Vec::with_capacity(size), |mut text, row| {
                text.extend_from_slice(row.content());
                text.push(b'\n');
                text
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TAB_STOP: usize = 4;

    fn doc_of(lines: &[&str]) -> Document {
        let mut doc = Document::new(TAB_STOP);
        for (i, line) in lines.iter().enumerate() {
            doc.insert_row(i, line.as_bytes());
        }
        doc.set_clean();
        doc
    }

    fn content(doc: &Document, row: usize) -> &[u8] {
        doc.row(row).unwrap().content()
    }

    #[test]
    fn insert_and_delete_rows() {
        let mut doc = Document::new(TAB_STOP);
        doc.insert_row(0, b"second");
        doc.insert_row(0, b"first");
        doc.insert_row(2, b"third");
        assert_eq!(doc.rows(), 3);
        assert_eq!(content(&doc, 0), b"first");
        assert_eq!(content(&doc, 2), b"third");
        assert_eq!(doc.modified(), 3);

        doc.delete_row(1);
        assert_eq!(doc.rows(), 2);
        assert_eq!(content(&doc, 1), b"third");
        assert_eq!(doc.modified(), 4);
    }

    #[test]
    fn out_of_range_rows_ignored() {
        let mut doc = doc_of(&["only"]);
        doc.insert_row(5, b"nope");
        doc.delete_row(1);
        doc.insert_char(3, 0, b'x');
        doc.delete_char(0, 4);
        doc.insert_str(0, 9, b"nope");
        assert_eq!(doc.rows(), 1);
        assert_eq!(content(&doc, 0), b"only");
        assert!(!doc.is_modified());
    }

    #[test]
    fn insert_char_updates_render() {
        let mut doc = doc_of(&["ab"]);
        doc.insert_char(0, 1, b'\t');
        let row = doc.row(0).unwrap();
        assert_eq!(row.content(), b"a\tb");
        assert_eq!(row.rendered(), b"a   b");
        assert_eq!(doc.modified(), 1);
    }

    #[test]
    fn insert_char_beyond_end_appends() {
        let mut doc = doc_of(&["ab"]);
        doc.insert_char(0, 10, b'c');
        assert_eq!(content(&doc, 0), b"abc");
    }

    #[test]
    fn tab_at_start_renders_one_stop() {
        let mut doc = doc_of(&[""]);
        doc.insert_char(0, 0, b'\t');
        assert_eq!(doc.row(0).unwrap().rendered().len(), TAB_STOP);
        assert_eq!(doc.cx_to_rx(0, 1), TAB_STOP);
    }

    #[test]
    fn insert_then_delete_restores_row() {
        let mut doc = doc_of(&["a\tbc\td"]);
        let before = doc.row(0).map(|r| (r.content().to_vec(), r.rendered().to_vec()));
        for at in 0..=doc.row_len(0) {
            for c in [b'x', b'\t'] {
                doc.insert_char(0, at, c);
                doc.delete_char(0, at);
                let after = doc.row(0).map(|r| (r.content().to_vec(), r.rendered().to_vec()));
                assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn insert_str_into_row() {
        let mut doc = doc_of(&["hello world"]);
        doc.insert_str(0, 5, b",\tbig");
        let row = doc.row(0).unwrap();
        assert_eq!(row.content(), b"hello,\tbig world");
        assert_eq!(row.rendered(), b"hello,  big world");
    }

    #[test]
    fn split_row_moves_tail() {
        let mut doc = doc_of(&["foobar", "baz"]);
        doc.split_row(0, 3);
        assert_eq!(doc.rows(), 3);
        assert_eq!(content(&doc, 0), b"foo");
        assert_eq!(content(&doc, 1), b"bar");
        assert_eq!(content(&doc, 2), b"baz");
        assert_eq!(doc.row(0).unwrap().rendered(), b"foo");
    }

    #[test]
    fn join_row_merges_into_previous() {
        let mut doc = doc_of(&["foo", "bar"]);
        assert_eq!(doc.join_row(1), Some(3));
        assert_eq!(doc.rows(), 1);
        assert_eq!(content(&doc, 0), b"foobar");
        assert_eq!(doc.row(0).unwrap().rendered(), b"foobar");

        assert_eq!(doc.join_row(0), None);
        assert_eq!(doc.join_row(1), None);
    }

    #[test]
    fn empty_first_row_merges_away() {
        let mut doc = doc_of(&["foo", "bar"]);
        for _ in 0..3 {
            doc.delete_char(0, 0);
        }
        assert_eq!(doc.join_row(1), Some(0));
        assert_eq!(doc.rows(), 1);
        assert_eq!(content(&doc, 0), b"bar");
    }

    #[test]
    fn flat_text_terminates_every_row() {
        assert_eq!(doc_of(&[]).to_flat_text(), b"");
        assert_eq!(doc_of(&["hello"]).to_flat_text(), b"hello\n");
        assert_eq!(doc_of(&["a", "", "b\tc"]).to_flat_text(), b"a\n\nb\tc\n");
    }

    #[test]
    fn read_strips_line_endings() {
        let mut reader = Cursor::new(b"one\r\ntwo\n\nthree".to_vec());
        let doc = Document::read(&mut reader, TAB_STOP).unwrap();
        assert_eq!(doc.rows(), 4);
        assert_eq!(content(&doc, 0), b"one");
        assert_eq!(content(&doc, 1), b"two");
        assert_eq!(content(&doc, 2), b"");
        assert_eq!(content(&doc, 3), b"three");
        assert!(!doc.is_modified());
    }

    #[test]
    fn read_then_write_round_trip() {
        const TEXT: &[u8] = b"fn main() {\n\tprintln!(\"hi\");\n}\n\n// end\n";

        let doc = Document::read(&mut Cursor::new(TEXT.to_vec()), TAB_STOP).unwrap();
        assert_eq!(doc.to_flat_text(), TEXT);
    }
}
