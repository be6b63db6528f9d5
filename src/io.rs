//! I/O operations with documents.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::sys::AsString;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

// Suggested capacity of internal buffer for readers.
const BUFFER_SIZE: usize = 65_536;

// Permissions given to newly created files, subject to umask.
const FILE_MODE: u32 = 0o644;

/// Reads the file at `path` into a new document.
pub fn read_file<P>(path: P, tab_stop: usize) -> Result<Document>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(&path.as_string(), e))?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    Document::read(&mut reader, tab_stop)
}

/// Writes the contents of `doc` to the file at `path`, returning the number of bytes
/// written.
///
/// The file is created if necessary, truncated to the exact length of the flattened
/// document and then written in a single call. A failure at any step leaves `doc`
/// untouched.
pub fn write_file<P>(path: P, doc: &Document) -> Result<usize>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let to_err = |e: io::Error| Error::io(&path.as_string(), e);

    let text = doc.to_flat_text();
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .mode(FILE_MODE)
        .open(path)
        .map_err(to_err)?;
    file.set_len(text.len() as u64).map_err(to_err)?;
    file.write_all(&text).map_err(to_err)?;
    Ok(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn load_then_save_round_trip() {
        const TEXT: &str = "first line\n\tindented\n\nlast\n";

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("round.txt");
        fs::write(&path, TEXT).unwrap();

        let doc = read_file(&path, 4).unwrap();
        assert_eq!(doc.rows(), 4);
        assert!(!doc.is_modified());

        let out = dir.path().join("out.txt");
        let n = write_file(&out, &doc).unwrap();
        assert_eq!(n, TEXT.len());
        assert_eq!(fs::read_to_string(&out).unwrap(), TEXT);
    }

    #[test]
    fn save_truncates_longer_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.txt");
        fs::write(&path, "this content is much longer than the new one\n").unwrap();

        let mut doc = Document::new(4);
        doc.insert_row(0, b"hello");
        let n = write_file(&path, &doc).unwrap();
        assert_eq!(n, 6);
        assert_eq!(fs::read(&path).unwrap(), b"hello\n");
    }

    #[test]
    fn open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        match read_file(&path, 4) {
            Err(Error::Io { path: p, .. }) => assert!(p.ends_with("missing.txt")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn save_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir.txt");
        let doc = Document::new(4);
        assert!(write_file(&path, &doc).is_err());
    }
}
