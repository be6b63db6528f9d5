//! Key bindings.
use crate::error::{Error, Result};
use crate::key::{KEY_MAPPINGS, Key};
use crate::op::{self, OpFn, OpMap};
use std::collections::HashMap;

/// Map of [`Key`]s to editing operations.
pub type BindMap = HashMap<Key, &'static str>;

/// A mapping of [`Key`]s to editing functions.
pub struct Bindings {
    op_map: OpMap,
    bind_map: BindMap,
}

impl Bindings {
    /// Creates the default key bindings.
    pub fn new() -> Bindings {
        let mut this = Bindings {
            op_map: op::init_op_map(),
            bind_map: BindMap::new(),
        };

        for (key, op) in Self::DEFAULT_BINDINGS {
            this.bind(key, op).unwrap_or_else(|e| panic!("{e}"));
        }
        this
    }

    /// Binds the key named `key` to the editing operation `op`.
    ///
    /// A successful bind will override an existing binding of the same key.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if either of `key` or `op` do not match the name of known
    /// keys or editing operations, respectively.
    pub fn bind(&mut self, key: &str, op: &str) -> Result<()> {
        let key = to_key(key)?;
        let (op, _) = self
            .op_map
            .get_key_value(op)
            .ok_or_else(|| Error::invalid_op(op))?;
        self.bind_map.insert(key, *op);
        Ok(())
    }

    /// Returns the name and function of the operation bound to `key`, otherwise
    /// `None`.
    pub fn find(&self, key: &Key) -> Option<(&'static str, OpFn)> {
        self.bind_map
            .get(key)
            .and_then(|op| self.op_map.get(op).map(|op_fn| (*op, *op_fn)))
    }

    pub fn bindings(&self) -> &BindMap {
        &self.bind_map
    }

    /// Default mapping of keys to editing operations.
    const DEFAULT_BINDINGS: [(&'static str, &'static str); 19] = [
        // --- exit and cancellation ---
        ("ctrl-q", "quit"),
        ("ctrl-l", "redraw"),
        ("esc", "ignore"),
        // --- navigation ---
        ("left", "move-left"),
        ("right", "move-right"),
        ("up", "move-up"),
        ("down", "move-down"),
        ("page-up", "move-page-up"),
        ("page-down", "move-page-down"),
        ("home", "move-start"),
        ("end", "move-end"),
        // --- insertion and removal ---
        ("enter", "insert-line"),
        ("backspace", "remove-left"),
        ("ctrl-h", "remove-left"),
        ("delete", "remove-right"),
        // --- file handling ---
        ("ctrl-s", "save-file"),
        // --- search ---
        ("ctrl-f", "search"),
        ("ctrl-n", "search-next"),
        ("ctrl-p", "search-prev"),
    ];
}

/// Converts the key name `name` to a [`Key`].
fn to_key(name: &str) -> Result<Key> {
    KEY_MAPPINGS
        .iter()
        .find(|(key_name, _)| *key_name == name)
        .map(|(_, key)| *key)
        .ok_or_else(|| Error::invalid_key(name))
}
