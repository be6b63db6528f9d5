//! Editing operations.
//!
//! A collection of functions intended to be associated with canonical names of
//! editing operations. These functions serve as the glue between a [`Key`] and
//! its respective action in the context of the editing experience.
//!
//! See [`Bindings`](crate::bind::Bindings) for further details on binding keys
//! at runtime.
//!
//! [`Key`]: crate::key::Key

use crate::editor::Editor;
use crate::user::Inquirer;
use std::collections::HashMap;

/// A function type that implements an editing operation.
pub type OpFn = fn(&mut Editor) -> Option<Action>;

/// Map of editing operations to functions.
pub type OpMap = HashMap<&'static str, OpFn>;

/// An action returned by an [`OpFn`] that is meant to be carried out by a controller
/// orchestrating calls to such functions.
pub enum Action {
    Quit,
    Inquire(Box<dyn Inquirer>),
}

impl Action {
    pub fn quit() -> Option<Action> {
        Some(Action::Quit)
    }

    pub fn inquire(inquirer: Box<dyn Inquirer>) -> Option<Action> {
        Some(Action::Inquire(inquirer))
    }
}

/// quit
fn quit(editor: &mut Editor) -> Option<Action> {
    if editor.try_quit() {
        Action::quit()
    } else {
        None
    }
}

/// redraw
fn redraw(_: &mut Editor) -> Option<Action> {
    None
}

/// ignore
fn ignore(_: &mut Editor) -> Option<Action> {
    None
}

/// move-left
fn move_left(editor: &mut Editor) -> Option<Action> {
    editor.move_left();
    None
}

/// move-right
fn move_right(editor: &mut Editor) -> Option<Action> {
    editor.move_right();
    None
}

/// move-up
fn move_up(editor: &mut Editor) -> Option<Action> {
    editor.move_up();
    None
}

/// move-down
fn move_down(editor: &mut Editor) -> Option<Action> {
    editor.move_down();
    None
}

/// move-page-up
fn move_page_up(editor: &mut Editor) -> Option<Action> {
    editor.move_page_up();
    None
}

/// move-page-down
fn move_page_down(editor: &mut Editor) -> Option<Action> {
    editor.move_page_down();
    None
}

/// move-start
fn move_start(editor: &mut Editor) -> Option<Action> {
    editor.move_start();
    None
}

/// move-end
fn move_end(editor: &mut Editor) -> Option<Action> {
    editor.move_end();
    None
}

/// insert-line
fn insert_line(editor: &mut Editor) -> Option<Action> {
    editor.insert_line();
    None
}

/// remove-left
fn remove_left(editor: &mut Editor) -> Option<Action> {
    editor.remove_left();
    None
}

/// remove-right
fn remove_right(editor: &mut Editor) -> Option<Action> {
    editor.remove_right();
    None
}

/// save-file
fn save_file(editor: &mut Editor) -> Option<Action> {
    let path = editor.path().unwrap_or("").to_string();
    Action::inquire(Box::new(SaveFile { path }))
}

/// search
fn search(_: &mut Editor) -> Option<Action> {
    Action::inquire(Box::new(Search))
}

/// search-next
fn search_next(editor: &mut Editor) -> Option<Action> {
    editor.search_next();
    None
}

/// search-prev
fn search_prev(editor: &mut Editor) -> Option<Action> {
    editor.search_prev();
    None
}

struct SaveFile {
    path: String,
}

impl Inquirer for SaveFile {
    fn prompt(&self) -> String {
        "Save as: {} (Esc to cancel)".to_string()
    }

    fn initial(&self) -> String {
        self.path.clone()
    }

    fn respond(&mut self, editor: &mut Editor, value: Option<&str>) -> Option<Action> {
        if let Some(path) = value {
            editor.save(path);
        } else {
            editor.set_echo("Save operation cancelled.");
        }
        None
    }
}

struct Search;

impl Inquirer for Search {
    fn prompt(&self) -> String {
        "Search: {}".to_string()
    }

    fn respond(&mut self, editor: &mut Editor, value: Option<&str>) -> Option<Action> {
        if let Some(term) = value {
            editor.search(term.as_bytes());
        }
        None
    }
}

/// Predefined mapping of editing operations to functions, along with a short
/// description of each.
pub const OP_MAPPINGS: [(&str, OpFn, &str); 18] = [
    // --- exit and cancellation ---
    ("quit", quit, "quit the editor, asking again if there are unsaved changes"),
    ("redraw", redraw, "redraw the screen"),
    ("ignore", ignore, "do nothing"),
    // --- navigation ---
    ("move-left", move_left, "move left, wrapping to the end of the previous row"),
    ("move-right", move_right, "move right, wrapping to the start of the next row"),
    ("move-up", move_up, "move up one row"),
    ("move-down", move_down, "move down one row"),
    ("move-page-up", move_page_up, "move up one screen"),
    ("move-page-down", move_page_down, "move down one screen"),
    ("move-start", move_start, "move to the start of the row"),
    ("move-end", move_end, "move to the end of the row"),
    // --- insertion and removal ---
    ("insert-line", insert_line, "break the row at the cursor"),
    ("remove-left", remove_left, "remove the character before the cursor"),
    ("remove-right", remove_right, "remove the character under the cursor"),
    // --- file handling ---
    ("save-file", save_file, "save the document under a name"),
    // --- search ---
    ("search", search, "search for text"),
    ("search-next", search_next, "move to the next match"),
    ("search-prev", search_prev, "move to the previous match"),
];

/// Returns a mapping of canonical editing operation names to functions.
pub fn init_op_map() -> OpMap {
    OP_MAPPINGS
        .iter()
        .map(|(op, op_fn, _)| (*op, *op_fn))
        .collect()
}
