//! An editor for soliciting input.
//!
//! The input editor captures a single line of text from the user, such as a file
//! name or a search term. It owns no part of the screen itself: the controller
//! shows the prompt and the input collected so far as the status message.

use crate::key::{self, Key};

pub struct InputEditor {
    /// Prompt shown to the user, where `{}` is replaced with the input.
    prompt: String,

    /// The input buffer.
    input: Vec<u8>,
}

pub enum Directive {
    Continue,
    Accept,
    Cancel,
}

impl InputEditor {
    /// Creates an input editor with `prompt` and an initial `value`.
    pub fn new(prompt: &str, value: &str) -> InputEditor {
        InputEditor {
            prompt: prompt.to_string(),
            input: value.as_bytes().to_vec(),
        }
    }

    /// Returns the contents of the input buffer.
    pub fn value(&self) -> String {
        String::from_utf8_lossy(&self.input).into_owned()
    }

    /// Returns the prompt with the current input substituted.
    pub fn message(&self) -> String {
        self.prompt.replacen("{}", &self.value(), 1)
    }

    pub fn process_key(&mut self, key: &Key) -> Directive {
        match *key {
            Key::Char(b) if b.is_ascii() => {
                self.input.push(b);
            }
            Key::Backspace | Key::Delete | Key::Control(8) => {
                // Delete last character.
                self.input.pop();
            }
            key::ENTER => {
                // Empty input cannot be accepted.
                if self.input.len() > 0 {
                    return Directive::Accept;
                }
            }
            key::ESC => {
                return Directive::Cancel;
            }
            _ => (),
        }
        Directive::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(editor: &mut InputEditor, keys: &[Key]) -> Vec<bool> {
        keys.iter()
            .map(|key| matches!(editor.process_key(key), Directive::Continue))
            .collect()
    }

    #[test]
    fn collect_printable_input() {
        let mut editor = InputEditor::new("Search: {}", "");
        feed(
            &mut editor,
            &[Key::Char(b'a'), Key::Control(1), Key::Char(0xe9), Key::Char(b'b')],
        );
        assert_eq!(editor.value(), "ab");
        assert_eq!(editor.message(), "Search: ab");
    }

    #[test]
    fn remove_last_character() {
        let mut editor = InputEditor::new("Save as: {} (Esc to cancel)", "ab");
        feed(&mut editor, &[Key::Backspace, Key::Delete, Key::Backspace]);
        assert_eq!(editor.value(), "");
        assert_eq!(editor.message(), "Save as:  (Esc to cancel)");
    }

    #[test]
    fn accept_only_nonempty_input() {
        let mut editor = InputEditor::new("{}", "");
        assert!(matches!(editor.process_key(&key::ENTER), Directive::Continue));
        editor.process_key(&Key::Char(b'x'));
        assert!(matches!(editor.process_key(&key::ENTER), Directive::Accept));
    }

    #[test]
    fn cancel_on_escape() {
        let mut editor = InputEditor::new("{}", "keep");
        assert!(matches!(editor.process_key(&key::ESC), Directive::Cancel));
    }
}
