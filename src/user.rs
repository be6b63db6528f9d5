//! Prompts on the message line.
use crate::editor::Editor;
use crate::op::Action;

/// An operation that needs a line of input before it can finish, such as naming
/// the file to save.
pub trait Inquirer {
    /// Template for the message line, where `{}` is replaced by the input so far.
    fn prompt(&self) -> String;

    /// Text the input starts with.
    fn initial(&self) -> String {
        String::new()
    }

    /// Completes the operation with the accepted input, or `None` if the user
    /// pressed `ESC`. The returned action, if any, is carried out next.
    fn respond(&mut self, editor: &mut Editor, value: Option<&str>) -> Option<Action>;
}
