//! Main controller.
use crate::bind::Bindings;
use crate::editor::Editor;
use crate::error::Result;
use crate::input::{Directive, InputEditor};
use crate::key::{Key, Keyboard};
use crate::op::Action;
use crate::render::Renderer;
use crate::term;
use crate::user::Inquirer;
use crate::writer::Writer;
use std::io::{Read, Stdin, Stdout, Write};
use tracing::{debug, trace};

/// The primary control point for coordinating user interaction and editing operations.
pub struct Controller<R: Read = Stdin, W: Write = Stdout> {
    keyboard: Keyboard<R>,
    out: W,
    bindings: Bindings,
    renderer: Renderer,
    editor: Editor,
}

impl<R: Read, W: Write> Controller<R, W> {
    /// Message shown when the controller starts.
    const HELP: &'static str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

    pub fn new(
        keyboard: Keyboard<R>,
        out: W,
        bindings: Bindings,
        renderer: Renderer,
        editor: Editor,
    ) -> Controller<R, W> {
        Controller {
            keyboard,
            out,
            bindings,
            renderer,
            editor,
        }
    }

    /// Runs the main processing loop.
    ///
    /// This loop orchestrates the entire editing experience, reading [keys](Key) and
    /// calling their corresponding editing functions until instructed to quit, at
    /// which point the screen is cleared.
    pub fn run(&mut self) -> Result<()> {
        self.editor.set_echo(Self::HELP);
        loop {
            self.refresh()?;
            let key = self.read_key()?;
            if self.process_key(key)? {
                break;
            }
        }
        Writer::new()
            .clear_screen()
            .home_cursor()
            .send(&mut self.out)?;
        Ok(())
    }

    /// Dispatches `key`, returning `true` if the controller should quit.
    fn process_key(&mut self, key: Key) -> Result<bool> {
        let mut action = match self.bindings.find(&key) {
            Some((op, op_fn)) => {
                if op == "quit" {
                    self.editor.set_quit_key(key);
                } else {
                    self.editor.reset_quit();
                }
                op_fn(&mut self.editor)
            }
            None => {
                self.editor.reset_quit();
                match key {
                    Key::Char(c) | Key::Control(c) => self.editor.insert_char(c),
                    _ => trace!(%key, "unbound key"),
                }
                None
            }
        };

        // Responding to an inquiry may itself lead to further action.
        loop {
            action = match action {
                Some(Action::Quit) => return Ok(true),
                Some(Action::Inquire(mut inquirer)) => {
                    let value = self.inquire(inquirer.as_ref())?;
                    inquirer.respond(&mut self.editor, value.as_deref())
                }
                None => return Ok(false),
            }
        }
    }

    /// Solicits input from the user on the message line, returning `None` if the
    /// inquiry was cancelled.
    fn inquire(&mut self, inquirer: &dyn Inquirer) -> Result<Option<String>> {
        let mut input = InputEditor::new(&inquirer.prompt(), &inquirer.initial());
        loop {
            self.editor.set_echo(&input.message());
            self.refresh()?;
            let key = self.read_key()?;
            match input.process_key(&key) {
                Directive::Continue => (),
                Directive::Accept => {
                    self.editor.clear_echo();
                    return Ok(Some(input.value()));
                }
                Directive::Cancel => {
                    self.editor.clear_echo();
                    return Ok(None);
                }
            }
        }
    }

    /// Reads the next key, resizing the editor if the terminal size changes while
    /// waiting.
    fn read_key(&mut self) -> Result<Key> {
        loop {
            match self.keyboard.read()? {
                Key::None => {
                    if term::size_changed() {
                        let size = term::size()?;
                        debug!(%size, "terminal resized");
                        self.editor.resize(size);
                        self.refresh()?;
                    }
                }
                key => return Ok(key),
            }
        }
    }

    /// Draws a complete frame reflecting the current state of the editor.
    fn refresh(&mut self) -> Result<()> {
        self.editor.scroll();
        let editor = &self.editor;
        self.renderer
            .render(
                editor.doc(),
                editor.view(),
                editor.cursor(),
                &editor.status(),
            )
            .send(&mut self.out)?;
        Ok(())
    }
}
