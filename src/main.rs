//! The *tilde* text editor.
//!
//! Copyright 2026 The tilde authors
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! you may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//! <https://www.apache.org/licenses/LICENSE-2.0>
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.
mod ansi;
mod bind;
mod config;
mod control;
mod coord;
mod document;
mod echo;
mod editor;
mod error;
mod help;
mod input;
mod io;
mod key;
mod log;
mod op;
mod opt;
mod render;
mod search;
mod size;
mod sys;
mod term;
mod user;
mod writer;

use crate::config::{Configuration, Settings};
use crate::control::Controller;
use crate::document::Document;
use crate::editor::Editor;
use crate::error::Result;
use crate::key::Keyboard;
use crate::opt::Options;
use crate::render::Renderer;
use crate::writer::Writer;
use std::io::Write;
use std::ops::Drop;
use std::process::ExitCode;
use tracing::info;

/// Usage documentation for display to terminal.
const USAGE: &str = include_str!("include/usage.in");

// Version and build information.
const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");
const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");
const BUILD_HASH: &str = env!("BUILD_HASH");
const BUILD_DATE: &str = env!("BUILD_DATE");

/// Used for restoring the terminal via [`Drop`] to its original state.
struct RestoreTerminal;

impl Drop for RestoreTerminal {
    fn drop(&mut self) {
        term::restore().unwrap_or_else(|e| eprintln!("error restoring terminal: {e}"));
    }
}

fn main() -> ExitCode {
    match run() {
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(1)
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn run() -> Result<()> {
    let opts = Options::parse(std::env::args().skip(1))?;
    if opts.help {
        println!("{USAGE}");
        Ok(())
    } else if opts.version {
        println!("{PACKAGE_NAME} {PACKAGE_VERSION} ({BUILD_HASH} {BUILD_DATE})");
        Ok(())
    } else if opts.keys {
        print!("{}", help::keys_content());
        Ok(())
    } else if opts.ops {
        print!("{}", help::ops_content());
        Ok(())
    } else {
        run_opts(&opts)
    }
}

fn run_opts(opts: &Options) -> Result<()> {
    // Load optional configuration from either standard location or path specified on
    // command line, and apply command line options afterwards since these override
    // all other settings.
    let mut config = if let Some(ref config_path) = opts.config_path {
        Configuration::load_file(config_path)?
    } else {
        Configuration::load()?
    };
    config.apply_opts(opts);

    if opts.bindings {
        print!("{}", help::bindings_content(config.bindings.bindings()));
        Ok(())
    } else {
        if let Some(ref log_path) = config.settings.log {
            log::init(log_path)?;
        }
        run_config(opts, config).inspect_err(|_| reset_term(&mut std::io::stdout()))
    }
}

fn run_config(opts: &Options, config: Configuration) -> Result<()> {
    // Puts terminal into raw mode prior to running main controller loop, but also
    // ensures terminal settings are restored upon exit.
    term::init()?;
    let _restore = RestoreTerminal;

    let Configuration { settings, bindings } = config;
    let size = term::size()?;
    info!(%size, "terminal");

    let doc = load_doc(opts, &settings)?;
    let editor = Editor::new(doc, opts.file.clone(), size, &settings);
    let banner = format!("{PACKAGE_NAME} editor -- version {PACKAGE_VERSION}");
    let mut controller = Controller::new(
        Keyboard::new(),
        std::io::stdout(),
        bindings,
        Renderer::new(&banner),
        editor,
    );
    controller.run()
}

/// Loads the file named on the command line, or returns an empty document if none was
/// given.
fn load_doc(opts: &Options, settings: &Settings) -> Result<Document> {
    if let Some(ref path) = opts.file {
        let doc = io::read_file(path, settings.tab_stop)?;
        info!(path = %path, rows = doc.rows(), "loaded");
        Ok(doc)
    } else {
        Ok(Document::new(settings.tab_stop))
    }
}

/// Clears the screen and homes the cursor, which precedes reporting a fatal error once
/// the terminal is in use.
fn reset_term<W: Write>(out: &mut W) {
    let _ = Writer::new().clear_screen().home_cursor().send(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn missing_file_clears_screen() {
        let dir = tempfile::tempdir().unwrap();
        let opts = Options {
            file: Some(dir.path().join("missing.txt").display().to_string()),
            ..Default::default()
        };
        let mut out = Vec::new();
        let result = load_doc(&opts, &Settings::default()).inspect_err(|_| reset_term(&mut out));
        assert!(matches!(result, Err(Error::Io { .. })));
        assert_eq!(out, b"\x1b[2J\x1b[H");
    }

    #[test]
    fn load_existing_or_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "one\ntwo\n").unwrap();
        let opts = Options {
            file: Some(path.display().to_string()),
            ..Default::default()
        };
        assert_eq!(load_doc(&opts, &Settings::default()).unwrap().rows(), 2);
        assert_eq!(load_doc(&Options::default(), &Settings::default()).unwrap().rows(), 0);
    }
}
