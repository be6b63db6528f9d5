//! Contains everything related to configuration.
//!
//! All default values for configurable aspects of the editor are defined in this
//! module, including *settings* and *key bindings*.
//!
//! At a minimum, [`Configuration::default()`] is sufficient for initializing the
//! editor. However, the normal process is to apply an optional external
//! configuration file followed by command-line options, resulting in a final
//! blended configuration.
//!
//! External configuration files are expected to be formatted according to the
//! [TOML specification](https://toml.io).
//!
//! The default method of loading an external configuration file via
//! [`Configuration::load()`] will try to locate files in the following locations in
//! order of precedence:
//!
//! * `$HOME/.tilderc`
//! * `$HOME/.config/tilde/tilderc`

use crate::bind::Bindings;
use crate::coord;
use crate::error::{Error, Result};
use crate::opt::Options;
use crate::sys::{self, AsString};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A configuration representing all aspects of the editing experience.
pub struct Configuration {
    /// A collection of configurable settings that control the behavior and rendering
    /// of the editor.
    pub settings: Settings,

    /// A map of keys to editing operations.
    pub bindings: Bindings,
}

pub struct Settings {
    /// Width of a tab stop, which is always within [`coord::TAB_STOPS`].
    pub tab_stop: usize,

    /// Number of additional quit requests needed to discard unsaved changes.
    pub quit_times: usize,

    /// Number of seconds a status message remains visible.
    pub message_secs: u64,

    /// An optional path of a file to which diagnostics are logged.
    pub log: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ExternalConfiguration {
    settings: Option<ExternalSettings>,
    bindings: Option<HashMap<String, String>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ExternalSettings {
    #[serde(rename = "tab-stop")]
    tab_stop: Option<usize>,

    #[serde(rename = "quit-times")]
    quit_times: Option<usize>,

    #[serde(rename = "message-secs")]
    message_secs: Option<u64>,

    log: Option<String>,
}

impl Settings {
    /// Applies the external settings `ext` on top of `self`.
    fn apply(&mut self, ext: Option<ExternalSettings>) -> Result<()> {
        if let Some(ext) = ext {
            if let Some(tab_stop) = ext.tab_stop {
                if !coord::TAB_STOPS.contains(&tab_stop) {
                    return Err(Error::invalid_value("tab-stop", &tab_stop.to_string()));
                }
                self.tab_stop = tab_stop;
            }
            self.quit_times = ext.quit_times.unwrap_or(self.quit_times);
            self.message_secs = ext.message_secs.unwrap_or(self.message_secs);
            self.log = ext.log.or(self.log.take());
        }
        Ok(())
    }

    /// Applies the relevant settings from `opts` on top of `self`.
    pub fn apply_opts(&mut self, opts: &Options) {
        self.tab_stop = opts.tab_stop.unwrap_or(self.tab_stop);
        self.quit_times = opts.quit_times.unwrap_or(self.quit_times);
        if let Some(ref log_path) = opts.log_path {
            self.log = Some(log_path.clone());
        }
    }
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            tab_stop: 4,
            quit_times: 2,
            message_secs: 7,
            log: None,
        }
    }
}

impl Configuration {
    /// A collection of resource files to try loading in order of precedence.
    const TRY_FILES: [&str; 2] = [".tilderc", ".config/tilde/tilderc"];

    /// Returns a configuration that is formed by attempting to load a resource file
    /// from well-known locations.
    pub fn load() -> Result<Configuration> {
        let mut config = Configuration::default();
        let root_path = sys::home_dir();
        for try_path in Self::TRY_FILES {
            let path = root_path.join(try_path);
            if path.exists() {
                let ext = Self::read_file(&path)?;
                config.apply(ext)?;
                break;
            }
        }
        Ok(config)
    }

    /// Returns a configuration loaded from the resource file at `path`.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Configuration> {
        let mut config = Configuration::default();
        let ext = Self::read_file(path.as_ref())?;
        config.apply(ext)?;
        Ok(config)
    }

    /// Applies the relevant settings from `opts` on top of `self`.
    pub fn apply_opts(&mut self, opts: &Options) {
        self.settings.apply_opts(opts);
    }

    /// Applies the external configuration `ext` on top of `self`.
    fn apply(&mut self, ext: ExternalConfiguration) -> Result<()> {
        self.settings.apply(ext.settings)?;
        if let Some(bindings) = ext.bindings {
            for (key, op) in bindings {
                self.bindings.bind(&key, &op)?;
            }
        }
        Ok(())
    }

    fn read_file(path: &Path) -> Result<ExternalConfiguration> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(&path.as_string(), e))?;
        toml::from_str::<ExternalConfiguration>(&content)
            .map_err(|e| Error::configuration(&path.as_string(), &e))
    }
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration {
            settings: Settings::default(),
            bindings: Bindings::new(),
        }
    }
}
