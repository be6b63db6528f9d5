//! Errors reported by the editor, all of which are fatal except those arising from
//! saving a document.

use std::error;
use std::fmt::{self, Display, Formatter};
use std::io;
use toml::de;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A system call failed, such as switching the terminal into raw mode.
    Os { cause: io::Error },

    /// Reading or writing the file at `path` failed.
    Io { path: String, cause: io::Error },

    /// The terminal replied to a size probe with something other than a cursor
    /// position report.
    TermSize { reply: Vec<u8> },

    /// An unexpected command-line argument `arg`.
    UnexpectedArg { arg: String },

    /// A value is expected for a command-line argument `arg`.
    ExpectedValue { arg: String },

    /// A `value` given for a command-line argument `arg` is not valid.
    InvalidValue { arg: String, value: String },

    /// A `key` name given in a key binding is not valid.
    InvalidKey { key: String },

    /// An operation `op` given in a key binding is not valid.
    InvalidOp { op: String },

    /// An error occurred while parsing a configuration file referenced by `path`.
    Configuration { path: String, cause: String },
}

impl error::Error for Error {}

impl Error {
    pub fn os() -> Error {
        Error::Os {
            cause: io::Error::last_os_error(),
        }
    }

    pub fn os_cloning(e: &io::Error) -> Error {
        Error::Os {
            cause: io::Error::new(e.kind(), e.to_string()),
        }
    }

    pub fn io(path: &str, cause: io::Error) -> Error {
        Error::Io {
            path: path.to_string(),
            cause,
        }
    }

    pub fn term_size(reply: &[u8]) -> Error {
        Error::TermSize {
            reply: reply.to_vec(),
        }
    }

    pub fn unexpected_arg(arg: &str) -> Error {
        Error::UnexpectedArg {
            arg: arg.to_string(),
        }
    }

    pub fn expected_value(arg: &str) -> Error {
        Error::ExpectedValue {
            arg: arg.to_string(),
        }
    }

    pub fn invalid_value(arg: &str, value: &str) -> Error {
        Error::InvalidValue {
            arg: arg.to_string(),
            value: value.to_string(),
        }
    }

    pub fn invalid_key(key: &str) -> Error {
        Error::InvalidKey {
            key: key.to_string(),
        }
    }

    pub fn invalid_op(op: &str) -> Error {
        Error::InvalidOp { op: op.to_string() }
    }

    pub fn configuration(path: &str, e: &de::Error) -> Error {
        Error::Configuration {
            path: path.to_string(),
            cause: format!("{e}"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Os { cause } => write!(f, "system error: {cause}"),
            Error::Io { path, cause } => write!(f, "{path}: {cause}"),
            Error::TermSize { reply } => {
                write!(f, "unable to determine terminal size from reply {reply:?}")
            }
            Error::UnexpectedArg { arg } => write!(f, "{arg}: unexpected argument"),
            Error::ExpectedValue { arg } => write!(f, "{arg}: missing value"),
            Error::InvalidValue { arg, value } => {
                write!(f, "{arg}: invalid value: {value}")
            }
            Error::InvalidKey { key } => write!(f, "{key}: unknown key"),
            Error::InvalidOp { op } => write!(f, "{op}: unknown operation"),
            Error::Configuration { path, cause } => {
                write!(f, "{path}: configuration error: {cause}")
            }
        }
    }
}

impl From<io::Error> for Error {
    fn from(cause: io::Error) -> Error {
        Error::Os { cause }
    }
}
