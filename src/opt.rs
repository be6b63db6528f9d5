//! Options parser.

use std::str::FromStr;

use crate::coord;
use crate::error::{Error, Result};

#[derive(Default)]
pub struct Options {
    pub help: bool,
    pub version: bool,
    pub keys: bool,
    pub ops: bool,
    pub bindings: bool,
    pub config_path: Option<String>,
    pub tab_stop: Option<usize>,
    pub quit_times: Option<usize>,
    pub log_path: Option<String>,
    pub file: Option<String>,
}

impl Options {
    pub fn parse<T>(args: T) -> Result<Options>
    where
        T: IntoIterator<Item = String>,
    {
        let mut opts = Options::default();
        let mut it = args.into_iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--help" => opts.help = true,
                "--version" => opts.version = true,
                "--keys" => opts.keys = true,
                "--ops" => opts.ops = true,
                "--bindings" => opts.bindings = true,
                "--config" => opts.config_path = Some(expect_value(&arg, it.next())?),
                "--tab-stop" => opts.tab_stop = Some(parse_tab_stop(&arg, it.next())?),
                "--quit-times" => opts.quit_times = Some(parse_arg(&arg, it.next())?),
                "--log" => opts.log_path = Some(expect_value(&arg, it.next())?),
                arg if arg.starts_with("--") => return Err(Error::unexpected_arg(arg)),
                _ if opts.file.is_some() => return Err(Error::unexpected_arg(&arg)),
                _ => opts.file = Some(arg),
            }
        }
        Ok(opts)
    }
}

fn parse_arg<T>(arg: &str, next_arg: Option<String>) -> Result<T>
where
    T: FromStr,
{
    if let Some(value) = next_arg {
        value
            .parse::<T>()
            .map_err(|_| Error::invalid_value(arg, &value))
    } else {
        Err(Error::expected_value(arg))
    }
}

fn parse_tab_stop(arg: &str, next_arg: Option<String>) -> Result<usize> {
    match parse_arg(arg, next_arg)? {
        n if coord::TAB_STOPS.contains(&n) => Ok(n),
        n => Err(Error::invalid_value(arg, &n.to_string())),
    }
}

fn expect_value(arg: &str, next_arg: Option<String>) -> Result<String> {
    next_arg.ok_or_else(|| Error::expected_value(arg))
}
