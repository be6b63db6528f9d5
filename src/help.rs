//! A collection of functions related to help.

#![allow(unused_must_use, reason = "infallible calls to write!()")]

use crate::bind::BindMap;
use crate::key::KEY_MAPPINGS;
use crate::op::OP_MAPPINGS;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Returns a formatted list of available keys.
pub fn keys_content() -> String {
    let mut out = String::new();
    for (key_name, _) in KEY_MAPPINGS {
        writeln!(out, "{key_name}");
    }
    out
}

/// Returns a formatted list of available editing operations and their descriptions.
pub fn ops_content() -> String {
    let ops = prepare_ops();
    let op_width = ops.keys().map(|op| op.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (op, desc) in ops {
        writeln!(out, "{op:<op_width$}   {desc}");
    }
    out
}

fn prepare_ops() -> BTreeMap<&'static str, &'static str> {
    OP_MAPPINGS
        .iter()
        .map(|(op, _, desc)| (*op, *desc))
        .collect()
}

/// Returns a TOML-formatted list of key bindings.
pub fn bindings_content(bindings: &BindMap) -> String {
    let mut out = String::new();
    writeln!(out, "[bindings]");
    for (key_name, op) in prepare_bindings(bindings) {
        writeln!(out, "'{key_name}' = '{op}'");
    }
    out
}

fn prepare_bindings(bindings: &BindMap) -> IndexMap<&'static str, &'static str> {
    // Preserve the order in which keys are defined rather than sorting by name.
    KEY_MAPPINGS
        .iter()
        .filter_map(|(key_name, key)| bindings.get(key).map(|op| (*key_name, *op)))
        .collect()
}
