//=====================================================
// File: stdlib/mod.rs
//=====================================================
// Author: Taylan Contributors
// License: MIT
// Goal: Fixed registry of Taylan standard-library builtin modules
// Objective: Resolve stdlib import names to host callables exposed under
//            normalized names, and share the argument helpers they use
//=====================================================

mod tasync;
mod tcore;
mod tdate;
mod tgame;
mod thttp;
mod timg;
mod tlog;
mod tmath;

use std::collections::HashMap;

use crate::interpreter::{RuntimeError, Value};
use crate::tokenizer::normalize_name;

pub type BuiltinFn = fn(&[Value]) -> Result<Value, RuntimeError>;

/// Dynamic registry of host callables. Populated exclusively by imports; all
/// names are stored normalized so lookup is accent-insensitive.
#[derive(Default)]
pub struct Builtins {
    table: HashMap<String, BuiltinFn>,
}

impl Builtins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, func: BuiltinFn) {
        self.table.insert(normalize_name(name), func);
    }

    /// `name` must already be normalized by the caller.
    pub fn lookup(&self, name: &str) -> Option<BuiltinFn> {
        self.table.get(name).copied()
    }

    pub fn names(&self) -> Vec<String> {
        self.table.keys().cloned().collect()
    }
}

/// The fixed set of importable stdlib modules. The remaining modules of the
/// original distribution need list/map values the core value model does not
/// carry; they resolve through the package registry like any other module.
pub fn is_stdlib_module(name: &str) -> bool {
    matches!(
        name,
        "tmath" | "tcore" | "tdate" | "tasync" | "tlog" | "thttp" | "tgame" | "timg"
    )
}

/// Installs every export of `name` into the builtin table. Returns false if
/// `name` is not a stdlib module.
pub fn install(name: &str, builtins: &mut Builtins) -> bool {
    match name {
        "tmath" => tmath::install(builtins),
        "tcore" => tcore::install(builtins),
        "tdate" => tdate::install(builtins),
        "tasync" => tasync::install(builtins),
        "tlog" => tlog::install(builtins),
        "thttp" => thttp::install(builtins),
        "tgame" => tgame::install(builtins),
        "timg" => timg::install(builtins),
        _ => return false,
    }
    true
}

//=====================================================
//            Section: Argument Helpers
//=====================================================

pub(crate) fn expect_arity(
    name: &str,
    args: &[Value],
    expected: usize,
) -> Result<(), RuntimeError> {
    if args.len() != expected {
        return Err(RuntimeError::ArityMismatch {
            name: name.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn num_arg(name: &str, args: &[Value], index: usize) -> Result<f64, RuntimeError> {
    args.get(index)
        .and_then(Value::as_number)
        .ok_or_else(|| RuntimeError::ArgumentError {
            name: name.to_string(),
            message: format!("{}. parametre sayi olmali", index + 1),
        })
}

pub(crate) fn int_arg(name: &str, args: &[Value], index: usize) -> Result<i64, RuntimeError> {
    Ok(num_arg(name, args, index)? as i64)
}

pub(crate) fn str_arg<'a>(
    name: &str,
    args: &'a [Value],
    index: usize,
) -> Result<&'a str, RuntimeError> {
    match args.get(index) {
        Some(Value::Str(s)) => Ok(s),
        _ => Err(RuntimeError::ArgumentError {
            name: name.to_string(),
            message: format!("{}. parametre metin olmali", index + 1),
        }),
    }
}

pub(crate) fn io_error(error: std::io::Error) -> RuntimeError {
    RuntimeError::IoError(error.to_string())
}
