//==============================================
// File: stdlib/tlog.rs
//==============================================
// Goal: tlog builtin module
// Objective: Append timestamped log lines to a file
//==============================================

use std::fs::OpenOptions;
use std::io::Write;

use chrono::Local;

use crate::interpreter::{RuntimeError, Value};

use super::{expect_arity, io_error, str_arg, Builtins};

pub(super) fn install(builtins: &mut Builtins) {
    builtins.register("log_yaz", log_yaz);
    builtins.register("log_hata", log_hata);
}

fn stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn append_line(name: &str, args: &[Value], prefix: &str) -> Result<Value, RuntimeError> {
    expect_arity(name, args, 2)?;
    let path = str_arg(name, args, 0)?;
    let message = args[1].to_string();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error)?;
    writeln!(file, "[{}] {prefix}{message}", stamp()).map_err(io_error)?;
    Ok(Value::Str(path.to_string()))
}

fn log_yaz(args: &[Value]) -> Result<Value, RuntimeError> {
    append_line("log_yaz", args, "")
}

fn log_hata(args: &[Value]) -> Result<Value, RuntimeError> {
    append_line("log_hata", args, "HATA: ")
}
