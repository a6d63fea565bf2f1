//==============================================
// File: stdlib/tdate.rs
//==============================================
// Goal: tdate builtin module
// Objective: Wall-clock date/time strings and the blocking sleep builtin
//==============================================

use std::thread;
use std::time::Duration;

use chrono::Local;

use crate::interpreter::{RuntimeError, Value};

use super::{expect_arity, int_arg, Builtins};

pub(super) fn install(builtins: &mut Builtins) {
    builtins.register("tarih", tarih);
    builtins.register("saat", saat);
    builtins.register("tarih_saat", tarih_saat);
    builtins.register("uyku", uyku);
}

fn tarih(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("tarih", args, 0)?;
    Ok(Value::Str(Local::now().format("%Y-%m-%d").to_string()))
}

fn saat(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("saat", args, 0)?;
    Ok(Value::Str(Local::now().format("%H:%M:%S").to_string()))
}

fn tarih_saat(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("tarih_saat", args, 0)?;
    Ok(Value::Str(
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    ))
}

/// Blocks the interpreter for the given number of milliseconds.
pub(super) fn sleep_ms(name: &str, ms: i64) -> Result<Value, RuntimeError> {
    if ms < 0 {
        return Err(RuntimeError::ArgumentError {
            name: name.to_string(),
            message: "sure negatif olamaz".into(),
        });
    }
    thread::sleep(Duration::from_millis(ms as u64));
    Ok(Value::Str("ok".into()))
}

fn uyku(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("uyku", args, 1)?;
    let ms = int_arg("uyku", args, 0)?;
    sleep_ms("uyku", ms)
}
