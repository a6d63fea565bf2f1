//==============================================
// File: stdlib/tasync.rs
//==============================================
// Goal: tasync builtin module
// Objective: Blocking wait helpers (the language has no real async surface)
//==============================================

use crate::interpreter::{RuntimeError, Value};

use super::{expect_arity, int_arg, tdate::sleep_ms, Builtins};

pub(super) fn install(builtins: &mut Builtins) {
    builtins.register("bekle", bekle);
    builtins.register("sayac", sayac);
}

fn bekle(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("bekle", args, 1)?;
    let ms = int_arg("bekle", args, 0)?;
    sleep_ms("bekle", ms)
}

/// Ticks `n` times at 100ms, mirroring the original's pacing helper.
fn sayac(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("sayac", args, 1)?;
    let n = int_arg("sayac", args, 0)?;
    for _ in 0..n.max(0) {
        sleep_ms("sayac", 100)?;
    }
    Ok(Value::Str("ok".into()))
}
