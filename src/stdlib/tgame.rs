//==============================================
// File: stdlib/tgame.rs
//==============================================
// Goal: tgame builtin module
// Objective: Terminal drawing helpers
//==============================================

use crate::interpreter::{RuntimeError, Value};

use super::{expect_arity, int_arg, Builtins};

pub(super) fn install(builtins: &mut Builtins) {
    builtins.register("ekran_yaz", ekran_yaz);
    builtins.register("kutu", kutu);
}

fn ekran_yaz(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("ekran_yaz", args, 1)?;
    println!("{}", args[0]);
    Ok(Value::Str("ok".into()))
}

/// ASCII box of the given dimensions; degenerate sizes yield the empty string.
fn kutu(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("kutu", args, 2)?;
    let w = int_arg("kutu", args, 0)?;
    let h = int_arg("kutu", args, 1)?;
    if w < 2 || h < 2 {
        return Ok(Value::Str(String::new()));
    }
    let inner = (w - 2) as usize;
    let top = format!("+{}+", "-".repeat(inner));
    let mid = format!("|{}|", " ".repeat(inner));
    let mut lines = vec![top.clone()];
    for _ in 0..(h - 2) {
        lines.push(mid.clone());
    }
    lines.push(top);
    Ok(Value::Str(lines.join("\n")))
}
