//==============================================
// File: stdlib/tmath.rs
//==============================================
// Goal: tmath builtin module
// Objective: Basic arithmetic builtins over the numeric value pair
//==============================================

use crate::ast::BinaryOp;
use crate::interpreter::{apply_binary, RuntimeError, Value};

use super::{expect_arity, num_arg, Builtins};

pub(super) fn install(builtins: &mut Builtins) {
    builtins.register("mat_topla", mat_topla);
    builtins.register("mat_cikar", mat_cikar);
    builtins.register("mat_carp", mat_carp);
    builtins.register("mat_bol", mat_bol);
    builtins.register("mat_us", mat_us);
    builtins.register("mat_kok", mat_kok);
}

/// Checks both operands are numeric, then defers to the evaluator's own
/// operator dispatch so int/float promotion matches the surface language.
fn numeric_binary(name: &str, op: BinaryOp, args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity(name, args, 2)?;
    num_arg(name, args, 0)?;
    num_arg(name, args, 1)?;
    apply_binary(op, args[0].clone(), args[1].clone())
}

fn mat_topla(args: &[Value]) -> Result<Value, RuntimeError> {
    numeric_binary("mat_topla", BinaryOp::Add, args)
}

fn mat_cikar(args: &[Value]) -> Result<Value, RuntimeError> {
    numeric_binary("mat_cikar", BinaryOp::Subtract, args)
}

fn mat_carp(args: &[Value]) -> Result<Value, RuntimeError> {
    numeric_binary("mat_carp", BinaryOp::Multiply, args)
}

fn mat_bol(args: &[Value]) -> Result<Value, RuntimeError> {
    numeric_binary("mat_bol", BinaryOp::Divide, args)
}

fn mat_us(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("mat_us", args, 2)?;
    if let (Value::Int(base), Value::Int(exp)) = (&args[0], &args[1]) {
        if *exp >= 0 {
            if let Ok(exp) = u32::try_from(*exp) {
                if let Some(value) = base.checked_pow(exp) {
                    return Ok(Value::Int(value));
                }
            }
        }
    }
    let base = num_arg("mat_us", args, 0)?;
    let exp = num_arg("mat_us", args, 1)?;
    Ok(Value::Float(base.powf(exp)))
}

fn mat_kok(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("mat_kok", args, 1)?;
    let value = num_arg("mat_kok", args, 0)?;
    if value < 0.0 {
        return Err(RuntimeError::ArgumentError {
            name: "mat_kok".into(),
            message: "negatif sayinin koku alinamaz".into(),
        });
    }
    Ok(Value::Float(value.sqrt()))
}
