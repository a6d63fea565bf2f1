//=====================================================
// File: interpreter/value.rs
//=====================================================
// Author: Taylan Contributors
// License: MIT
// Goal: Taylan runtime value model
// Objective: Dynamic value representation plus the operator dispatch shared
//            by the evaluator and the builtin modules
//=====================================================

use std::fmt;

use crate::ast::{BinaryOp, UnaryOp};

use super::RuntimeError;

/// A dynamically-typed Taylan value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    /// Absence of a value: a function falling off its end, or a print call.
    Unit,
    /// Marker bound into the environment by a successful import.
    Module(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "tamsayi",
            Value::Float(_) => "ondalik",
            Value::Str(_) => "metin",
            Value::Bool(_) => "mantik",
            Value::Unit => "yok",
            Value::Module(_) => "modul",
        }
    }

    /// Zero, the empty string, `yanlis`, and the absent value are falsy.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Int(v) => *v != 0,
            Value::Float(v) => *v != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::Unit => false,
            Value::Module(_) => true,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => f.write_str(s),
            Value::Bool(true) => f.write_str("dogru"),
            Value::Bool(false) => f.write_str("yanlis"),
            Value::Unit => f.write_str("yok"),
            Value::Module(name) => write!(f, "<modul {name}>"),
        }
    }
}

fn type_error(op: &str, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::TypeError(format!(
        "'{op}' operatörü {} ve {} degerlerine uygulanamaz",
        left.type_name(),
        right.type_name()
    ))
}

fn numeric_pair(left: &Value, right: &Value) -> Option<(f64, f64)> {
    Some((left.as_number()?, right.as_number()?))
}

fn both_ints(left: &Value, right: &Value) -> Option<(i64, i64)> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some((*a, *b)),
        _ => None,
    }
}

/// Equality crosses the int/float divide; all other mixed-type pairs compare
/// unequal rather than erroring.
fn values_equal(left: &Value, right: &Value) -> bool {
    if let Some((a, b)) = numeric_pair(left, right) {
        return a == b;
    }
    left == right
}

fn compare(op: BinaryOp, ordering: std::cmp::Ordering) -> bool {
    use std::cmp::Ordering::*;
    match op {
        BinaryOp::Less => ordering == Less,
        BinaryOp::Greater => ordering == Greater,
        BinaryOp::LessEqual => ordering != Greater,
        BinaryOp::GreaterEqual => ordering != Less,
        _ => unreachable!("compare yalnizca siralama operatorleri icin"),
    }
}

pub fn apply_binary(op: BinaryOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match op {
        BinaryOp::Add => match (&left, &right) {
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
            _ => {
                if let Some((a, b)) = both_ints(&left, &right) {
                    return Ok(Value::Int(a.wrapping_add(b)));
                }
                match numeric_pair(&left, &right) {
                    Some((a, b)) => Ok(Value::Float(a + b)),
                    None => Err(type_error("+", &left, &right)),
                }
            }
        },
        BinaryOp::Subtract => {
            if let Some((a, b)) = both_ints(&left, &right) {
                return Ok(Value::Int(a.wrapping_sub(b)));
            }
            match numeric_pair(&left, &right) {
                Some((a, b)) => Ok(Value::Float(a - b)),
                None => Err(type_error("-", &left, &right)),
            }
        }
        BinaryOp::Multiply => {
            if let Some((a, b)) = both_ints(&left, &right) {
                return Ok(Value::Int(a.wrapping_mul(b)));
            }
            match numeric_pair(&left, &right) {
                Some((a, b)) => Ok(Value::Float(a * b)),
                None => Err(type_error("*", &left, &right)),
            }
        }
        // Division is always floating-point; there is no integer-division
        // operator in the grammar.
        BinaryOp::Divide => match numeric_pair(&left, &right) {
            Some((_, b)) if b == 0.0 => Err(RuntimeError::DivisionByZero),
            Some((a, b)) => Ok(Value::Float(a / b)),
            None => Err(type_error("/", &left, &right)),
        },
        BinaryOp::Modulo => {
            if let Some((a, b)) = both_ints(&left, &right) {
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                return Ok(Value::Int(a.wrapping_rem(b)));
            }
            match numeric_pair(&left, &right) {
                Some((_, b)) if b == 0.0 => Err(RuntimeError::DivisionByZero),
                Some((a, b)) => Ok(Value::Float(a % b)),
                None => Err(type_error("%", &left, &right)),
            }
        }
        BinaryOp::Equal => Ok(Value::Bool(values_equal(&left, &right))),
        BinaryOp::NotEqual => Ok(Value::Bool(!values_equal(&left, &right))),
        BinaryOp::Less | BinaryOp::Greater | BinaryOp::LessEqual | BinaryOp::GreaterEqual => {
            if let Some((a, b)) = numeric_pair(&left, &right) {
                let ordering = a
                    .partial_cmp(&b)
                    .ok_or_else(|| type_error(op.symbol(), &left, &right))?;
                return Ok(Value::Bool(compare(op, ordering)));
            }
            if let (Value::Str(a), Value::Str(b)) = (&left, &right) {
                return Ok(Value::Bool(compare(op, a.cmp(b))));
            }
            Err(type_error(op.symbol(), &left, &right))
        }
        BinaryOp::And => Ok(Value::Bool(left.truthy() && right.truthy())),
        BinaryOp::Or => Ok(Value::Bool(left.truthy() || right.truthy())),
    }
}

pub fn apply_unary(op: UnaryOp, value: Value) -> Result<Value, RuntimeError> {
    match op {
        UnaryOp::Minus => match value {
            Value::Int(v) => Ok(Value::Int(-v)),
            Value::Float(v) => Ok(Value::Float(-v)),
            other => Err(RuntimeError::TypeError(format!(
                "'-' operatörü {} degerine uygulanamaz",
                other.type_name()
            ))),
        },
        UnaryOp::Plus => match value {
            Value::Int(_) | Value::Float(_) => Ok(value),
            other => Err(RuntimeError::TypeError(format!(
                "'+' operatörü {} degerine uygulanamaz",
                other.type_name()
            ))),
        },
        UnaryOp::Not => Ok(Value::Bool(!value.truthy())),
    }
}
