//==============================================
// File: stdlib/thttp.rs
//==============================================
// Goal: thttp builtin module
// Objective: Blocking HTTP GET returning the body as text
//==============================================

use crate::interpreter::{RuntimeError, Value};

use super::{expect_arity, str_arg, Builtins};

pub(super) fn install(builtins: &mut Builtins) {
    builtins.register("http_get", http_get);
}

fn http_get(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("http_get", args, 1)?;
    let url = str_arg("http_get", args, 0)?;
    let response = ureq::get(url)
        .call()
        .map_err(|error| RuntimeError::NetworkError(error.to_string()))?;
    let body = response
        .into_string()
        .map_err(|error| RuntimeError::NetworkError(error.to_string()))?;
    Ok(Value::Str(body))
}
