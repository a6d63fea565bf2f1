//==============================================
// File: stdlib/timg.rs
//==============================================
// Goal: timg builtin module
// Objective: Plain-text PPM image generation
//==============================================

use std::fs;

use crate::interpreter::{RuntimeError, Value};

use super::{expect_arity, int_arg, io_error, str_arg, Builtins};

pub(super) fn install(builtins: &mut Builtins) {
    builtins.register("ppm_olustur", ppm_olustur);
    builtins.register("ppm_kaydet", ppm_kaydet);
}

/// Returns a raw P3 PPM document filled with one color.
fn ppm_olustur(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("ppm_olustur", args, 5)?;
    let w = int_arg("ppm_olustur", args, 0)?.max(0);
    let h = int_arg("ppm_olustur", args, 1)?.max(0);
    let r = int_arg("ppm_olustur", args, 2)?;
    let g = int_arg("ppm_olustur", args, 3)?;
    let b = int_arg("ppm_olustur", args, 4)?;
    let header = format!("P3\n{w} {h}\n255\n");
    let pixel = format!("{r} {g} {b} ");
    let mut data = String::with_capacity(header.len() + pixel.len() * (w * h) as usize);
    data.push_str(&header);
    for _ in 0..(w * h) {
        data.push_str(&pixel);
    }
    Ok(Value::Str(data))
}

fn ppm_kaydet(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("ppm_kaydet", args, 2)?;
    let path = str_arg("ppm_kaydet", args, 0)?;
    let text = str_arg("ppm_kaydet", args, 1)?;
    fs::write(path, text).map_err(io_error)?;
    Ok(Value::Str(path.to_string()))
}
