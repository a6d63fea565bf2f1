//==============================================
// File: stdlib/tcore.rs
//==============================================
// Goal: tcore builtin module
// Objective: File access, string helpers, and process-argument builtins
//==============================================

use std::env;
use std::fs;
use std::path::Path;

use crate::interpreter::{RuntimeError, Value};
use crate::tokenizer::strip_bom;

use super::{expect_arity, int_arg, io_error, str_arg, Builtins};

pub(super) fn install(builtins: &mut Builtins) {
    builtins.register("dosya_oku", dosya_oku);
    builtins.register("dosya_yaz", dosya_yaz);
    builtins.register("klasor_olustur", klasor_olustur);
    builtins.register("metin", metin);
    builtins.register("sayi", sayi);
    builtins.register("metin_uzunluk", metin_uzunluk);
    builtins.register("metin_kirp", metin_kirp);
    builtins.register("metin_birlesik", metin_birlesik);
    builtins.register("metin_alt", metin_alt);
    builtins.register("metin_basliyor_mu", metin_basliyor_mu);
    builtins.register("metin_biter_mi", metin_biter_mi);
    builtins.register("metin_iceriyor_mu", metin_iceriyor_mu);
    builtins.register("metin_degistir", metin_degistir);
    builtins.register("metin_bul", metin_bul);
    builtins.register("arg_getir", arg_getir);
    builtins.register("arg_sayisi", arg_sayisi);
    builtins.register("satir_sonu", satir_sonu);
    builtins.register("cift_tirnak", cift_tirnak);
    builtins.register("tab_karakteri", tab_karakteri);
    builtins.register("cr_karakteri", cr_karakteri);
}

fn dosya_oku(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("dosya_oku", args, 1)?;
    let path = str_arg("dosya_oku", args, 0)?;
    let text = fs::read_to_string(path).map_err(io_error)?;
    Ok(Value::Str(strip_bom(&text).to_string()))
}

fn dosya_yaz(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("dosya_yaz", args, 2)?;
    let path = str_arg("dosya_yaz", args, 0)?;
    let content = args[1].to_string();
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
    }
    fs::write(path, content).map_err(io_error)?;
    Ok(Value::Str(path.to_string()))
}

fn klasor_olustur(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("klasor_olustur", args, 1)?;
    let path = str_arg("klasor_olustur", args, 0)?;
    fs::create_dir_all(path).map_err(io_error)?;
    Ok(Value::Str(path.to_string()))
}

fn metin(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("metin", args, 1)?;
    Ok(Value::Str(args[0].to_string()))
}

/// Follows the original: every numeric-looking input lands on an integer.
fn sayi(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("sayi", args, 1)?;
    match &args[0] {
        Value::Int(v) => Ok(Value::Int(*v)),
        Value::Float(v) => Ok(Value::Int(*v as i64)),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(|v| Value::Int(v as i64))
            .map_err(|_| RuntimeError::ArgumentError {
                name: "sayi".into(),
                message: format!("sayiya cevrilemedi: {s}"),
            }),
        other => Err(RuntimeError::ArgumentError {
            name: "sayi".into(),
            message: format!("{} sayiya cevrilemez", other.type_name()),
        }),
    }
}

fn metin_uzunluk(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("metin_uzunluk", args, 1)?;
    let text = str_arg("metin_uzunluk", args, 0)?;
    Ok(Value::Int(text.chars().count() as i64))
}

fn metin_kirp(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("metin_kirp", args, 1)?;
    Ok(Value::Str(args[0].to_string().trim().to_string()))
}

fn metin_birlesik(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("metin_birlesik", args, 2)?;
    Ok(Value::Str(format!("{}{}", args[0], args[1])))
}

fn metin_alt(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("metin_alt", args, 3)?;
    let text = str_arg("metin_alt", args, 0)?;
    let start = int_arg("metin_alt", args, 1)?;
    let end = int_arg("metin_alt", args, 2)?;
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len() as i64;
    let clamp = |i: i64| -> usize {
        let i = if i < 0 { i + len } else { i };
        i.clamp(0, len) as usize
    };
    let (start, end) = (clamp(start), clamp(end));
    if start >= end {
        return Ok(Value::Str(String::new()));
    }
    Ok(Value::Str(chars[start..end].iter().collect()))
}

fn metin_basliyor_mu(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("metin_basliyor_mu", args, 2)?;
    let text = args[0].to_string();
    let prefix = args[1].to_string();
    Ok(Value::Bool(text.starts_with(&prefix)))
}

fn metin_biter_mi(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("metin_biter_mi", args, 2)?;
    let text = args[0].to_string();
    let suffix = args[1].to_string();
    Ok(Value::Bool(text.ends_with(&suffix)))
}

fn metin_iceriyor_mu(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("metin_iceriyor_mu", args, 2)?;
    let text = args[0].to_string();
    let needle = args[1].to_string();
    Ok(Value::Bool(text.contains(&needle)))
}

fn metin_degistir(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("metin_degistir", args, 3)?;
    let text = args[0].to_string();
    let old = args[1].to_string();
    let new = args[2].to_string();
    Ok(Value::Str(text.replace(&old, &new)))
}

/// Returns the character index of the first match, or -1.
fn metin_bul(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("metin_bul", args, 2)?;
    let text = args[0].to_string();
    let needle = args[1].to_string();
    match text.find(&needle) {
        Some(byte_idx) => Ok(Value::Int(text[..byte_idx].chars().count() as i64)),
        None => Ok(Value::Int(-1)),
    }
}

/// `arg_getir(index)` or `arg_getir(index, varsayilan)`.
fn arg_getir(args: &[Value]) -> Result<Value, RuntimeError> {
    if args.is_empty() || args.len() > 2 {
        return Err(RuntimeError::ArityMismatch {
            name: "arg_getir".into(),
        });
    }
    let index = int_arg("arg_getir", args, 0)?;
    let default = match args.get(1) {
        Some(value) => value.to_string(),
        None => String::new(),
    };
    if index < 0 {
        return Ok(Value::Str(default));
    }
    match env::args().nth(index as usize) {
        Some(arg) => Ok(Value::Str(arg)),
        None => Ok(Value::Str(default)),
    }
}

fn arg_sayisi(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("arg_sayisi", args, 0)?;
    Ok(Value::Int(env::args().count() as i64))
}

fn satir_sonu(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("satir_sonu", args, 0)?;
    Ok(Value::Str("\n".into()))
}

fn cift_tirnak(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("cift_tirnak", args, 0)?;
    Ok(Value::Str("\"".into()))
}

fn tab_karakteri(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("tab_karakteri", args, 0)?;
    Ok(Value::Str("\t".into()))
}

fn cr_karakteri(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("cr_karakteri", args, 0)?;
    Ok(Value::Str("\r".into()))
}
