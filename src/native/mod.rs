//=====================================================
// File: native/mod.rs
//=====================================================
// Author: Taylan Contributors
// License: MIT
// Goal: Taylan native (C) backend
// Objective: Lower the interpreter's AST to C source under a double-only
//            typed model and drive the external C compiler
//=====================================================

use std::collections::BTreeSet;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::ast::{BinaryOp, Expr, FunctionDecl, Program, Stmt, UnaryOp};
use crate::parser::{ParseError, Parser};
use crate::tokenizer::{normalize_name, TokenizeError, Tokenizer};

/// Runtime bundle for the privileged blocking HTTP builtin, prepended to the
/// generated C when the source references it.
const WEB_RUNTIME: &str = include_str!("web_runtime.c");

//=====================================================
//            Section 1: Errors
//=====================================================

/// Native compilation error types
#[derive(Debug)]
pub enum NativeError {
    MissingInput { path: PathBuf },
    FunctionAfterStatements { name: String },
    NestedFunction { name: String },
    InvalidFunctionName { name: String },
    InvalidIdentifier { name: String },
    InvalidParameter { name: String },
    StringOutsideCall { literal: String },
    PrintInExpression,
    Io { path: PathBuf, error: io::Error },
    CompilerMissing { cc: String },
    CompilerFailed { message: String },
    Tokenize(TokenizeError),
    Parse(ParseError),
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeError::MissingInput { path } => {
                write!(f, "Dosya yok: {}", path.display())
            }
            NativeError::FunctionAfterStatements { name } => {
                write!(
                    f,
                    "Fonksiyonlar top-level ifade/komutlardan once tanimlanmali: {name}"
                )
            }
            NativeError::NestedFunction { name } => {
                write!(f, "Fonksiyon icinde fonksiyon tanimlanamaz: {name}")
            }
            NativeError::InvalidFunctionName { name } => {
                write!(f, "Gecersiz fonksiyon adi: {name}")
            }
            NativeError::InvalidIdentifier { name } => {
                write!(f, "Gecersiz degisken adi: {name}")
            }
            NativeError::InvalidParameter { name } => {
                write!(f, "Gecersiz parametre adi: {name}")
            }
            NativeError::StringOutsideCall { literal } => {
                write!(
                    f,
                    "Metin degeri yalnizca yazdir veya cagri argumani olabilir: \"{literal}\""
                )
            }
            NativeError::PrintInExpression => {
                f.write_str("yazdir bir ifade icinde kullanilamaz")
            }
            NativeError::Io { path, error } => {
                write!(f, "Dosya yazilamadi '{}': {error}", path.display())
            }
            NativeError::CompilerMissing { cc } => {
                write!(f, "Derleyici bulunamadi: {cc}")
            }
            NativeError::CompilerFailed { message } => f.write_str(message),
            NativeError::Tokenize(error) => error.fmt(f),
            NativeError::Parse(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for NativeError {}

impl From<TokenizeError> for NativeError {
    fn from(error: TokenizeError) -> Self {
        NativeError::Tokenize(error)
    }
}

impl From<ParseError> for NativeError {
    fn from(error: ParseError) -> Self {
        NativeError::Parse(error)
    }
}

//=====================================================
//            Section 2: Lowering
//=====================================================

/// Generated variables and parameters must survive as C identifiers, so the
/// accented spellings the interpreter accepts are rejected here.
fn is_c_ident(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

fn c_string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

fn float_literal(value: f64) -> String {
    format!("{value:?}")
}

struct CodeGen {
    statics: BTreeSet<String>,
    param_names: HashSet<String>,
    uses_web: bool,
    uses_fmod: bool,
    functions: Vec<Vec<String>>,
    main_lines: Vec<String>,
}

fn emit(buf: &mut Vec<String>, indent: usize, text: impl AsRef<str>) {
    buf.push(format!("{}{}", "    ".repeat(indent), text.as_ref()));
}

/// Lowers a whole program to C source text. All structural and typed-model
/// violations surface here, before any file exists.
pub fn compile_program(program: &Program) -> Result<String, NativeError> {
    let mut gen = CodeGen {
        statics: BTreeSet::new(),
        param_names: HashSet::new(),
        uses_web: false,
        uses_fmod: false,
        functions: Vec::new(),
        main_lines: Vec::new(),
    };

    // Functions must all precede the first top-level statement.
    let mut decls: Vec<&FunctionDecl> = Vec::new();
    let mut top_level: Vec<&Stmt> = Vec::new();
    for stmt in &program.body {
        match stmt {
            Stmt::FunctionDecl(decl) => {
                if !top_level.is_empty() {
                    return Err(NativeError::FunctionAfterStatements {
                        name: decl.name.clone(),
                    });
                }
                decls.push(decl);
            }
            other => top_level.push(other),
        }
    }

    for decl in &decls {
        if !is_c_ident(&decl.name) {
            return Err(NativeError::InvalidFunctionName {
                name: decl.name.clone(),
            });
        }
        for param in &decl.params {
            if !is_c_ident(param) {
                return Err(NativeError::InvalidParameter {
                    name: param.clone(),
                });
            }
            gen.param_names.insert(param.clone());
        }
    }

    for decl in &decls {
        collect_stmts(&mut gen, &decl.body)?;
    }
    collect_top_level(&mut gen, &top_level)?;

    for decl in &decls {
        let mut lines = Vec::new();
        let signature = if decl.params.is_empty() {
            "void".to_string()
        } else {
            decl.params
                .iter()
                .map(|p| format!("double {p}"))
                .collect::<Vec<_>>()
                .join(", ")
        };
        lines.push(format!("double {}({signature}) {{", decl.name));
        for stmt in &decl.body {
            emit_stmt(&mut lines, 1, stmt)?;
        }
        lines.push("}".to_string());
        gen.functions.push(lines);
    }

    let mut main_lines = Vec::new();
    for stmt in &top_level {
        emit_stmt(&mut main_lines, 1, stmt)?;
    }
    gen.main_lines = main_lines;

    Ok(assemble(&gen))
}

fn collect_top_level(gen: &mut CodeGen, stmts: &[&Stmt]) -> Result<(), NativeError> {
    for stmt in stmts {
        collect_stmt(gen, stmt)?;
    }
    Ok(())
}

fn collect_stmts(gen: &mut CodeGen, stmts: &[Stmt]) -> Result<(), NativeError> {
    for stmt in stmts {
        collect_stmt(gen, stmt)?;
    }
    Ok(())
}

/// Records assigned variables (file-scope statics unless parameter-bound) and
/// scans expressions for runtime requirements.
fn collect_stmt(gen: &mut CodeGen, stmt: &Stmt) -> Result<(), NativeError> {
    match stmt {
        Stmt::Assign { name, value } => {
            if !is_c_ident(name) {
                return Err(NativeError::InvalidIdentifier { name: name.clone() });
            }
            if !gen.param_names.contains(name) {
                gen.statics.insert(name.clone());
            }
            collect_expr(gen, value);
        }
        Stmt::Expr(expr) => collect_expr(gen, expr),
        Stmt::If {
            cond,
            then_body,
            else_body,
        } => {
            collect_expr(gen, cond);
            collect_stmts(gen, then_body)?;
            if let Some(else_body) = else_body {
                collect_stmts(gen, else_body)?;
            }
        }
        Stmt::While { cond, body } => {
            collect_expr(gen, cond);
            collect_stmts(gen, body)?;
        }
        Stmt::FunctionDecl(decl) => {
            return Err(NativeError::NestedFunction {
                name: decl.name.clone(),
            });
        }
        Stmt::Return(Some(expr)) => collect_expr(gen, expr),
        Stmt::Return(None) | Stmt::Import(_) => {}
    }
    Ok(())
}

fn collect_expr(gen: &mut CodeGen, expr: &Expr) {
    match expr {
        Expr::Unary { operand, .. } => collect_expr(gen, operand),
        Expr::Binary { left, op, right } => {
            if *op == BinaryOp::Modulo {
                gen.uses_fmod = true;
            }
            collect_expr(gen, left);
            collect_expr(gen, right);
        }
        Expr::Call { name, args } => {
            let normalized = normalize_name(name);
            if normalized == "tweb_baslat" || normalized == "port_oku" {
                gen.uses_web = true;
            }
            for arg in args {
                collect_expr(gen, arg);
            }
        }
        _ => {}
    }
}

fn emit_stmt(buf: &mut Vec<String>, indent: usize, stmt: &Stmt) -> Result<(), NativeError> {
    match stmt {
        Stmt::Assign { name, value } => {
            emit(buf, indent, format!("{name} = {};", lower_expr(value)?));
        }
        Stmt::Expr(Expr::Call { name, args }) if normalize_name(name) == "yazdir" => {
            emit(buf, indent, lower_print(args)?);
        }
        Stmt::Expr(expr) => {
            emit(buf, indent, format!("{};", lower_expr(expr)?));
        }
        Stmt::If {
            cond,
            then_body,
            else_body,
        } => {
            emit(buf, indent, format!("if ({}) {{", lower_expr(cond)?));
            for stmt in then_body {
                emit_stmt(buf, indent + 1, stmt)?;
            }
            if let Some(else_body) = else_body {
                emit(buf, indent, "} else {");
                for stmt in else_body {
                    emit_stmt(buf, indent + 1, stmt)?;
                }
            }
            emit(buf, indent, "}");
        }
        Stmt::While { cond, body } => {
            emit(buf, indent, format!("while ({}) {{", lower_expr(cond)?));
            for stmt in body {
                emit_stmt(buf, indent + 1, stmt)?;
            }
            emit(buf, indent, "}");
        }
        Stmt::FunctionDecl(decl) => {
            return Err(NativeError::NestedFunction {
                name: decl.name.clone(),
            });
        }
        // A bare `don` in `main` is the program's own exit.
        Stmt::Return(None) => emit(buf, indent, "return 0;"),
        Stmt::Return(Some(expr)) => {
            emit(buf, indent, format!("return {};", lower_expr(expr)?));
        }
        Stmt::Import(name) => emit(buf, indent, format!("/* dahil {name} */")),
    }
    Ok(())
}

fn lower_expr(expr: &Expr) -> Result<String, NativeError> {
    match expr {
        Expr::Int(value) => Ok(value.to_string()),
        Expr::Float(value) => Ok(float_literal(*value)),
        Expr::Bool(true) => Ok("1".to_string()),
        Expr::Bool(false) => Ok("0".to_string()),
        Expr::Str(literal) => Err(NativeError::StringOutsideCall {
            literal: literal.clone(),
        }),
        Expr::Var(name) => {
            if !is_c_ident(name) {
                return Err(NativeError::InvalidIdentifier { name: name.clone() });
            }
            Ok(name.clone())
        }
        Expr::Unary { op, operand } => {
            let operand = lower_expr(operand)?;
            let symbol = match op {
                UnaryOp::Plus => "+",
                UnaryOp::Minus => "-",
                UnaryOp::Not => "!",
            };
            Ok(format!("{symbol}{operand}"))
        }
        Expr::Binary { left, op, right } => {
            let left = lower_expr(left)?;
            let right = lower_expr(right)?;
            if *op == BinaryOp::Modulo {
                return Ok(format!("fmod({left}, {right})"));
            }
            let symbol = match op {
                BinaryOp::Add => "+",
                BinaryOp::Subtract => "-",
                BinaryOp::Multiply => "*",
                BinaryOp::Divide => "/",
                BinaryOp::Equal => "==",
                BinaryOp::NotEqual => "!=",
                BinaryOp::Less => "<",
                BinaryOp::Greater => ">",
                BinaryOp::LessEqual => "<=",
                BinaryOp::GreaterEqual => ">=",
                BinaryOp::And => "&&",
                BinaryOp::Or => "||",
                BinaryOp::Modulo => unreachable!(),
            };
            Ok(format!("({left} {symbol} {right})"))
        }
        Expr::Call { name, args } => lower_call(name, args),
    }
}

/// String literals are representable only as direct call arguments; they pass
/// through as C string literals.
fn lower_call(name: &str, args: &[Expr]) -> Result<String, NativeError> {
    if normalize_name(name) == "yazdir" {
        return Err(NativeError::PrintInExpression);
    }
    if !is_c_ident(name) {
        return Err(NativeError::InvalidFunctionName {
            name: name.to_string(),
        });
    }
    let mut lowered = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            Expr::Str(literal) => lowered.push(c_string_literal(literal)),
            other => lowered.push(lower_expr(other)?),
        }
    }
    Ok(format!("{name}({})", lowered.join(", ")))
}

/// One printf per print statement: `%s` for string literals, `%g` for
/// everything else, single spaces between specs, trailing newline.
fn lower_print(args: &[Expr]) -> Result<String, NativeError> {
    if args.is_empty() {
        return Ok(r#"printf("\n");"#.to_string());
    }
    let mut specs = Vec::with_capacity(args.len());
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            Expr::Str(literal) => {
                specs.push("%s");
                values.push(c_string_literal(literal));
            }
            other => {
                specs.push("%g");
                values.push(lower_expr(other)?);
            }
        }
    }
    let format = format!("{}\\n", specs.join(" "));
    Ok(format!("printf(\"{format}\", {});", values.join(", ")))
}

fn assemble(gen: &CodeGen) -> String {
    let mut out: Vec<String> = Vec::new();
    out.push("#include <stdio.h>".to_string());
    if gen.uses_fmod {
        out.push("#include <math.h>".to_string());
    }
    if gen.uses_web {
        out.extend(WEB_RUNTIME.lines().map(String::from));
        out.push(String::new());
    } else {
        out.push(String::new());
    }

    out.push("/* generated by taylan native compiler (mvp) */".to_string());
    if !gen.statics.is_empty() {
        out.push(String::new());
        for name in &gen.statics {
            out.push(format!("static double {name} = 0;"));
        }
    }

    if !gen.functions.is_empty() {
        out.push(String::new());
        for lines in &gen.functions {
            out.extend(lines.iter().cloned());
            out.push(String::new());
        }
    }

    out.push("int main(void) {".to_string());
    out.extend(gen.main_lines.iter().cloned());
    out.push("    return 0;".to_string());
    out.push("}".to_string());
    out.push(String::new());
    out.join("\n")
}

//=====================================================
//            Section 3: Build Step
//=====================================================

#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub c_path: PathBuf,
    pub binary: Option<PathBuf>,
}

/// Lowers a source text straight to C. Convenience entry shared by the build
/// step and the tests.
pub fn compile_source(source: &str) -> Result<String, NativeError> {
    let tokens = Tokenizer::new(source).tokenize()?;
    let program = Parser::new(tokens).parse()?;
    compile_program(&program)
}

/// Writes the generated C next to the input (or at the explicit paths) and,
/// unless suppressed, invokes the external C compiler.
pub fn build_native(
    input_path: &Path,
    output_bin: Option<&Path>,
    c_out: Option<&Path>,
    cc: &str,
    emit_c_only: bool,
) -> Result<BuildOutput, NativeError> {
    if !input_path.exists() {
        return Err(NativeError::MissingInput {
            path: input_path.to_path_buf(),
        });
    }
    let source = fs::read_to_string(input_path).map_err(|error| NativeError::Io {
        path: input_path.to_path_buf(),
        error,
    })?;
    let c_code = compile_source(&source)?;

    let stem = input_path.with_extension("");
    if emit_c_only {
        let c_path = c_out
            .or(output_bin)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| stem.with_extension("c"));
        write_c(&c_path, &c_code)?;
        return Ok(BuildOutput {
            c_path,
            binary: None,
        });
    }

    let bin_path = output_bin.map(Path::to_path_buf).unwrap_or(stem);
    let c_path = c_out.map(Path::to_path_buf).unwrap_or_else(|| {
        let mut os = bin_path.clone().into_os_string();
        os.push(".c");
        PathBuf::from(os)
    });
    write_c(&c_path, &c_code)?;
    run_compiler(cc, &c_path, &bin_path)?;
    Ok(BuildOutput {
        c_path,
        binary: Some(bin_path),
    })
}

fn write_c(path: &Path, c_code: &str) -> Result<(), NativeError> {
    fs::write(path, c_code).map_err(|error| NativeError::Io {
        path: path.to_path_buf(),
        error,
    })
}

fn run_compiler(cc: &str, c_path: &Path, bin_path: &Path) -> Result<(), NativeError> {
    debug!(cc, c = %c_path.display(), bin = %bin_path.display(), "C derleyicisi cagriliyor");
    let output = Command::new(cc)
        .arg(c_path)
        .args(["-O2", "-std=c11", "-o"])
        .arg(bin_path)
        .output();
    let output = match output {
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Err(NativeError::CompilerMissing { cc: cc.to_string() });
        }
        Err(error) => {
            return Err(NativeError::CompilerFailed {
                message: error.to_string(),
            });
        }
        Ok(output) => output,
    };
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let message = if !stderr.is_empty() {
            stderr
        } else if !stdout.is_empty() {
            stdout
        } else {
            "Bilinmeyen derleme hatasi".to_string()
        };
        return Err(NativeError::CompilerFailed { message });
    }
    // Warnings from a successful compile are surfaced, never swallowed.
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !stderr.is_empty() {
        println!("{stderr}");
    }
    Ok(())
}
