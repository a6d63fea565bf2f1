//=====================================================
// File: interpreter/mod.rs
//=====================================================
// Author: Taylan Contributors
// License: MIT
// Goal: Taylan tree-walking evaluator
// Objective: Execute parsed programs against a two-frame environment with
//            user functions, imported builtins, and an injectable output sink
//=====================================================

pub mod errors;
pub mod value;

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ast::{Expr, FunctionDecl, Program, Stmt};
use crate::modules::{ModuleError, PackageRegistry};
use crate::parser::Parser;
use crate::stdlib::{self, Builtins};
use crate::tokenizer::{normalize_name, Tokenizer};

pub use errors::{ErrorCode, ScriptError};
pub use value::{apply_binary, apply_unary, Value};

//=====================================================
//            Section 1: Runtime Errors
//=====================================================

/// Runtime error types
#[derive(Debug)]
pub enum RuntimeError {
    UndefinedVariable(String),
    UnknownFunction(String),
    ArityMismatch { name: String },
    TypeError(String),
    DivisionByZero,
    ArgumentError { name: String, message: String },
    IoError(String),
    NetworkError(String),
    Module(ModuleError),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::UndefinedVariable(name) => {
                write!(f, "Tanımsız değişken: {name}")
            }
            RuntimeError::UnknownFunction(name) => {
                write!(f, "Bilinmeyen fonksiyon: {name}")
            }
            RuntimeError::ArityMismatch { name } => {
                write!(f, "{name} parametre sayisi uyusmuyor")
            }
            RuntimeError::TypeError(message) => f.write_str(message),
            RuntimeError::DivisionByZero => f.write_str("Sifira bolme yapilamaz"),
            RuntimeError::ArgumentError { name, message } => {
                write!(f, "{name}: {message}")
            }
            RuntimeError::IoError(message) => write!(f, "Dosya hatasi: {message}"),
            RuntimeError::NetworkError(message) => write!(f, "Ag hatasi: {message}"),
            RuntimeError::Module(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ModuleError> for RuntimeError {
    fn from(error: ModuleError) -> Self {
        RuntimeError::Module(error)
    }
}

//=====================================================
//            Section 2: Control Flow
//=====================================================

/// Result of executing a statement or block: either fall through to the next
/// statement, or unwind to the nearest call boundary carrying a value.
enum Flow {
    Continue,
    Return(Value),
}

type Locals<'a> = Option<&'a mut HashMap<String, Value>>;

//=====================================================
//            Section 3: Interpreter
//=====================================================

/// One interpreter instance owns the global environment, the function table,
/// and the builtin table. Globals persist across successive `run` calls on
/// the same instance; nothing is process-wide.
pub struct Interpreter {
    globals: HashMap<String, Value>,
    functions: HashMap<String, FunctionDecl>,
    builtins: Builtins,
    base_dir: PathBuf,
    out: Box<dyn Write>,
}

impl Interpreter {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self::with_writer(base_dir, Box::new(io::stdout()))
    }

    /// Routes print output into the given writer; tests use this to capture
    /// what a program printed.
    pub fn with_writer(base_dir: impl AsRef<Path>, out: Box<dyn Write>) -> Self {
        Self {
            globals: HashMap::new(),
            functions: HashMap::new(),
            builtins: Builtins::new(),
            base_dir: base_dir.as_ref().to_path_buf(),
            out,
        }
    }

    /// Lex, parse, and execute a source text against this instance's state.
    pub fn run(&mut self, source: &str) -> Result<(), ScriptError> {
        let tokens = Tokenizer::new(source).tokenize()?;
        let program = Parser::new(tokens).parse()?;
        self.run_program(&program)
    }

    /// Executes an already-parsed program. A `don` reaching the top level
    /// ends execution cleanly; its value is discarded.
    pub fn run_program(&mut self, program: &Program) -> Result<(), ScriptError> {
        self.exec_block(&program.body, None)?;
        Ok(())
    }

    /// Invokes a user function by name with host-provided argument values.
    /// This is the entry point the selfhost command builds on.
    pub fn call_function(&mut self, name: &str, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let decl = self
            .functions
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownFunction(name.to_string()))?;
        if args.len() != decl.params.len() {
            return Err(RuntimeError::ArityMismatch {
                name: decl.name.clone(),
            });
        }
        let mut locals: HashMap<String, Value> =
            decl.params.iter().cloned().zip(args).collect();
        match self.exec_block(&decl.body, Some(&mut locals))? {
            Flow::Return(value) => Ok(value),
            Flow::Continue => Ok(Value::Unit),
        }
    }

    pub fn get_global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    //=====================================================
    //            Section 4: Statement Execution
    //=====================================================

    fn exec_block(&mut self, body: &[Stmt], mut locals: Locals) -> Result<Flow, RuntimeError> {
        for stmt in body {
            match self.exec_stmt(stmt, locals.as_deref_mut())? {
                Flow::Continue => {}
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }
        Ok(Flow::Continue)
    }

    fn exec_stmt(&mut self, stmt: &Stmt, mut locals: Locals) -> Result<Flow, RuntimeError> {
        match stmt {
            Stmt::Assign { name, value } => {
                let value = self.eval(value, locals.as_deref_mut())?;
                self.bind(locals, name, value);
                Ok(Flow::Continue)
            }
            Stmt::Expr(expr) => {
                self.eval(expr, locals)?;
                Ok(Flow::Continue)
            }
            Stmt::If {
                cond,
                then_body,
                else_body,
            } => {
                if self.eval(cond, locals.as_deref_mut())?.truthy() {
                    self.exec_block(then_body, locals)
                } else if let Some(else_body) = else_body {
                    self.exec_block(else_body, locals)
                } else {
                    Ok(Flow::Continue)
                }
            }
            Stmt::While { cond, body } => {
                while self.eval(cond, locals.as_deref_mut())?.truthy() {
                    match self.exec_block(body, locals.as_deref_mut())? {
                        Flow::Continue => {}
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
                Ok(Flow::Continue)
            }
            Stmt::FunctionDecl(decl) => {
                // Redefinition overwrites silently.
                self.functions.insert(decl.name.clone(), decl.clone());
                Ok(Flow::Continue)
            }
            Stmt::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.eval(expr, locals)?,
                    None => Value::Unit,
                };
                Ok(Flow::Return(value))
            }
            Stmt::Import(name) => {
                self.import_module(name, locals)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn bind(&mut self, locals: Locals, name: &str, value: Value) {
        match locals {
            Some(locals) => {
                locals.insert(name.to_string(), value);
            }
            None => {
                self.globals.insert(name.to_string(), value);
            }
        }
    }

    //=====================================================
    //            Section 5: Expression Evaluation
    //=====================================================

    fn eval(&mut self, expr: &Expr, mut locals: Locals) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Int(value) => Ok(Value::Int(*value)),
            Expr::Float(value) => Ok(Value::Float(*value)),
            Expr::Str(value) => Ok(Value::Str(value.clone())),
            Expr::Bool(value) => Ok(Value::Bool(*value)),
            Expr::Var(name) => self.lookup(name, locals.as_deref_mut()),
            Expr::Unary { op, operand } => {
                let value = self.eval(operand, locals)?;
                apply_unary(*op, value)
            }
            Expr::Binary { left, op, right } => {
                let left = self.eval(left, locals.as_deref_mut())?;
                let right = self.eval(right, locals)?;
                apply_binary(*op, left, right)
            }
            Expr::Call { name, args } => self.eval_call(name, args, locals),
        }
    }

    /// Lookup order is local-then-global; writes inside a call always target
    /// the local frame, so a call observes the globals as they were when it
    /// started. There is no enclosing-scope capture.
    fn lookup(&self, name: &str, locals: Locals) -> Result<Value, RuntimeError> {
        if let Some(locals) = locals {
            if let Some(value) = locals.get(name) {
                return Ok(value.clone());
            }
        }
        self.globals
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedVariable(name.to_string()))
    }

    /// Call resolution order: the print builtin, then imported builtins by
    /// normalized name, then user functions by exact name.
    fn eval_call(
        &mut self,
        name: &str,
        args: &[Expr],
        mut locals: Locals,
    ) -> Result<Value, RuntimeError> {
        let normalized = normalize_name(name);
        if normalized == "yazdir" {
            let values = self.eval_args(args, locals)?;
            return self.print_values(&values);
        }
        if let Some(builtin) = self.builtins.lookup(&normalized) {
            let values = self.eval_args(args, locals)?;
            return builtin(&values);
        }
        if let Some(decl) = self.functions.get(name).cloned() {
            if args.len() != decl.params.len() {
                return Err(RuntimeError::ArityMismatch {
                    name: decl.name.clone(),
                });
            }
            let mut frame = HashMap::new();
            for (param, arg) in decl.params.iter().zip(args) {
                let value = self.eval(arg, locals.as_deref_mut())?;
                frame.insert(param.clone(), value);
            }
            return match self.exec_block(&decl.body, Some(&mut frame))? {
                Flow::Return(value) => Ok(value),
                Flow::Continue => Ok(Value::Unit),
            };
        }
        Err(RuntimeError::UnknownFunction(name.to_string()))
    }

    fn eval_args(&mut self, args: &[Expr], mut locals: Locals) -> Result<Vec<Value>, RuntimeError> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg, locals.as_deref_mut())?);
        }
        Ok(values)
    }

    fn print_values(&mut self, values: &[Value]) -> Result<Value, RuntimeError> {
        let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
        writeln!(self.out, "{}", rendered.join(" "))
            .map_err(|error| RuntimeError::IoError(error.to_string()))?;
        Ok(Value::Unit)
    }

    //=====================================================
    //            Section 6: Imports
    //=====================================================

    /// A stdlib name installs that module's exports into the builtin table;
    /// any other name must be present in the persisted package registry.
    fn import_module(&mut self, name: &str, locals: Locals) -> Result<(), RuntimeError> {
        if stdlib::install(name, &mut self.builtins) {
            debug!(module = name, "stdlib modulu yuklendi");
            self.bind(locals, name, Value::Module(name.to_string()));
            return Ok(());
        }

        let registry = PackageRegistry::load(&self.base_dir)?;
        let entry = registry.resolve(name)?;
        debug!(module = name, source = %entry.source, "paket modulu bulundu");
        self.bind(locals, name, Value::Module(name.to_string()));
        Ok(())
    }
}
