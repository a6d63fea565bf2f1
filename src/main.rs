//=====================================================
// File: main.rs
//=====================================================
// Author: Taylan Contributors
// License: MIT
// Goal: Taylan CLI entry point
// Objective: Command-line interface for interpreting .tay source files,
//            lowering them to native binaries, and selfhost transpilation
//=====================================================

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taylan::interpreter::{Interpreter, Value};
use taylan::native;
use taylan::tokenizer::strip_bom;

#[derive(Parser, Debug)]
#[command(name = "taylan", about = "Taylan dil yorumlayicisi")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// .tay dosyasini calistir
    Calistir(CalistirArgs),
    /// Taylan kodunu C ve native binary'ye derle (MVP)
    Native(NativeArgs),
    /// Taylan ile yazilmis transpiler calistir
    Selfhost(SelfhostArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CalistirArgs {
    /// Calistirilacak dosya
    pub file: PathBuf,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct NativeArgs {
    /// Derlenecek .tay dosyasi
    pub file: PathBuf,

    /// Cikacak binary yolu (vars: dosya adi)
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,

    /// Uretilecek C dosyasi yolu
    #[arg(long = "c-out")]
    pub c_out: Option<PathBuf>,

    /// C derleyicisi komutu (vars: gcc)
    #[arg(long = "cc", default_value = "gcc")]
    pub cc: String,

    /// Sadece C kodu uret
    #[arg(long = "emit-c-only")]
    pub emit_c_only: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SelfhostArgs {
    /// Derlenecek .tay dosyasi
    pub file: PathBuf,

    /// Uretilecek cikti dosyasi
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,

    /// Taylan transpiler yolu
    #[arg(long = "transpiler", default_value = "selfhost/transpiler_v0.tay")]
    pub transpiler: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Calistir(args) => cmd_calistir(&args.file),
        Command::Native(args) => cmd_native(args),
        Command::Selfhost(args) => cmd_selfhost(args),
    }
}

fn read_source(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Dosya okunamadi: {}", path.display()))?;
    Ok(strip_bom(&text).to_string())
}

fn cmd_calistir(file: &Path) -> Result<()> {
    if !file.exists() {
        bail!("Dosya yok: {}", file.display());
    }
    let source = read_source(file)?;
    let base_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut interpreter = Interpreter::new(base_dir);
    interpreter.run(&source).map_err(|error| anyhow!("{error}"))
}

fn cmd_native(args: NativeArgs) -> Result<()> {
    if !args.file.exists() {
        bail!("Dosya yok: {}", args.file.display());
    }
    let output = native::build_native(
        &args.file,
        args.out.as_deref(),
        args.c_out.as_deref(),
        &args.cc,
        args.emit_c_only,
    )
    .map_err(|error| anyhow!("Native derleme hatasi: {error}"))?;

    println!("C dosyasi: {}", output.c_path.display());
    if let Some(binary) = &output.binary {
        println!("Binary: {}", binary.display());
    }
    Ok(())
}

fn cmd_selfhost(args: SelfhostArgs) -> Result<()> {
    if !args.file.exists() {
        bail!("Dosya yok: {}", args.file.display());
    }
    if !args.transpiler.exists() {
        bail!("Transpiler yok: {}", args.transpiler.display());
    }

    let out_path = args
        .out
        .unwrap_or_else(|| args.file.with_extension("py"));

    let transpiler_source = read_source(&args.transpiler)?;
    let base_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut interpreter = Interpreter::new(base_dir);
    interpreter
        .run(&transpiler_source)
        .map_err(|error| anyhow!("{error}"))?;

    let result = interpreter
        .call_function(
            "selfhost_derle",
            vec![
                Value::Str(args.file.display().to_string()),
                Value::Str(out_path.display().to_string()),
            ],
        )
        .map_err(|error| anyhow!("{error}"))?;
    if result.truthy() {
        println!("{result}");
    }
    println!("Selfhost derleme tamamlandi: {}", out_path.display());
    Ok(())
}
