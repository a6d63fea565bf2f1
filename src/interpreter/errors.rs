use super::RuntimeError;
use crate::modules::ModuleError;
use crate::native::NativeError;
use crate::parser::ParseError;
use crate::tokenizer::TokenizeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Lexical,
    Syntax,
    Binding,
    Arity,
    Runtime,
    NativeLowering,
    Build,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Lexical => "E001",
            ErrorCode::Syntax => "E002",
            ErrorCode::Binding => "E003",
            ErrorCode::Arity => "E004",
            ErrorCode::Runtime => "E005",
            ErrorCode::NativeLowering => "E006",
            ErrorCode::Build => "E007",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScriptError {
    pub code: ErrorCode,
    pub message: String,
}

impl ScriptError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ScriptError {}

impl From<TokenizeError> for ScriptError {
    fn from(value: TokenizeError) -> Self {
        ScriptError::new(ErrorCode::Lexical, value.to_string())
    }
}

impl From<ParseError> for ScriptError {
    fn from(value: ParseError) -> Self {
        ScriptError::new(ErrorCode::Syntax, value.to_string())
    }
}

impl From<ModuleError> for ScriptError {
    fn from(value: ModuleError) -> Self {
        ScriptError::new(ErrorCode::Binding, value.to_string())
    }
}

impl From<RuntimeError> for ScriptError {
    fn from(value: RuntimeError) -> Self {
        ScriptError::new(runtime_error_code(&value), value.to_string())
    }
}

impl From<NativeError> for ScriptError {
    fn from(value: NativeError) -> Self {
        let code = match &value {
            NativeError::Tokenize(_) => ErrorCode::Lexical,
            NativeError::Parse(_) => ErrorCode::Syntax,
            NativeError::CompilerMissing { .. } | NativeError::CompilerFailed { .. } => {
                ErrorCode::Build
            }
            _ => ErrorCode::NativeLowering,
        };
        ScriptError::new(code, value.to_string())
    }
}

pub fn runtime_error_code(error: &RuntimeError) -> ErrorCode {
    match error {
        RuntimeError::UndefinedVariable(_)
        | RuntimeError::UnknownFunction(_)
        | RuntimeError::Module(_) => ErrorCode::Binding,
        RuntimeError::ArityMismatch { .. } => ErrorCode::Arity,
        RuntimeError::TypeError(_)
        | RuntimeError::DivisionByZero
        | RuntimeError::ArgumentError { .. }
        | RuntimeError::IoError(_)
        | RuntimeError::NetworkError(_) => ErrorCode::Runtime,
    }
}
