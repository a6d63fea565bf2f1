//=====================================================
// File: parser/mod.rs
//=====================================================
// Author: Taylan Contributors
// License: MIT
// Goal: Taylan recursive descent parser implementation
// Objective: Transform token streams into AST nodes consumed by the
//            interpreter and the native backend
//=====================================================

use std::fmt;

use crate::ast::{BinaryOp, Expr, FunctionDecl, Program, Stmt, UnaryOp};
use crate::tokenizer::{normalize_name, Token, TokenKind};

//=====================================================
//            Section 1: Parse Errors
//=====================================================

/// Parser error types
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    UnexpectedToken { expected: String, line: usize },
    UnexpectedKeyword { keyword: String, line: usize },
    ExpectedTerminator { line: usize },
    UnterminatedFunction { name: String, line: usize },
    UnexpectedStatement { line: usize },
    UnexpectedExpr { line: usize },
    ImportName { line: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { expected, line } => {
                write!(f, "Beklenen {expected} (satır {line})")
            }
            ParseError::UnexpectedKeyword { keyword, line } => {
                write!(f, "Beklenmeyen '{keyword}' (satır {line})")
            }
            ParseError::ExpectedTerminator { line } => {
                write!(f, "bitti bekleniyordu (satır {line})")
            }
            ParseError::UnterminatedFunction { name, line } => {
                write!(
                    f,
                    "Fonksiyon '{name}' blogu 'bitti' ile kapanmamis (satır {line})"
                )
            }
            ParseError::UnexpectedStatement { line } => {
                write!(f, "Beklenmeyen token (satır {line})")
            }
            ParseError::UnexpectedExpr { line } => {
                write!(f, "Beklenmeyen ifade (satır {line})")
            }
            ParseError::ImportName { line } => {
                write!(f, "dahil için modül adı bekleniyor (satır {line})")
            }
        }
    }
}

impl std::error::Error for ParseError {}

//=====================================================
//            Section 2: Keywords
//=====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Eger,
    Degilse,
    Bitti,
    Dongu,
    Fonksiyon,
    Don,
    Dahil,
    Dogru,
    Yanlis,
    Ve,
    Veya,
    Degil,
}

/// Keyword recognition is accent-insensitive: the normalized spelling decides.
fn keyword_of(ident: &str) -> Option<Keyword> {
    match normalize_name(ident).as_str() {
        "eger" => Some(Keyword::Eger),
        "degilse" => Some(Keyword::Degilse),
        "bitti" => Some(Keyword::Bitti),
        "dongu" => Some(Keyword::Dongu),
        "fonksiyon" => Some(Keyword::Fonksiyon),
        "don" => Some(Keyword::Don),
        "dahil" => Some(Keyword::Dahil),
        "dogru" => Some(Keyword::Dogru),
        "yanlis" => Some(Keyword::Yanlis),
        "ve" => Some(Keyword::Ve),
        "veya" => Some(Keyword::Veya),
        "degil" => Some(Keyword::Degil),
        _ => None,
    }
}

//=====================================================
//            Section 3: Parser State
//=====================================================

/// Recursive descent parser for Taylan
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_ahead(&self, offset: usize) -> &Token {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn line(&self) -> usize {
        self.peek().line()
    }

    fn peek_keyword(&self) -> Option<Keyword> {
        match &self.peek().kind {
            TokenKind::Ident(name) => keyword_of(name),
            _ => None,
        }
    }

    fn match_op(&mut self, op: &str) -> bool {
        if matches!(&self.peek().kind, TokenKind::Op(o) if o == op) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_op(&mut self, op: &str) -> Result<Token, ParseError> {
        if matches!(&self.peek().kind, TokenKind::Op(o) if o == op) {
            Ok(self.advance())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: format!("'{op}'"),
                line: self.line(),
            })
        }
    }

    fn expect_newline(&mut self) -> Result<(), ParseError> {
        if matches!(self.peek().kind, TokenKind::Newline) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: "satır sonu".into(),
                line: self.line(),
            })
        }
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        if let TokenKind::Ident(name) = &self.peek().kind {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(ParseError::UnexpectedToken {
                expected: "isim".into(),
                line: self.line(),
            })
        }
    }

    /// Consumes the closing `bitti` of a block, plus an optional trailing
    /// newline.
    fn expect_block_end(&mut self) -> Result<(), ParseError> {
        if self.peek_keyword() != Some(Keyword::Bitti) {
            return Err(ParseError::ExpectedTerminator { line: self.line() });
        }
        self.advance();
        if matches!(self.peek().kind, TokenKind::Newline) {
            self.advance();
        }
        Ok(())
    }

    //=====================================================
    //            Section 4: Statements
    //=====================================================

    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let body = self.parse_block(&[])?;
        Ok(Program { body })
    }

    /// A block runs until end-of-stream or one of the caller's terminator
    /// keywords; blank lines are skipped.
    fn parse_block(&mut self, terminators: &[Keyword]) -> Result<Vec<Stmt>, ParseError> {
        let mut body = Vec::new();
        loop {
            match &self.peek().kind {
                TokenKind::Eof => break,
                TokenKind::Newline => {
                    self.advance();
                }
                _ => {
                    if let Some(kw) = self.peek_keyword() {
                        if terminators.contains(&kw) {
                            break;
                        }
                    }
                    body.push(self.statement()?);
                }
            }
        }
        Ok(body)
    }

    fn statement(&mut self) -> Result<Stmt, ParseError> {
        let line = self.line();
        if let TokenKind::Ident(name) = &self.peek().kind {
            let name = name.clone();
            match keyword_of(&name) {
                Some(Keyword::Eger) => return self.if_stmt(),
                Some(Keyword::Degilse) | Some(Keyword::Bitti) => {
                    return Err(ParseError::UnexpectedKeyword {
                        keyword: name,
                        line,
                    });
                }
                Some(Keyword::Dongu) => return self.while_stmt(),
                Some(Keyword::Fonksiyon) => return self.func_def(),
                Some(Keyword::Don) => {
                    self.advance();
                    if matches!(self.peek().kind, TokenKind::Newline) {
                        return Ok(Stmt::Return(None));
                    }
                    return Ok(Stmt::Return(Some(self.expr()?)));
                }
                Some(Keyword::Dahil) => {
                    self.advance();
                    let module = match &self.peek().kind {
                        TokenKind::Str(name) | TokenKind::Ident(name) => name.clone(),
                        _ => return Err(ParseError::ImportName { line: self.line() }),
                    };
                    self.advance();
                    return Ok(Stmt::Import(module));
                }
                _ => {}
            }

            // One-token lookahead: `IDENT =` is an assignment, anything else
            // falls through to an expression statement.
            if matches!(&self.peek_ahead(1).kind, TokenKind::Op(o) if o == "=") {
                let name = self.expect_ident()?;
                self.expect_op("=")?;
                let value = self.expr()?;
                return Ok(Stmt::Assign { name, value });
            }
            return Ok(Stmt::Expr(self.expr()?));
        }

        Err(ParseError::UnexpectedStatement { line })
    }

    fn if_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let cond = self.expr()?;
        self.match_op(":");
        self.expect_newline()?;
        let then_body = self.parse_block(&[Keyword::Degilse, Keyword::Bitti])?;
        let mut else_body = None;
        if self.peek_keyword() == Some(Keyword::Degilse) {
            self.advance();
            self.match_op(":");
            self.expect_newline()?;
            else_body = Some(self.parse_block(&[Keyword::Bitti])?);
        }
        self.expect_block_end()?;
        Ok(Stmt::If {
            cond,
            then_body,
            else_body,
        })
    }

    fn while_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let cond = self.expr()?;
        self.match_op(":");
        self.expect_newline()?;
        let body = self.parse_block(&[Keyword::Bitti])?;
        self.expect_block_end()?;
        Ok(Stmt::While { cond, body })
    }

    fn func_def(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let name = self.expect_ident()?;
        self.expect_op("(")?;
        let mut params = Vec::new();
        if !self.match_op(")") {
            loop {
                params.push(self.expect_ident()?);
                if self.match_op(",") {
                    continue;
                }
                self.expect_op(")")?;
                break;
            }
        }
        self.match_op(":");
        self.expect_newline()?;
        let body = self.parse_block(&[Keyword::Bitti])?;
        if matches!(self.peek().kind, TokenKind::Eof) {
            return Err(ParseError::UnterminatedFunction {
                name,
                line: self.line(),
            });
        }
        self.expect_block_end()?;
        Ok(Stmt::FunctionDecl(FunctionDecl { name, params, body }))
    }

    //=====================================================
    //            Section 5: Expressions
    //=====================================================

    fn expr(&mut self) -> Result<Expr, ParseError> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.and_expr()?;
        while self.peek_keyword() == Some(Keyword::Veya) {
            self.advance();
            let right = self.and_expr()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op: BinaryOp::Or,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn and_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.not_expr()?;
        while self.peek_keyword() == Some(Keyword::Ve) {
            self.advance();
            let right = self.not_expr()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op: BinaryOp::And,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn not_expr(&mut self) -> Result<Expr, ParseError> {
        if self.peek_keyword() == Some(Keyword::Degil) {
            self.advance();
            let operand = self.not_expr()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.term()?;
        while let Some(op) = self.peek_comparison_op() {
            self.advance();
            let right = self.term()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn peek_comparison_op(&self) -> Option<BinaryOp> {
        if let TokenKind::Op(op) = &self.peek().kind {
            return match op.as_str() {
                "==" => Some(BinaryOp::Equal),
                "!=" => Some(BinaryOp::NotEqual),
                "<" => Some(BinaryOp::Less),
                ">" => Some(BinaryOp::Greater),
                "<=" => Some(BinaryOp::LessEqual),
                ">=" => Some(BinaryOp::GreaterEqual),
                _ => None,
            };
        }
        None
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.factor()?;
        loop {
            let op = match &self.peek().kind {
                TokenKind::Op(o) if o == "+" => BinaryOp::Add,
                TokenKind::Op(o) if o == "-" => BinaryOp::Subtract,
                _ => break,
            };
            self.advance();
            let right = self.factor()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.unary()?;
        loop {
            let op = match &self.peek().kind {
                TokenKind::Op(o) if o == "*" => BinaryOp::Multiply,
                TokenKind::Op(o) if o == "/" => BinaryOp::Divide,
                TokenKind::Op(o) if o == "%" => BinaryOp::Modulo,
                _ => break,
            };
            self.advance();
            let right = self.unary()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        let op = match &self.peek().kind {
            TokenKind::Op(o) if o == "+" => Some(UnaryOp::Plus),
            TokenKind::Op(o) if o == "-" => Some(UnaryOp::Minus),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.unary()?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let line = self.line();
        match &self.peek().kind {
            TokenKind::Int(value) => {
                let value = *value;
                self.advance();
                Ok(Expr::Int(value))
            }
            TokenKind::Float(value) => {
                let value = *value;
                self.advance();
                Ok(Expr::Float(value))
            }
            TokenKind::Str(value) => {
                let value = value.clone();
                self.advance();
                Ok(Expr::Str(value))
            }
            TokenKind::Ident(name) => {
                match keyword_of(name) {
                    Some(Keyword::Dogru) => {
                        self.advance();
                        return Ok(Expr::Bool(true));
                    }
                    Some(Keyword::Yanlis) => {
                        self.advance();
                        return Ok(Expr::Bool(false));
                    }
                    _ => {}
                }
                let name = name.clone();
                self.advance();
                if self.match_op("(") {
                    let mut args = Vec::new();
                    if !self.match_op(")") {
                        loop {
                            args.push(self.expr()?);
                            if self.match_op(",") {
                                continue;
                            }
                            self.expect_op(")")?;
                            break;
                        }
                    }
                    return Ok(Expr::Call { name, args });
                }
                Ok(Expr::Var(name))
            }
            TokenKind::Op(o) if o == "(" => {
                self.advance();
                let expr = self.expr()?;
                self.expect_op(")")?;
                Ok(expr)
            }
            _ => Err(ParseError::UnexpectedExpr { line }),
        }
    }
}
