//=====================================================
// File: tokenizer/mod.rs
//=====================================================
// Author: Taylan Contributors
// License: MIT
// Goal: Taylan lexer implementation
// Objective: Convert raw source text into the flat token stream consumed by
//            the parser, with locale-aware identifier handling
//=====================================================

use std::fmt;

/// Line/column location of a token in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Newline,
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    Op(String),
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    pub fn line(&self) -> usize {
        self.position.line
    }
}

/// Tokenizer error types
#[derive(Debug, Clone, PartialEq)]
pub enum TokenizeError {
    UnterminatedString { line: usize },
    UnknownChar { ch: char, line: usize },
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizeError::UnterminatedString { line } => {
                write!(f, "String kapanmadı (satır {line})")
            }
            TokenizeError::UnknownChar { ch, line } => {
                write!(f, "Bilinmeyen karakter: {ch} (satır {line})")
            }
        }
    }
}

impl std::error::Error for TokenizeError {}

/// Maps the Turkish letter variants to their closest ASCII equivalent so that
/// keyword and builtin-name comparison is accent-insensitive. Already-ASCII
/// input passes through unchanged.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .map(|ch| match ch {
            'ı' | 'İ' => 'i',
            'ğ' | 'Ğ' => 'g',
            'ü' | 'Ü' => 'u',
            'ş' | 'Ş' => 's',
            'ö' | 'Ö' => 'o',
            'ç' | 'Ç' => 'c',
            other => other,
        })
        .collect()
}

/// Strips a UTF-8 byte-order mark left behind by Windows editors.
pub fn strip_bom(source: &str) -> &str {
    source.strip_prefix('\u{feff}').unwrap_or(source)
}

const SINGLE_OPS: &str = "+-*/%=()<>:,";

pub struct Tokenizer {
    source: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Tokenizer {
    pub fn new(source: &str) -> Self {
        Self {
            source: strip_bom(source).chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    fn peek(&self) -> char {
        self.source.get(self.pos).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.source.get(self.pos + 1).copied().unwrap_or('\0')
    }

    fn advance(&mut self) -> char {
        let ch = self.peek();
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        ch
    }

    fn push(&mut self, kind: TokenKind, line: usize, column: usize) {
        self.tokens.push(Token {
            kind,
            position: Position { line, column },
        });
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, TokenizeError> {
        while self.pos < self.source.len() {
            let ch = self.peek();
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
                continue;
            }
            if ch == '#' {
                while self.peek() != '\n' && self.peek() != '\0' {
                    self.advance();
                }
                continue;
            }
            if ch == '\n' {
                let (line, column) = (self.line, self.column);
                self.advance();
                self.push(TokenKind::Newline, line, column);
                continue;
            }
            if ch.is_ascii_digit() {
                self.lex_number();
                continue;
            }
            if ch == '"' {
                self.lex_string()?;
                continue;
            }
            if ch.is_alphabetic() || ch == '_' {
                self.lex_ident();
                continue;
            }

            let (line, column) = (self.line, self.column);
            let two: String = [ch, self.peek_next()].iter().collect();
            if matches!(two.as_str(), "==" | "!=" | "<=" | ">=") {
                self.advance();
                self.advance();
                self.push(TokenKind::Op(two), line, column);
                continue;
            }
            if SINGLE_OPS.contains(ch) {
                self.advance();
                self.push(TokenKind::Op(ch.to_string()), line, column);
                continue;
            }
            return Err(TokenizeError::UnknownChar { ch, line });
        }

        let (line, column) = (self.line, self.column);
        self.push(TokenKind::Eof, line, column);
        Ok(self.tokens)
    }

    fn lex_number(&mut self) {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        while self.peek().is_ascii_digit() {
            text.push(self.advance());
        }
        if self.peek() == '.' {
            text.push(self.advance());
            while self.peek().is_ascii_digit() {
                text.push(self.advance());
            }
            let value: f64 = text.parse().unwrap_or(0.0);
            self.push(TokenKind::Float(value), line, column);
        } else {
            // Literals beyond the integer range degrade to floats.
            match text.parse::<i64>() {
                Ok(value) => self.push(TokenKind::Int(value), line, column),
                Err(_) => {
                    let value: f64 = text.parse().unwrap_or(0.0);
                    self.push(TokenKind::Float(value), line, column);
                }
            }
        }
    }

    fn lex_string(&mut self) -> Result<(), TokenizeError> {
        let (line, column) = (self.line, self.column);
        self.advance();
        let mut text = String::new();
        while self.peek() != '\0' && self.peek() != '\n' && self.peek() != '"' {
            text.push(self.advance());
        }
        if self.peek() != '"' {
            return Err(TokenizeError::UnterminatedString { line });
        }
        self.advance();
        self.push(TokenKind::Str(text), line, column);
        Ok(())
    }

    fn lex_ident(&mut self) {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        while self.peek().is_alphanumeric() || self.peek() == '_' {
            text.push(self.advance());
        }
        self.push(TokenKind::Ident(text), line, column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Tokenizer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn numbers_distinguish_int_and_float() {
        assert_eq!(
            kinds("3 2.5"),
            vec![TokenKind::Int(3), TokenKind::Float(2.5), TokenKind::Eof]
        );
    }

    #[test]
    fn two_char_operators_win_over_single() {
        assert_eq!(
            kinds("<= == = <"),
            vec![
                TokenKind::Op("<=".into()),
                TokenKind::Op("==".into()),
                TokenKind::Op("=".into()),
                TokenKind::Op("<".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        assert_eq!(
            kinds("# yorum satiri\nx"),
            vec![
                TokenKind::Newline,
                TokenKind::Ident("x".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_string_reports_line() {
        let err = Tokenizer::new("a = 1\nb = \"acik").tokenize().unwrap_err();
        assert_eq!(err, TokenizeError::UnterminatedString { line: 2 });
    }

    #[test]
    fn unknown_char_is_fatal() {
        let err = Tokenizer::new("x = 1 @").tokenize().unwrap_err();
        assert_eq!(err, TokenizeError::UnknownChar { ch: '@', line: 1 });
    }

    #[test]
    fn turkish_letters_stay_in_identifiers() {
        assert_eq!(
            kinds("yazdır"),
            vec![TokenKind::Ident("yazdır".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn normalization_is_idempotent_on_ascii() {
        assert_eq!(normalize_name("yazdir"), "yazdir");
        assert_eq!(normalize_name(&normalize_name("değil")), "degil");
        assert_eq!(normalize_name("İĞÜŞÖÇ"), "igusoc");
    }
}
