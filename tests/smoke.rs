// Taylan smoke tests for tokenizer and parser
// Covers: arithmetic precedence, assignment lookahead, block grammar, imports

use taylan::ast::{BinaryOp, Expr, Stmt};
use taylan::parser::{ParseError, Parser};
use taylan::tokenizer::Tokenizer;

fn tokenize_and_parse(source: &str) -> Result<taylan::ast::Program, ParseError> {
    let tokens = Tokenizer::new(source).tokenize().unwrap();
    Parser::new(tokens).parse()
}

fn parse_ok(source: &str) -> taylan::ast::Program {
    tokenize_and_parse(source).unwrap_or_else(|err| panic!("parse hatasi: {err}"))
}

#[test]
fn precedence_multiplication_binds_tighter() {
    let program = parse_ok("x = 2 + 3 * 4");
    match &program.body[0] {
        Stmt::Assign { name, value } => {
            assert_eq!(name, "x");
            match value {
                Expr::Binary { op, right, .. } => {
                    assert_eq!(*op, BinaryOp::Add);
                    assert!(
                        matches!(**right, Expr::Binary { op: BinaryOp::Multiply, .. }),
                        "carpim sag tarafta beklenirdi, bulunan: {right:?}"
                    );
                }
                other => panic!("binary beklenirdi, bulunan: {other:?}"),
            }
        }
        other => panic!("atama beklenirdi, bulunan: {other:?}"),
    }
}

#[test]
fn assignment_needs_the_equals_lookahead() {
    // `x = 1` is an assignment, a bare `x` on the next line is an expression.
    let program = parse_ok("x = 1\nx");
    assert!(matches!(program.body[0], Stmt::Assign { .. }));
    assert!(matches!(program.body[1], Stmt::Expr(Expr::Var(_))));
}

#[test]
fn print_call_keeps_every_argument() {
    let program = parse_ok("yazdir(1, 2, 3)");
    match &program.body[0] {
        Stmt::Expr(Expr::Call { name, args }) => {
            assert_eq!(name, "yazdir");
            assert_eq!(args.len(), 3);
        }
        other => panic!("cagri beklenirdi, bulunan: {other:?}"),
    }
}

#[test]
fn if_else_blocks_terminate_with_bitti() {
    let program = parse_ok("eger 1 > 0:\nyazdir(\"evet\")\ndegilse:\nyazdir(\"hayir\")\nbitti");
    match &program.body[0] {
        Stmt::If {
            then_body,
            else_body,
            ..
        } => {
            assert_eq!(then_body.len(), 1);
            assert_eq!(else_body.as_ref().map(Vec::len), Some(1));
        }
        other => panic!("kosul beklenirdi, bulunan: {other:?}"),
    }
}

#[test]
fn trailing_newline_after_bitti_is_optional() {
    assert!(tokenize_and_parse("eger 1:\nyazdir(1)\nbitti").is_ok());
    assert!(tokenize_and_parse("eger 1:\nyazdir(1)\nbitti\n").is_ok());
}

#[test]
fn accented_keywords_parse_like_ascii_ones() {
    let program = parse_ok("eğer 1:\nyazdır(\"tamam\")\nbitti\ndöngü 0:\nbitti");
    assert!(matches!(program.body[0], Stmt::If { .. }));
    assert!(matches!(program.body[1], Stmt::While { .. }));
}

#[test]
fn import_accepts_identifier_or_string() {
    let program = parse_ok("dahil tmath\ndahil \"paket_adi\"");
    assert_eq!(program.body[0], Stmt::Import("tmath".into()));
    assert_eq!(program.body[1], Stmt::Import("paket_adi".into()));
}

#[test]
fn bare_else_is_a_syntax_error() {
    let err = tokenize_and_parse("degilse").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedKeyword { .. }));
}

#[test]
fn missing_terminator_reports_bitti() {
    let err = tokenize_and_parse("dongu 1:\nyazdir(1)").unwrap_err();
    assert!(matches!(err, ParseError::ExpectedTerminator { .. }));
}

#[test]
fn unterminated_function_is_its_own_error() {
    let err = tokenize_and_parse("fonksiyon f(a):\nyazdir(a)").unwrap_err();
    match err {
        ParseError::UnterminatedFunction { name, .. } => assert_eq!(name, "f"),
        other => panic!("fonksiyon hatasi beklenirdi, bulunan: {other:?}"),
    }
}

#[test]
fn statement_must_start_with_an_identifier() {
    let err = tokenize_and_parse("5 + 3").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedStatement { .. }));
}

#[test]
fn return_without_value_parses_bare() {
    let program = parse_ok("fonksiyon f():\ndon\nbitti");
    match &program.body[0] {
        Stmt::FunctionDecl(decl) => {
            assert_eq!(decl.body, vec![Stmt::Return(None)]);
        }
        other => panic!("fonksiyon beklenirdi, bulunan: {other:?}"),
    }
}

#[test]
fn comparison_chains_left_associatively() {
    let program = parse_ok("x = 1 < 2 < 3");
    match &program.body[0] {
        Stmt::Assign { value, .. } => match value {
            Expr::Binary { left, op, .. } => {
                assert_eq!(*op, BinaryOp::Less);
                assert!(matches!(**left, Expr::Binary { op: BinaryOp::Less, .. }));
            }
            other => panic!("binary beklenirdi, bulunan: {other:?}"),
        },
        other => panic!("atama beklenirdi, bulunan: {other:?}"),
    }
}
