// The host entry point behind the selfhost command: load source, then invoke
// a named function with host values and take its result.

mod common;

use std::path::Path;

use common::capture_interpreter;
use taylan::interpreter::{RuntimeError, Value};

#[test]
fn invokes_a_loaded_function_with_host_values() {
    let (mut interpreter, _) = capture_interpreter(Path::new("."));
    interpreter
        .run("fonksiyon topla(a, b):\ndon a + b\nbitti")
        .unwrap();
    let result = interpreter
        .call_function("topla", vec![Value::Int(2), Value::Int(3)])
        .unwrap();
    assert_eq!(result, Value::Int(5));
}

#[test]
fn string_arguments_flow_through() {
    let (mut interpreter, _) = capture_interpreter(Path::new("."));
    interpreter
        .run("fonksiyon selam(ad):\ndon \"merhaba \" + ad\nbitti")
        .unwrap();
    let result = interpreter
        .call_function("selam", vec![Value::Str("dunya".into())])
        .unwrap();
    assert_eq!(result, Value::Str("merhaba dunya".into()));
}

#[test]
fn unknown_function_is_reported_by_name() {
    let (mut interpreter, _) = capture_interpreter(Path::new("."));
    let error = interpreter.call_function("yok_boyle", vec![]).unwrap_err();
    match error {
        RuntimeError::UnknownFunction(name) => assert_eq!(name, "yok_boyle"),
        other => panic!("bilinmeyen fonksiyon hatasi beklenirdi: {other:?}"),
    }
}

#[test]
fn arity_is_checked_before_execution() {
    let (mut interpreter, buffer) = capture_interpreter(Path::new("."));
    interpreter
        .run("fonksiyon tek(a):\nyazdir(a)\ndon a\nbitti")
        .unwrap();
    let error = interpreter.call_function("tek", vec![]).unwrap_err();
    assert!(matches!(error, RuntimeError::ArityMismatch { .. }));
    assert_eq!(buffer.contents(), "", "govde calismamis olmali");
}

#[test]
fn function_without_return_yields_unit() {
    let (mut interpreter, _) = capture_interpreter(Path::new("."));
    interpreter.run("fonksiyon bos():\nx = 1\nbitti").unwrap();
    let result = interpreter.call_function("bos", vec![]).unwrap();
    assert_eq!(result, Value::Unit);
}
