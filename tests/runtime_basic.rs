// Interpreter scenarios: arithmetic, control flow, functions, scoping, errors

mod common;

use std::path::Path;

use common::{capture_interpreter, run_capture, run_ok};
use taylan::interpreter::ErrorCode;

#[test]
fn arithmetic_scenario_prints_eight() {
    assert_eq!(run_ok("x = 2\ny = 3\nyazdir(x + y * 2)"), "8\n");
}

#[test]
fn conditional_scenario_prints_evet() {
    assert_eq!(run_ok("eger 1 > 0:\nyazdir(\"evet\")\nbitti"), "evet\n");
}

#[test]
fn flipped_conditional_prints_nothing() {
    assert_eq!(run_ok("eger 1 < 0:\nyazdir(\"evet\")\nbitti"), "");
}

#[test]
fn function_scenario_prints_five() {
    assert_eq!(
        run_ok("fonksiyon topla(a, b):\ndon a + b\nbitti\nyazdir(topla(2,3))"),
        "5\n"
    );
}

#[test]
fn interpreting_twice_is_deterministic() {
    let source = "i = 0\ndongu i < 3:\nyazdir(i)\ni = i + 1\nbitti";
    assert_eq!(run_ok(source), run_ok(source));
    assert_eq!(run_ok(source), "0\n1\n2\n");
}

#[test]
fn unbound_variable_names_the_identifier() {
    let (result, output) = run_capture("yazdir(tanimsiz)");
    let error = result.unwrap_err();
    assert_eq!(output, "", "hata oncesi cikti olmamali");
    assert_eq!(error.code, ErrorCode::Binding);
    assert!(
        error.message.contains("tanimsiz"),
        "mesaj degiskeni anmali: {}",
        error.message
    );
}

#[test]
fn unknown_function_is_a_binding_error() {
    let (result, _) = run_capture("hayalet(1)");
    let error = result.unwrap_err();
    assert_eq!(error.code, ErrorCode::Binding);
    assert!(error.message.contains("hayalet"));
}

#[test]
fn arity_mismatch_names_the_function() {
    let (result, _) = run_capture("fonksiyon topla(a, b):\ndon a + b\nbitti\ntopla(1)");
    let error = result.unwrap_err();
    assert_eq!(error.code, ErrorCode::Arity);
    assert!(error.message.contains("topla"));
}

#[test]
fn zero_parameter_function_returns_its_last_return() {
    assert_eq!(run_ok("fonksiyon sabit():\ndon 42\nbitti\nyazdir(sabit())"), "42\n");
}

#[test]
fn falling_off_the_end_yields_the_absent_value() {
    assert_eq!(
        run_ok("fonksiyon bos():\nx = 1\nbitti\nyazdir(bos())"),
        "yok\n"
    );
}

#[test]
fn top_level_return_stops_execution_cleanly() {
    let (result, output) = run_capture("yazdir(\"bir\")\ndon 5\nyazdir(\"iki\")");
    assert!(result.is_ok(), "top-level don hata degil: {result:?}");
    assert_eq!(output, "bir\n");
}

#[test]
fn return_unwinds_only_to_the_call_boundary() {
    let source = "fonksiyon sec(n):\neger n > 0:\ndon \"arti\"\nbitti\ndon \"eksi\"\nbitti\nyazdir(sec(1))\nyazdir(sec(0))";
    assert_eq!(run_ok(source), "arti\neksi\n");
}

#[test]
fn while_loop_reevaluates_its_condition() {
    assert_eq!(
        run_ok("toplam = 0\ni = 1\ndongu i <= 4:\ntoplam = toplam + i\ni = i + 1\nbitti\nyazdir(toplam)"),
        "10\n"
    );
}

#[test]
fn calls_see_globals_but_writes_stay_local() {
    let source = "sayi = 10\nfonksiyon oku():\ndon sayi\nbitti\nfonksiyon yaz():\nsayi = 99\ndon sayi\nbitti\nyazdir(oku())\nyazdir(yaz())\nyazdir(sayi)";
    assert_eq!(run_ok(source), "10\n99\n10\n");
}

#[test]
fn parameters_shadow_globals() {
    let source = "x = 1\nfonksiyon f(x):\ndon x + 1\nbitti\nyazdir(f(5))\nyazdir(x)";
    assert_eq!(run_ok(source), "6\n1\n");
}

#[test]
fn globals_persist_across_runs_on_one_instance() {
    let (mut interpreter, buffer) = capture_interpreter(Path::new("."));
    interpreter.run("sayac = 41").unwrap();
    interpreter.run("yazdir(sayac + 1)").unwrap();
    assert_eq!(buffer.contents(), "42\n");
}

#[test]
fn division_is_floating_point() {
    assert_eq!(run_ok("yazdir(7 / 2)"), "3.5\n");
}

#[test]
fn division_by_zero_is_fatal() {
    let (result, _) = run_capture("yazdir(1 / 0)");
    assert_eq!(result.unwrap_err().code, ErrorCode::Runtime);
}

#[test]
fn strings_concatenate_with_plus() {
    assert_eq!(run_ok("ad = \"tay\"\nyazdir(ad + \"lan\")"), "taylan\n");
}

#[test]
fn print_space_joins_its_arguments() {
    assert_eq!(run_ok("yazdir(1, \"iki\", 3.5, dogru)"), "1 iki 3.5 dogru\n");
}

#[test]
fn truthiness_follows_the_value_model() {
    let source = "eger 0:\nyazdir(\"a\")\nbitti\neger \"\":\nyazdir(\"b\")\nbitti\neger 2:\nyazdir(\"c\")\nbitti";
    assert_eq!(run_ok(source), "c\n");
}

#[test]
fn logical_operators_return_booleans() {
    assert_eq!(
        run_ok("yazdir(dogru ve yanlis)\nyazdir(dogru veya yanlis)\nyazdir(degil 0)"),
        "yanlis\ndogru\ndogru\n"
    );
}

#[test]
fn accented_spellings_run_like_ascii() {
    assert_eq!(
        run_ok("eğer 1 > 0:\nyazdır(\"tamam\")\nbitti"),
        "tamam\n"
    );
    assert_eq!(
        run_ok("fonksiyon f():\ndön 3\nbitti\nyazdır(f())"),
        "3\n"
    );
}

#[test]
fn comments_are_ignored() {
    assert_eq!(run_ok("# bu bir yorum\nyazdir(1) # satir sonu yorumu"), "1\n");
}

#[test]
fn function_redefinition_overwrites_silently() {
    assert_eq!(
        run_ok("fonksiyon f():\ndon 1\nbitti\nfonksiyon f():\ndon 2\nbitti\nyazdir(f())"),
        "2\n"
    );
}
