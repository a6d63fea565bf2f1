// Stdlib builtin modules and the package registry consumed by imports

mod common;

use std::fs;
use std::path::Path;

use common::{capture_interpreter, run_capture, run_ok};
use taylan::interpreter::{ErrorCode, Value};
use taylan::modules::{registry_path, ModuleError, PackageRegistry};

#[test]
fn tmath_exports_become_global_builtins() {
    assert_eq!(run_ok("dahil tmath\nyazdir(mat_topla(2, 3))"), "5\n");
    assert_eq!(run_ok("dahil tmath\nyazdir(mat_kok(9))"), "3\n");
    assert_eq!(run_ok("dahil tmath\nyazdir(mat_us(2, 10))"), "1024\n");
}

#[test]
fn builtins_are_unavailable_before_import() {
    let (result, _) = run_capture("yazdir(mat_topla(2, 3))");
    assert_eq!(result.unwrap_err().code, ErrorCode::Binding);
}

#[test]
fn import_binds_a_module_marker() {
    let (mut interpreter, _) = capture_interpreter(Path::new("."));
    interpreter.run("dahil tmath").unwrap();
    assert_eq!(
        interpreter.get_global("tmath"),
        Some(&Value::Module("tmath".into()))
    );
}

#[test]
fn tcore_string_helpers() {
    assert_eq!(run_ok("dahil tcore\nyazdir(metin_uzunluk(\"merhaba\"))"), "7\n");
    assert_eq!(
        run_ok("dahil tcore\nyazdir(metin_alt(\"taylan\", 0, 3))"),
        "tay\n"
    );
    assert_eq!(
        run_ok("dahil tcore\nyazdir(metin_bul(\"taylan\", \"lan\"))"),
        "3\n"
    );
    assert_eq!(
        run_ok("dahil tcore\nyazdir(metin_degistir(\"aaa\", \"a\", \"b\"))"),
        "bbb\n"
    );
    assert_eq!(run_ok("dahil tcore\nyazdir(sayi(\" 2.7 \"))"), "2\n");
    assert_eq!(run_ok("dahil tcore\nyazdir(metin(42))"), "42\n");
}

#[test]
fn tcore_length_counts_characters_not_bytes() {
    assert_eq!(run_ok("dahil tcore\nyazdir(metin_uzunluk(\"ağaç\"))"), "4\n");
}

#[test]
fn tcore_reads_and_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("veri.txt");
    let source = format!(
        "dahil tcore\ndosya_yaz(\"{0}\", \"icerik\")\nyazdir(dosya_oku(\"{0}\"))",
        path.display()
    );
    assert_eq!(run_ok(&source), "icerik\n");
}

#[test]
fn tgame_draws_boxes() {
    assert_eq!(run_ok("dahil tgame\nyazdir(kutu(4, 3))"), "+--+\n|  |\n+--+\n");
    assert_eq!(run_ok("dahil tgame\nyazdir(kutu(1, 1))"), "\n");
}

#[test]
fn timg_builds_ppm_documents() {
    let output = run_ok("dahil timg\nyazdir(ppm_olustur(2, 1, 255, 0, 0))");
    assert!(output.starts_with("P3\n2 1\n255\n"), "{output}");
    assert_eq!(output.matches("255 0 0").count(), 2, "{output}");
}

#[test]
fn tlog_appends_timestamped_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("uygulama.log");
    let source = format!(
        "dahil tlog\nlog_yaz(\"{0}\", \"basladi\")\nlog_hata(\"{0}\", \"patladi\")",
        path.display()
    );
    run_ok(&source);
    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("basladi"), "{text}");
    assert!(lines[1].contains("HATA: patladi"), "{text}");
}

#[test]
fn builtin_arity_errors_name_the_builtin() {
    let (result, _) = run_capture("dahil tmath\nyazdir(mat_topla(1))");
    let error = result.unwrap_err();
    assert_eq!(error.code, ErrorCode::Arity);
    assert!(error.message.contains("mat_topla"), "{}", error.message);
}

#[test]
fn missing_registry_is_its_own_error() {
    let dir = tempfile::tempdir().unwrap();
    let (mut interpreter, _) = capture_interpreter(dir.path());
    let error = interpreter.run("dahil bilinmeyen_paket").unwrap_err();
    assert_eq!(error.code, ErrorCode::Binding);
    assert!(
        error.message.contains("Paket kaydi yok"),
        "{}",
        error.message
    );
}

#[test]
fn registry_without_the_module_reports_not_installed() {
    let dir = tempfile::tempdir().unwrap();
    let path = registry_path(dir.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{"sql": {"source": "lib/sql", "installed": true}}"#).unwrap();

    let (mut interpreter, _) = capture_interpreter(dir.path());
    let error = interpreter.run("dahil baska_paket").unwrap_err();
    assert!(
        error.message.contains("Modul kurulu degil: baska_paket"),
        "{}",
        error.message
    );
}

#[test]
fn installed_module_import_binds_a_marker() {
    let dir = tempfile::tempdir().unwrap();
    let path = registry_path(dir.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{"sql": {"source": "lib/sql", "installed": true}}"#).unwrap();

    let (mut interpreter, _) = capture_interpreter(dir.path());
    interpreter.run("dahil sql").unwrap();
    assert_eq!(
        interpreter.get_global("sql"),
        Some(&Value::Module("sql".into()))
    );
}

#[test]
fn registry_reads_entries_directly() {
    let dir = tempfile::tempdir().unwrap();
    let path = registry_path(dir.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        r#"{"ml": {"source": "lib/ml/mlpack-master", "installed": true}}"#,
    )
    .unwrap();

    let registry = PackageRegistry::load(dir.path()).unwrap();
    let entry = registry.resolve("ml").unwrap();
    assert_eq!(entry.source, "lib/ml/mlpack-master");
    assert!(entry.installed);
    assert!(matches!(
        registry.resolve("yok"),
        Err(ModuleError::NotInstalled { .. })
    ));
}

#[test]
fn malformed_registry_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = registry_path(dir.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "bu json degil").unwrap();
    assert!(matches!(
        PackageRegistry::load(dir.path()),
        Err(ModuleError::Malformed { .. })
    ));
}

#[test]
fn accent_insensitive_builtin_calls() {
    // The builtin table stores normalized names; the call site may use
    // accented spellings.
    assert_eq!(run_ok("dahil tcore\nyazdir(metin_kırp(\" ab \"))"), "ab\n");
}
