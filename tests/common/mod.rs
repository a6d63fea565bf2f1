// Shared test harness: run Taylan source and capture everything it printed.
#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use taylan::interpreter::{Interpreter, ScriptError};

#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub fn capture_interpreter(base_dir: &Path) -> (Interpreter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let interpreter = Interpreter::with_writer(base_dir, Box::new(buffer.clone()));
    (interpreter, buffer)
}

/// Runs `source` in a fresh interpreter rooted at the current directory and
/// returns the outcome together with the captured print output.
pub fn run_capture(source: &str) -> (Result<(), ScriptError>, String) {
    let (mut interpreter, buffer) = capture_interpreter(Path::new("."));
    let result = interpreter.run(source);
    (result, buffer.contents())
}

/// Asserts the program runs cleanly and returns what it printed.
pub fn run_ok(source: &str) -> String {
    let (result, output) = run_capture(source);
    if let Err(error) = result {
        panic!("program basarisiz: {error}\ncikti: {output}");
    }
    output
}
