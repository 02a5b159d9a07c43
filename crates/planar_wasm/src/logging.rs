//! Routes `tracing` events to the browser console.

use std::io;
use tracing_subscriber::EnvFilter;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log(s: &str);
}

/// Buffers one formatted event and hands each line to `sink` on flush or
/// drop.
pub(crate) struct ConsoleWriter {
    buffer: Vec<u8>,
    sink: fn(&str),
}

impl ConsoleWriter {
    pub(crate) fn with_sink(sink: fn(&str)) -> Self {
        Self {
            buffer: Vec::new(),
            sink,
        }
    }

    fn console() -> Self {
        Self::with_sink(console_log)
    }

    fn emit(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buffer);
        for line in text.lines().filter(|line| !line.is_empty()) {
            (self.sink)(line);
        }
        self.buffer.clear();
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.emit();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        self.emit();
    }
}

/// Installs a global subscriber printing to `console.log`. `filter` takes
/// `EnvFilter` directives, e.g. `"debug"` or `"planar_wasm=trace"`.
#[wasm_bindgen]
pub fn init_logging(filter: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let filter = EnvFilter::try_new(filter)
        .map_err(|e| JsValue::from_str(&format!("Invalid log filter: {}", e)))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(ConsoleWriter::console)
        .without_time()
        .with_ansi(false)
        .try_init()
        .map_err(|e| JsValue::from_str(&format!("Logging already initialized: {}", e)))
}
