#![forbid(unsafe_code)]

//! Browser console plumbing: panic hook and `tracing` output.

use std::io;

use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Call `console.<method>(msg)` if the host has it.
fn console_call(method: &str, msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(func) = Reflect::get(&console, &method.into()) else {
        return;
    };
    let Ok(func) = func.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = func.call1(&console, &JsValue::from_str(msg));
}

pub(crate) fn console_error(msg: &str) {
    console_call("error", msg);
}

pub(crate) fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

/// Route `tracing` events to the console. Safe to call more than once.
pub(crate) fn install_logging() {
    let _ = tracing_subscriber::fmt()
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .with_max_level(tracing::Level::INFO)
        .with_writer(ConsoleWriter::default)
        .try_init();
}

/// Buffers one formatted event and emits it on drop.
#[derive(Default)]
struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buf);
        let line = text.trim_end();
        let method = if line.starts_with("ERROR") {
            "error"
        } else if line.starts_with(" WARN") || line.starts_with("WARN") {
            "warn"
        } else {
            "log"
        };
        console_call(method, line);
    }
}
