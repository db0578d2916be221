//! `log` backend that writes to the browser console.
//!
//! The core crate logs through the `log` facade; installing this logger
//! routes those records to `console.debug` / `info` / `warn` / `error`.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format_record(record));
        match record.level() {
            Level::Error => console::error_1(&message),
            Level::Warn => console::warn_1(&message),
            Level::Info => console::info_1(&message),
            Level::Debug | Level::Trace => console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    format!("[{}] {}", record.target(), record.args())
}

/// Install the console logger. Calling it again only changes the level.
pub(crate) fn init(level: LevelFilter) {
    // set_logger fails when a logger is already installed; keep that one
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_record() {
        let formatted = format_record(
            &Record::builder()
                .args(format_args!("loaded {}x{} image", 4, 3))
                .level(Level::Info)
                .target("retouch_core::session")
                .build(),
        );
        assert_eq!(formatted, "[retouch_core::session] loaded 4x3 image");
    }
}
