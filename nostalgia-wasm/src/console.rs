use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

/// Forwards `log` records to the browser console.
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
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            _ => console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Installs the console logger once; later calls only change the level.
///
/// Returns `false` when another logger was already in place.
pub(crate) fn install(level: LevelFilter) -> bool {
    log::set_max_level(level);
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("a logger is already installed, keeping it");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_keeps_logger_and_updates_level() {
        install(LevelFilter::Warn);
        assert!(!install(LevelFilter::Info));
        assert_eq!(log::max_level(), LevelFilter::Info);
    }
}
