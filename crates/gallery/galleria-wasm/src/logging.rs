//! `log` backend that writes to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = debug)]
    fn console_debug(s: &str);
    #[wasm_bindgen(js_namespace = console, js_name = info)]
    fn console_info(s: &str);
    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(s: &str);
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(s: &str);
}

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
        let line = format!("[{}] {}", record.target(), record.args());
        match record.level() {
            Level::Error => console_error(&line),
            Level::Warn => console_warn(&line),
            Level::Info => console_info(&line),
            Level::Debug | Level::Trace => console_debug(&line),
        }
    }

    fn flush(&self) {}
}

/// Parse a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
/// `None` selects `info`.
pub fn parse_level(level: Option<&str>) -> Result<LevelFilter, String> {
    match level {
        None => Ok(LevelFilter::Info),
        Some(s) => s
            .parse::<LevelFilter>()
            .map_err(|_| format!("unknown log level '{s}'")),
    }
}

/// Route `log` records to the console at `level`. Calling again only
/// changes the level.
#[wasm_bindgen]
pub fn init_logging(level: Option<String>) -> Result<(), JsError> {
    let filter =
        parse_level(level.as_deref()).map_err(|e| JsError::new(&format!("init_logging: {e}")))?;
    // a logger may already be installed by an earlier call
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(filter);
    Ok(())
}
