//! Forwarding of the log events emitted by this crate to a user-provided
//! callback.
use std::sync::{Arc, Mutex};

use log::{Level, Metadata, Record};
use once_cell::sync::Lazy;

/// Callback function type for the logging system. Such functions are called
/// with the level of the log event and the associated message every time a
/// log event is emitted in the code.
pub type LoggingCallback = Arc<dyn Fn(Level, &str) + Send + Sync>;

static GLOBAL_CALLBACK: Lazy<Mutex<Option<LoggingCallback>>> = Lazy::new(|| Mutex::new(None));

/// Implementation of `log::Log` that forward all log messages to the global
/// `LoggingCallback`.
struct CallbackLogger;

/// Set the given `callback` function as the global logging callback. This
/// function will be called on all log events. If a logging callback was
/// already set, it is replaced by the new one.
///
/// Debug messages are enabled in debug builds, and disabled in release
/// builds.
pub fn set_logging_callback<F>(callback: F) where F: Fn(Level, &str) + Send + Sync + 'static {
    *GLOBAL_CALLBACK.lock().expect("mutex was poisoned") = Some(Arc::new(callback));
    // we allow multiple sets of logger, therefore the result will be ignored
    let _ = log::set_boxed_logger(Box::new(CallbackLogger));

    if cfg!(debug_assertions) {
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Info);
    }
}

impl log::Log for CallbackLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        return true;
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("{} -- {}", record.target(), record.args());
            // release the lock before calling the callback, which might emit
            // log events itself
            let callback = GLOBAL_CALLBACK.lock().expect("mutex was poisoned").clone();
            if let Some(callback) = callback {
                callback(record.level(), &message);
            }
        }
    }

    fn flush(&self) {}
}
