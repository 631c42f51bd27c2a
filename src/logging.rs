//! Browser console logging.
//!
//! Installs `console_log` as the `log` backend and the panic hook that
//! forwards Rust panics to `console.error`. Natively this is a no-op so
//! tests and native callers keep whatever logger they installed.

/// Initialize console logging at `level`. Safe to call more than once; only
/// the first call installs a logger.
pub fn init(level: log::Level) {
    #[cfg(feature = "browser")]
    {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(level).is_err() {
            log::set_max_level(level.to_level_filter());
        }
    }
    #[cfg(not(feature = "browser"))]
    {
        log::trace!("console logging unavailable outside the browser (level {level})");
    }
}
