/// Logs a message the first time this call site is reached.
#[macro_export]
macro_rules! log_once {
    ($lvl:expr, $($arg:tt)+) => {{
        static ONCE: std::sync::Once = std::sync::Once::new();
        ONCE.call_once(|| log::log!($lvl, $($arg)+));
    }};
}

#[macro_export]
macro_rules! warn_once {
    ($($arg:tt)+) => ($crate::log_once!(log::Level::Warn, $($arg)+));
}

#[macro_export]
macro_rules! error_once {
    ($($arg:tt)+) => ($crate::log_once!(log::Level::Error, $($arg)+));
}

pub use error_once;
pub use log_once;
pub use warn_once;
