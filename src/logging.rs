//! Logging macros that work on both the wasm bundle and the native CLI.
//!
//! | Macro | Enabled when | wasm32 | native |
//! |-------|--------------|--------|--------|
//! | `debug_log!` | debug build + `debug-hooks` feature | `console.debug` | `eprintln!` |
//! | `info_log!` | debug build | `console.info` | `eprintln!` |
//! | `warn_log!` | debug build | `console.warn` | `eprintln!` |
//! | `error_log!` | always | `console.error` | `eprintln!` |
//!
//! Disabled macros still type-check their arguments but format nothing, so a
//! release bundle carries no logging cost beyond `error_log!`.

#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-hooks", target_arch = "wasm32"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        ::web_sys::console::debug_1(&format!($($arg)*).into());
    }};
}

#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-hooks", not(target_arch = "wasm32")))]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        eprintln!("[DEBUG] {}", format!($($arg)*));
    }};
}

#[macro_export]
#[cfg(not(all(debug_assertions, feature = "debug-hooks")))]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        ::web_sys::console::info_1(&format!($($arg)*).into());
    }};
}

#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        eprintln!("[INFO] {}", format!($($arg)*));
    }};
}

#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        ::web_sys::console::warn_1(&format!($($arg)*).into());
    }};
}

#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        eprintln!("[WARN] {}", format!($($arg)*));
    }};
}

#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! error_log {
    ($($arg:tt)*) => {{
        ::web_sys::console::error_1(&format!($($arg)*).into());
    }};
}

#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! error_log {
    ($($arg:tt)*) => {{
        eprintln!("[ERROR] {}", format!($($arg)*));
    }};
}
