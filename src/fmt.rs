//! Diagnostic output shims.
//!
//! With the `esp32-log` feature the messages go through `esp-println`;
//! without it they compile to nothing. Format arguments are still consumed
//! so callers do not grow unused-variable warnings in silent builds.

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "esp32-log")]
        ::esp_println::println!(concat!("[ledbutton] ", $s) $(, $x)*);
        #[cfg(not(feature = "esp32-log"))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "esp32-log")]
        ::esp_println::println!(concat!("[ledbutton] warning: ", $s) $(, $x)*);
        #[cfg(not(feature = "esp32-log"))]
        let _ = ($( & $x ),*);
    }};
}
