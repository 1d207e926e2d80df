//! Output macros for user-facing text.
//!
//! Command output goes to stdout through `uber_println!`; status lines
//! (success, info, warnings, errors) go to stderr so they never mix with
//! output meant for piping.

#[macro_export]
macro_rules! uber_println {
    () => {
        println!();
    };
    ($($arg:tt)*) => {
        println!("{}", format!($($arg)*));
    }
}

#[macro_export]
macro_rules! uber_error {
    ($($arg:tt)*) => {
        eprintln!("{}", format!($($arg)*));
    }
}

#[macro_export]
macro_rules! uber_success {
    ($($arg:tt)*) => {
        eprintln!("{}", format!($($arg)*));
    };
}

#[macro_export]
macro_rules! uber_info {
    ($($arg:tt)*) => {
        eprintln!("ℹ {}", format!($($arg)*));
    };
}

#[macro_export]
macro_rules! uber_warning {
    ($($arg:tt)*) => {
        eprintln!("⚠ {}", format!($($arg)*));
    };
}

#[macro_export]
macro_rules! uber_progress {
    ($($arg:tt)*) => {
        eprintln!("▶ {}", format!($($arg)*));
    };
}
