//! # Logging Module
//!
//! This module provides logging utilities for the headerfence tool, including:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - `tracing` subscriber setup for internal diagnostics
//!
//! Verbose logs go to stderr and info logs go to stdout for better pipeline
//! integration.
//!
//! ## Example
//!
//! ```rust
//! use headerfence::logging::{ColorMode, set_verbose};
//! use headerfence::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Auto.apply();
//!
//! // Goes to stderr
//! verbose_log!("Processing file: {}", "index.ts");
//!
//! // Goes to stdout
//! info_log!("Header inserted into: {}", "index.ts");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info message, in yellow when colors are enabled.
///
/// Used by the [`info_log!`] macro.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
