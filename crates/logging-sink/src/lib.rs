#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides the transport primitives underneath the `logging`
//! facade: a leveled console binding, deterministic color assignment for
//! severity tags and prefix segments, printf-style placeholder substitution
//! for log arguments, and a datagram client speaking the conventional
//! syslog(3) priority framing.
//!
//! # Design
//!
//! The crate deliberately knows nothing about severity scales, thresholds, or
//! logger hierarchies. It receives fully decided work: a console method to
//! dispatch on, a rendered line, or a syslog severity plus a formatted
//! message. The facade crate owns every policy decision; this crate owns the
//! bytes.
//!
//! # Invariants
//!
//! - [`ConsoleSink`] routes `error`/`warn` output to stderr and everything
//!   else to stdout, unless an injected writer overrides both streams.
//! - Color never reaches a non-terminal target under [`ColorMode::Auto`].
//! - The syslog wire payload is `<facility*8+severity>tag [label]: message`,
//!   byte-exact, because downstream collectors parse it.
//!
//! # Errors
//!
//! All fallible operations surface [`std::io::Error`] values from the
//! underlying stream or socket unchanged.
//!
//! # Examples
//!
//! Substitute arguments into a message template:
//!
//! ```
//! use logging_sink::format::substitute;
//! use serde_json::json;
//!
//! let line = substitute("listening on %s (%d workers)", &[json!("0.0.0.0:80"), json!(4)]);
//! assert_eq!(line, "listening on 0.0.0.0:80 (4 workers)");
//! ```

pub mod color;
mod console;
pub mod format;
#[cfg(unix)]
pub mod syslog;

pub use console::{ColorMode, ConsoleMethod, ConsoleSink, SharedWriter};
