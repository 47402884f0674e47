#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` is a leveled, multi-transport logging facade for long-running
//! processes. Callers emit severity-tagged messages through per-level
//! methods; the facade filters them against a runtime-adjustable threshold,
//! redacts configured secrets from their arguments, and routes the rendered
//! result through either an interactive console or the system log facility.
//! Hierarchies of components get hierarchies of loggers: a child extends its
//! parent's prefix chain while inheriting transport and redaction
//! configuration.
//!
//! # Design
//!
//! The severity scale is a fixed six-level enum ([`Level`]), compared by
//! rank everywhere. Transport selection happens once, at construction, from
//! an explicit [`LoggerConfig`] — [`LoggerConfig::from_env`] is the single
//! place the process environment is consulted. Rendering and byte-level
//! transport concerns live in the `logging-sink` crate; this crate owns the
//! policy: what is admitted, what is redacted, and where it goes.
//!
//! Verbosity is live: one process-wide `SIGUSR2` subscription advances the
//! threshold of every logger instance, wrapping around at the end of the
//! scale. No restart, no acknowledgment.
//!
//! # Invariants
//!
//! - A message at rank *r* is emitted iff `r <= threshold`.
//! - A child's prefix chain is a copy; later changes to either logger never
//!   affect the other.
//! - Redaction applies to arguments only, never to the message template,
//!   and sanitizing sanitized output is a no-op.
//! - Construction never fails: an unreachable syslog device yields a logger
//!   whose transport is explicitly unavailable, not a panic or an error.
//!
//! # Examples
//!
//! Build a console logger, derive a child, and watch the threshold filter:
//!
//! ```
//! use logging::{Level, Logger, LoggerConfig, TransportKind};
//!
//! let config = LoggerConfig::default()
//!     .with_level(Level::Warn)
//!     .with_transport(TransportKind::Console)
//!     .with_prefix(["@app"]);
//! let log = Logger::new(config);
//!
//! assert_eq!(log.level(), Level::Warn);
//!
//! // Below the warn threshold: filtered before rendering.
//! log.info("not emitted", &[]);
//!
//! let child = log.child("core");
//! assert_eq!(child.prefix().render_plain(), "@app/core");
//! assert_eq!(log.prefix().render_plain(), "@app");
//! ```
//!
//! Cycling walks the scale in rank order and wraps:
//!
//! ```
//! use logging::{Level, Logger, LoggerConfig, TransportKind};
//!
//! let log = Logger::new(LoggerConfig::default().with_transport(TransportKind::Console));
//! assert_eq!(log.cycle_level(), Level::Debug);
//! for _ in 0..Level::COUNT - 1 {
//!     log.cycle_level();
//! }
//! assert_eq!(log.level(), Level::Debug);
//! ```

mod config;
mod control;
mod error;
mod levels;
mod logger;
mod prefix;
mod redact;
mod timer;

pub use config::{
    DEBUG_ENV, LINE_INFO_ENV, LOG_LEVEL_ENV, LOG_TRANSPORT_ENV, LoggerConfig, TransportKind,
};
pub use error::EmitError;
pub use levels::Level;
pub use logger::{ChildOptions, Logger};
pub use prefix::PrefixChain;
pub use redact::{REDACTED, RedactionRules};

pub use logging_sink::{ColorMode, SharedWriter};
#[cfg(unix)]
pub use logging_sink::syslog::{
    DEFAULT_SYSLOG_PATH, DEFAULT_SYSLOG_TAG, SyslogConfig, SyslogFacility,
};

// Structured log arguments are plain `serde_json` values; re-exported so
// callers need no direct dependency for the common case.
pub use serde_json::{Value, json};
