//! crates/logging/src/error.rs
//! Emission failures surfaced by the facade.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why an admitted message could not be emitted.
///
/// Severity filtering is not an error: a dropped message is a successful
/// no-op. These variants only cover messages that passed the threshold and
/// then failed to reach their transport.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The logger was configured for syslog but no connection could be
    /// established at construction. The instance stays usable; every
    /// admitted emission reports this error until a new logger is built.
    #[error("syslog transport unavailable: tag {tag:?}, path {}", path.display())]
    SyslogUnavailable {
        /// Tag the connection would have carried.
        tag: String,
        /// Device path the connection was aimed at.
        path: PathBuf,
    },
    /// The transport accepted the message but the underlying write failed.
    #[error("transport write failed: {0}")]
    Transport(#[from] io::Error),
}
