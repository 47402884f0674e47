//! crates/logging/src/levels.rs
//! The fixed severity scale and its rank arithmetic.

use std::fmt;

use logging_sink::ConsoleMethod;
#[cfg(unix)]
use logging_sink::syslog::SyslogSeverity;

/// Message severity, most severe first.
///
/// Position in the scale is the severity's rank (0 = most severe); every
/// comparison in the facade goes through ranks, never through names. The
/// scale is fixed for the life of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Failures.
    Error,
    /// Conditions worth surfacing that are not failures.
    Warn,
    /// Routine operational messages.
    Info,
    /// Diagnostic detail.
    Debug,
    /// Fine-grained control flow.
    Trace,
    /// Everything else.
    Silly,
}

impl Level {
    /// Every level, in rank order.
    pub const ALL: [Self; 6] = [
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::Trace,
        Self::Silly,
    ];

    /// Length of the severity scale.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns this level's rank.
    #[must_use]
    pub const fn rank(self) -> usize {
        self as usize
    }

    /// Returns the level at `rank`, or `None` beyond the scale.
    #[must_use]
    pub const fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(Self::Error),
            1 => Some(Self::Warn),
            2 => Some(Self::Info),
            3 => Some(Self::Debug),
            4 => Some(Self::Trace),
            5 => Some(Self::Silly),
            _ => None,
        }
    }

    /// Parses a level name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warn" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            "trace" => Some(Self::Trace),
            "silly" => Some(Self::Silly),
            _ => None,
        }
    }

    /// Returns the level name as it appears in output and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::Silly => "silly",
        }
    }

    /// Reports whether a message at this level passes a threshold rank.
    #[must_use]
    pub const fn admits(self, threshold_rank: usize) -> bool {
        self.rank() <= threshold_rank
    }

    /// Returns the next level in the cycle, wrapping back to the most
    /// severe after the last.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match Self::from_rank((self.rank() + 1) % Self::COUNT) {
            Some(level) => level,
            None => Self::Error,
        }
    }

    /// Maps this level onto one of the four host console methods.
    ///
    /// `trace` and `silly` collapse onto `debug`.
    #[must_use]
    pub const fn console_method(self) -> ConsoleMethod {
        match self {
            Self::Error => ConsoleMethod::Error,
            Self::Warn => ConsoleMethod::Warn,
            Self::Info => ConsoleMethod::Info,
            Self::Debug | Self::Trace | Self::Silly => ConsoleMethod::Debug,
        }
    }

    /// Maps this level onto a syslog severity.
    ///
    /// `trace` and `silly` collapse onto the debug numeric level.
    #[cfg(unix)]
    #[must_use]
    pub const fn syslog_severity(self) -> SyslogSeverity {
        match self {
            Self::Error => SyslogSeverity::Error,
            Self::Warn => SyslogSeverity::Warning,
            Self::Info => SyslogSeverity::Info,
            Self::Debug | Self::Trace | Self::Silly => SyslogSeverity::Debug,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::Info
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
