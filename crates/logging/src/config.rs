//! crates/logging/src/config.rs
//! Explicit logger configuration and the one-time environment read.

use std::env;
use std::fmt;
use std::path::PathBuf;

use logging_sink::{ColorMode, SharedWriter};
#[cfg(unix)]
use logging_sink::syslog::SyslogConfig;

use crate::levels::Level;

/// Environment variable naming the initial threshold level.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Environment variable naming the transport; honored only when it names a
/// valid transport.
pub const LOG_TRANSPORT_ENV: &str = "LOG_TRANSPORT";

/// Boolean-ish environment flag enabling debug mode: console transport by
/// default and caller-location annotations.
pub const DEBUG_ENV: &str = "DEBUG";

/// Boolean-ish environment flag enabling caller-location annotations outside
/// debug mode.
pub const LINE_INFO_ENV: &str = "LINE_INFO";

/// The output channel a logger routes rendered lines through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransportKind {
    /// Interactive console (stderr/stdout or an injected writer).
    Console,
    /// System log datagram socket.
    #[default]
    Syslog,
}

impl TransportKind {
    /// Parses a transport name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "console" => Some(Self::Console),
            "syslog" => Some(Self::Syslog),
            _ => None,
        }
    }

    /// Returns the transport name in its configuration spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Syslog => "syslog",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete construction-time configuration for a [`Logger`](crate::Logger).
///
/// The struct is plain data with public fields; [`LoggerConfig::from_env`]
/// is the only place the process environment is consulted, and it is never
/// re-read afterwards. Everything a child logger inherits flows through the
/// values captured here.
#[derive(Clone, Default)]
pub struct LoggerConfig {
    /// Initial threshold level.
    pub level: Level,
    /// Output channel, fixed for the instance's lifetime.
    pub transport: TransportKind,
    /// Seed segments of the prefix chain.
    pub prefix: Vec<String>,
    /// Separator joining rendered prefix segments.
    pub prefix_separator: String,
    /// Identity and destination of the syslog connection.
    #[cfg(unix)]
    pub syslog: SyslogConfig,
    /// When console output is colorized.
    pub color: ColorMode,
    /// Injected console writer replacing the standard streams.
    pub console: Option<SharedWriter>,
    /// Literal keys whose values are redacted inside structured arguments.
    pub redact_keys: Vec<String>,
    /// Literal string values redacted wherever they appear as arguments.
    pub redact_values: Vec<String>,
    /// Attach caller locations to `debug` and `error` output.
    pub line_info: bool,
    /// Debug mode: prefers the console transport and implies `line_info`.
    pub debug: bool,
    /// Working directory used to shorten caller-location paths.
    pub workdir: Option<PathBuf>,
}

impl LoggerConfig {
    /// Default prefix separator.
    pub const DEFAULT_SEPARATOR: &'static str = "/";

    /// Builds a configuration from the process environment.
    ///
    /// Reads [`LOG_LEVEL_ENV`], [`LOG_TRANSPORT_ENV`], [`DEBUG_ENV`], and
    /// [`LINE_INFO_ENV`] exactly once. Transport resolution: a valid
    /// environment transport name wins, else console when the debug flag is
    /// set, else syslog. Unrecognised level or transport names fall back to
    /// the defaults rather than erroring.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(level) = env_string(LOG_LEVEL_ENV).and_then(|name| Level::from_name(&name)) {
            config.level = level;
        }
        config.debug = env_flag(DEBUG_ENV);
        config.line_info = env_flag(LINE_INFO_ENV);
        config.transport = env_string(LOG_TRANSPORT_ENV)
            .and_then(|name| TransportKind::from_name(&name))
            .unwrap_or(if config.debug {
                TransportKind::Console
            } else {
                TransportKind::Syslog
            });
        config.workdir = env::current_dir().ok();
        config
    }

    /// Sets the initial threshold level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the transport, overriding environment-derived selection.
    #[must_use]
    pub fn with_transport(mut self, transport: TransportKind) -> Self {
        self.transport = transport;
        self
    }

    /// Seeds the prefix chain.
    #[must_use]
    pub fn with_prefix<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefix = segments.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the standard streams with an injected writer.
    #[must_use]
    pub fn with_console(mut self, writer: SharedWriter) -> Self {
        self.console = Some(writer);
        self
    }

    /// Sets the color mode for console output.
    #[must_use]
    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    /// Configures the redaction rule set.
    #[must_use]
    pub fn with_redaction<K, V>(mut self, keys: K, values: V) -> Self
    where
        K: IntoIterator<Item = String>,
        V: IntoIterator<Item = String>,
    {
        self.redact_keys = keys.into_iter().collect();
        self.redact_values = values.into_iter().collect();
        self
    }

    /// Returns the effective prefix separator, substituting the default for
    /// an empty configuration value.
    #[must_use]
    pub fn separator(&self) -> &str {
        if self.prefix_separator.is_empty() {
            Self::DEFAULT_SEPARATOR
        } else {
            &self.prefix_separator
        }
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("LoggerConfig");
        debug
            .field("level", &self.level)
            .field("transport", &self.transport)
            .field("prefix", &self.prefix)
            .field("prefix_separator", &self.prefix_separator);
        #[cfg(unix)]
        debug.field("syslog", &self.syslog);
        debug
            .field("color", &self.color)
            .field("console", &self.console.as_ref().map(|_| "<injected>"))
            .field("redact_keys", &self.redact_keys)
            .field("redact_values", &self.redact_values)
            .field("line_info", &self.line_info)
            .field("debug", &self.debug)
            .field("workdir", &self.workdir)
            .finish()
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.into_string().ok())
}

fn env_flag(key: &str) -> bool {
    env::var_os(key).is_some_and(|value| !value.is_empty())
}
