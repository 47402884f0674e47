//! crates/logging-sink/src/console.rs
//! Leveled console binding with TTY-gated colorization.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use is_terminal::IsTerminal;

/// Writer handle shared between a logger hierarchy and the caller that
/// injected it.
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Controls when ANSI color is applied to console output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only when the target stream is a terminal. Injected writers are
    /// never terminals under this mode.
    #[default]
    Auto,
    /// Color unconditionally.
    Always,
    /// Never color.
    Never,
}

/// The four leveled methods a host console exposes.
///
/// Severities beyond these four collapse onto `Debug` upstream; this crate
/// only dispatches on the final method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConsoleMethod {
    /// Failures; routed to stderr.
    Error,
    /// Warnings; routed to stderr.
    Warn,
    /// Informational output; routed to stdout.
    Info,
    /// Diagnostic output; routed to stdout.
    Debug,
}

impl ConsoleMethod {
    const fn uses_stderr(self) -> bool {
        matches!(self, Self::Error | Self::Warn)
    }
}

/// Console binding that writes one line per emission.
///
/// The default target splits output across the standard streams by
/// [`ConsoleMethod`]. An injected [`SharedWriter`] receives every method's
/// output instead, which is how tests and embedders capture log lines.
/// Cloning a sink shares the injected writer, so a logger hierarchy built
/// from one configuration appends to a single buffer in call order.
#[derive(Clone)]
pub struct ConsoleSink {
    target: Target,
    color: ColorMode,
}

#[derive(Clone)]
enum Target {
    Standard,
    Shared(SharedWriter),
}

impl ConsoleSink {
    /// Creates a sink over the process standard streams.
    #[must_use]
    pub fn standard(color: ColorMode) -> Self {
        Self {
            target: Target::Standard,
            color,
        }
    }

    /// Creates a sink over an injected writer.
    #[must_use]
    pub fn with_writer(writer: SharedWriter, color: ColorMode) -> Self {
        Self {
            target: Target::Shared(writer),
            color,
        }
    }

    /// Returns the configured color mode.
    #[must_use]
    pub const fn color_mode(&self) -> ColorMode {
        self.color
    }

    /// Reports whether output for `method` should be colorized.
    #[must_use]
    pub fn color_enabled(&self, method: ConsoleMethod) -> bool {
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => match &self.target {
                Target::Shared(_) => false,
                Target::Standard => {
                    if method.uses_stderr() {
                        io::stderr().is_terminal()
                    } else {
                        io::stdout().is_terminal()
                    }
                }
            },
        }
    }

    /// Writes one rendered line through the stream `method` selects.
    pub fn write_line(&self, method: ConsoleMethod, line: &str) -> io::Result<()> {
        match &self.target {
            Target::Standard => {
                if method.uses_stderr() {
                    writeln!(io::stderr().lock(), "{line}")
                } else {
                    writeln!(io::stdout().lock(), "{line}")
                }
            }
            Target::Shared(writer) => {
                let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
                writeln!(writer, "{line}")
            }
        }
    }
}

impl fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match self.target {
            Target::Standard => "Standard",
            Target::Shared(_) => "Shared",
        };
        f.debug_struct("ConsoleSink")
            .field("target", &target)
            .field("color", &self.color)
            .finish()
    }
}
