//! crates/logging/src/logger.rs
//! The facade: severity filtering, rendering, transport dispatch, child
//! derivation, and timers.

use std::fmt;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use logging_sink::color::{LOCATION_COLOR, level_color, paint};
use logging_sink::format::substitute;
use logging_sink::ConsoleSink;
#[cfg(unix)]
use logging_sink::syslog::{SyslogClient, SyslogConfig};

use crate::config::{LoggerConfig, TransportKind};
use crate::control;
use crate::error::EmitError;
use crate::levels::Level;
use crate::prefix::PrefixChain;
use crate::redact::RedactionRules;
use crate::timer::TimerRegistry;

/// Notice reporting a signal-driven level change. Emitted at debug level,
/// subject to the very threshold it announces.
pub(crate) const LEVEL_CYCLE_NOTICE: &str = "Log level updated to %s.";

#[derive(Debug)]
enum Binding {
    Console(ConsoleSink),
    #[cfg(unix)]
    Syslog(Arc<SyslogClient>),
    SyslogUnavailable,
}

/// State shared by every clone of one logger instance.
///
/// The threshold is the only field mutated after construction, and only
/// through the atomic, so the signal dispatcher never races an in-flight
/// emission.
#[derive(Debug)]
pub(crate) struct LoggerShared {
    threshold: AtomicUsize,
    transport: TransportKind,
    binding: Binding,
    prefix: PrefixChain,
    redact: RedactionRules,
    timers: TimerRegistry,
    last_error: Mutex<Option<EmitError>>,
    annotate_locations: bool,
    workdir: Option<PathBuf>,
    #[cfg(unix)]
    syslog: SyslogConfig,
}

impl LoggerShared {
    fn threshold_rank(&self) -> usize {
        self.threshold.load(Ordering::Acquire)
    }

    fn set_threshold(&self, level: Level) {
        self.threshold.store(level.rank(), Ordering::Release);
    }

    /// Advances the threshold one step along the scale, wrapping at the end,
    /// and returns the new level.
    pub(crate) fn cycle_level(&self) -> Level {
        let previous = self
            .threshold
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |rank| {
                Some((rank + 1) % Level::COUNT)
            })
            .unwrap_or_else(|rank| rank);
        Level::from_rank((previous + 1) % Level::COUNT).unwrap_or(Level::Error)
    }

    /// Signal-delivery entry point: cycle, then announce the new level.
    pub(crate) fn cycle_and_notify(&self) {
        let next = self.cycle_level();
        let result = self.log(
            Level::Debug,
            LEVEL_CYCLE_NOTICE,
            &[Value::from(next.as_str())],
            None,
        );
        self.record(result);
    }

    fn record(&self, result: Result<(), EmitError>) {
        if let Err(error) = result {
            *self
                .last_error
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = Some(error);
        }
    }

    /// The single filtering gate every emission passes through.
    fn log(
        &self,
        level: Level,
        message: &str,
        args: &[Value],
        location: Option<&Location<'_>>,
    ) -> Result<(), EmitError> {
        if !level.admits(self.threshold_rank()) {
            return Ok(());
        }
        self.emit(level, message, args, location)
    }

    fn emit(
        &self,
        level: Level,
        message: &str,
        args: &[Value],
        location: Option<&Location<'_>>,
    ) -> Result<(), EmitError> {
        let args = self.redact.sanitize(args);
        match &self.binding {
            Binding::Console(sink) => {
                let method = level.console_method();
                let colored = sink.color_enabled(method);

                let mut line = String::from("[");
                if colored {
                    line.push_str(&paint(
                        level_color(level.rank(), Level::COUNT),
                        level.as_str(),
                    ));
                } else {
                    line.push_str(level.as_str());
                }
                line.push_str("] ");
                if !self.prefix.is_empty() {
                    line.push('[');
                    if colored {
                        line.push_str(&self.prefix.render_colored());
                    } else {
                        line.push_str(&self.prefix.render_plain());
                    }
                    line.push_str("]: ");
                }
                line.push_str(&substitute(message, &args));
                if let Some(annotation) = location.and_then(|at| self.annotation(at)) {
                    line.push(' ');
                    if colored {
                        line.push_str(&paint(LOCATION_COLOR, &annotation));
                    } else {
                        line.push_str(&annotation);
                    }
                }
                sink.write_line(method, &line)?;
                Ok(())
            }
            #[cfg(unix)]
            Binding::Syslog(client) => {
                let mut text = substitute(message, &args);
                if let Some(annotation) = location.and_then(|at| self.annotation(at)) {
                    text.push(' ');
                    text.push_str(&annotation);
                }
                client.send(level.syslog_severity(), &text)?;
                Ok(())
            }
            Binding::SyslogUnavailable => Err(self.syslog_unavailable()),
        }
    }

    /// Renders `[file:line]` for the caller, with the working-directory
    /// component shortened to `.`, when location annotations are enabled.
    fn annotation(&self, location: &Location<'_>) -> Option<String> {
        if !self.annotate_locations {
            return None;
        }
        let file = Path::new(location.file());
        let shortened = self
            .workdir
            .as_ref()
            .and_then(|dir| file.strip_prefix(dir).ok())
            .map_or_else(
                || location.file().to_string(),
                |relative| format!("./{}", relative.display()),
            );
        Some(format!("[{shortened}:{}]", location.line()))
    }

    fn syslog_unavailable(&self) -> EmitError {
        #[cfg(unix)]
        return EmitError::SyslogUnavailable {
            tag: self.syslog.tag.clone(),
            path: self.syslog.path.clone(),
        };
        #[cfg(not(unix))]
        EmitError::SyslogUnavailable {
            tag: String::new(),
            path: PathBuf::new(),
        }
    }
}

fn console_sink(config: &LoggerConfig) -> ConsoleSink {
    match &config.console {
        Some(writer) => ConsoleSink::with_writer(writer.clone(), config.color),
        None => ConsoleSink::standard(config.color),
    }
}

/// Connection failures are deliberately non-fatal here; the binding becomes
/// an explicit unavailable state that every later emission reports.
#[cfg(unix)]
fn syslog_binding(config: &SyslogConfig) -> Binding {
    match SyslogClient::shared(config.clone()) {
        Ok(client) => Binding::Syslog(client),
        Err(_) => Binding::SyslogUnavailable,
    }
}

/// Overrides applied when deriving a child logger.
#[derive(Clone, Debug, Default)]
pub struct ChildOptions {
    /// Segments appended to the parent's prefix chain.
    pub prefix: Vec<String>,
    /// Child threshold; defaults to the parent's current threshold.
    pub level: Option<Level>,
    /// Replacement syslog tag for the child's own connection.
    pub syslog_tag: Option<String>,
    /// Replacement syslog device path for the child's own connection.
    pub syslog_path: Option<PathBuf>,
}

/// Leveled, multi-transport logger.
///
/// A `Logger` is a cheap handle over shared state; clones log through the
/// same threshold, prefix chain, and transport binding. Independent loggers
/// (including children) are created with [`Logger::new`],
/// [`Logger::child`], or [`Logger::child_with`].
///
/// The per-severity methods are fire-and-forget: a message below the
/// threshold is a successful no-op, and a transport failure is recorded for
/// [`Logger::take_last_emit_error`] rather than returned. Callers that need
/// loud failures use [`Logger::log`].
#[derive(Clone, Debug)]
pub struct Logger {
    shared: Arc<LoggerShared>,
}

impl Logger {
    /// Builds a logger from an explicit configuration.
    ///
    /// A syslog configuration whose device cannot be reached still
    /// constructs; see [`Logger::transport_available`].
    #[must_use]
    pub fn new(config: LoggerConfig) -> Self {
        let binding = match config.transport {
            TransportKind::Console => Binding::Console(console_sink(&config)),
            TransportKind::Syslog => syslog_transport(&config),
        };
        let shared = Arc::new(LoggerShared {
            threshold: AtomicUsize::new(config.level.rank()),
            transport: config.transport,
            binding,
            prefix: PrefixChain::new(config.prefix.clone(), config.separator()),
            redact: RedactionRules::new(
                config.redact_keys.clone(),
                config.redact_values.clone(),
            ),
            timers: TimerRegistry::default(),
            last_error: Mutex::new(None),
            annotate_locations: config.debug || config.line_info,
            workdir: config.workdir.clone(),
            #[cfg(unix)]
            syslog: config.syslog.clone(),
        });
        control::register(Arc::downgrade(&shared));
        Self { shared }
    }

    /// Builds a logger from [`LoggerConfig::from_env`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(LoggerConfig::from_env())
    }

    /// Returns the current threshold level.
    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_rank(self.shared.threshold_rank()).unwrap_or(Level::Error)
    }

    /// Replaces the threshold level.
    pub fn set_level(&self, level: Level) {
        self.shared.set_threshold(level);
    }

    /// Advances the threshold one step along the scale, wrapping at the
    /// end, and returns the new level.
    ///
    /// This is what a `SIGUSR2` delivery performs on every live logger.
    pub fn cycle_level(&self) -> Level {
        self.shared.cycle_level()
    }

    /// Returns the transport this logger was built for.
    #[must_use]
    pub fn transport(&self) -> TransportKind {
        self.shared.transport
    }

    /// Reports whether the transport binding is usable.
    ///
    /// Only a syslog binding whose connection failed at construction is
    /// unusable; console bindings always are.
    #[must_use]
    pub fn transport_available(&self) -> bool {
        !matches!(self.shared.binding, Binding::SyslogUnavailable)
    }

    /// Returns and clears the most recent emission failure recorded by the
    /// per-severity methods.
    #[must_use]
    pub fn take_last_emit_error(&self) -> Option<EmitError> {
        self.shared
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Returns this logger's prefix chain.
    #[must_use]
    pub fn prefix(&self) -> &PrefixChain {
        &self.shared.prefix
    }

    /// Emits a message at an explicit level, surfacing transport failures.
    ///
    /// A message below the threshold returns `Ok(())` without rendering.
    pub fn log(&self, level: Level, message: &str, args: &[Value]) -> Result<(), EmitError> {
        self.shared.log(level, message, args, None)
    }

    /// Emits at error level.
    ///
    /// The message is any displayable value, so an error value can stand in
    /// directly for the template. Appends a caller-location annotation when
    /// debug mode or line info is configured.
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display, args: &[Value]) {
        let location = Location::caller();
        let text = message.to_string();
        let result = self.shared.log(Level::Error, &text, args, Some(location));
        self.shared.record(result);
    }

    /// Emits at warn level.
    pub fn warn(&self, message: &str, args: &[Value]) {
        let result = self.shared.log(Level::Warn, message, args, None);
        self.shared.record(result);
    }

    /// Emits at info level.
    pub fn info(&self, message: &str, args: &[Value]) {
        let result = self.shared.log(Level::Info, message, args, None);
        self.shared.record(result);
    }

    /// Emits at debug level, appending a caller-location annotation when
    /// debug mode or line info is configured.
    #[track_caller]
    pub fn debug(&self, message: &str, args: &[Value]) {
        let location = Location::caller();
        let result = self.shared.log(Level::Debug, message, args, Some(location));
        self.shared.record(result);
    }

    /// Emits at trace level.
    pub fn trace(&self, message: &str, args: &[Value]) {
        let result = self.shared.log(Level::Trace, message, args, None);
        self.shared.record(result);
    }

    /// Emits at silly level.
    pub fn silly(&self, message: &str, args: &[Value]) {
        let result = self.shared.log(Level::Silly, message, args, None);
        self.shared.record(result);
    }

    /// Derives a child logger whose prefix chain gains one segment.
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        self.child_with(ChildOptions {
            prefix: vec![segment.into()],
            ..ChildOptions::default()
        })
    }

    /// Derives a child logger.
    ///
    /// The child copies the parent's prefix chain extended by the requested
    /// segments, shares the redaction rule set by value, and re-derives its
    /// transport binding from the inherited configuration: console children
    /// share the parent's sink, syslog children share the pooled connection
    /// for their (tag, path) identity. The child registers its own runtime
    /// control subscription and owns a fresh timer registry.
    #[must_use]
    pub fn child_with(&self, options: ChildOptions) -> Self {
        let ChildOptions {
            prefix,
            level,
            syslog_tag,
            syslog_path,
        } = options;
        let shared = &self.shared;

        #[cfg(unix)]
        let syslog = {
            let mut derived = shared.syslog.clone();
            if let Some(tag) = syslog_tag {
                derived.tag = tag;
            }
            if let Some(path) = syslog_path {
                derived.path = path;
            }
            derived
        };
        #[cfg(not(unix))]
        let _ = (syslog_tag, syslog_path);

        #[cfg(unix)]
        let binding = match &shared.binding {
            Binding::Console(sink) => Binding::Console(sink.clone()),
            Binding::Syslog(_) | Binding::SyslogUnavailable => syslog_binding(&syslog),
        };
        #[cfg(not(unix))]
        let binding = match &shared.binding {
            Binding::Console(sink) => Binding::Console(sink.clone()),
            Binding::SyslogUnavailable => Binding::SyslogUnavailable,
        };

        let child = Arc::new(LoggerShared {
            threshold: AtomicUsize::new(level.map_or(shared.threshold_rank(), Level::rank)),
            transport: shared.transport,
            binding,
            prefix: shared.prefix.push(prefix),
            redact: shared.redact.clone(),
            timers: TimerRegistry::default(),
            last_error: Mutex::new(None),
            annotate_locations: shared.annotate_locations,
            workdir: shared.workdir.clone(),
            #[cfg(unix)]
            syslog,
        });
        control::register(Arc::downgrade(&child));
        Self { shared: child }
    }

    /// Toggles the named timer.
    ///
    /// The first call starts a measurement; the second stops it and reports
    /// the elapsed milliseconds at info level. A third call starts over.
    pub fn timer(&self, name: &str) {
        if let Some(elapsed) = self.shared.timers.toggle(name) {
            let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
            let result = self.shared.log(
                Level::Info,
                "%s: %dms",
                &[Value::from(name), Value::from(millis)],
                None,
            );
            self.shared.record(result);
        }
    }

    /// Reports whether the named timer is currently running.
    #[must_use]
    pub fn timer_running(&self, name: &str) -> bool {
        self.shared.timers.is_running(name)
    }
}

fn syslog_transport(config: &LoggerConfig) -> Binding {
    #[cfg(unix)]
    return syslog_binding(&config.syslog);
    #[cfg(not(unix))]
    {
        let _ = config;
        Binding::SyslogUnavailable
    }
}
