//! Integration tests for the one-time environment read.
//!
//! The process environment is global state, so every test here runs
//! serialized and restores the variables it touched.

use std::env;
use std::ffi::{OsStr, OsString};

use logging::{
    DEBUG_ENV, LINE_INFO_ENV, LOG_LEVEL_ENV, LOG_TRANSPORT_ENV, Level, LoggerConfig,
    TransportKind,
};
use serial_test::serial;

const ALL_VARS: [&str; 4] = [LOG_LEVEL_ENV, LOG_TRANSPORT_ENV, DEBUG_ENV, LINE_INFO_ENV];

/// Restores every touched variable when dropped.
struct EnvGuard {
    entries: Vec<(&'static str, Option<OsString>)>,
}

impl EnvGuard {
    /// Starts from a clean slate: all logger variables removed.
    #[allow(unsafe_code)]
    fn clean() -> Self {
        let mut guard = Self {
            entries: Vec::new(),
        };
        for key in ALL_VARS {
            guard.entries.push((key, env::var_os(key)));
            // SAFETY: tests in this file are serialized and the guard
            // restores the previous value on drop.
            unsafe {
                env::remove_var(key);
            }
        }
        guard
    }

    #[allow(unsafe_code)]
    fn set(&mut self, key: &'static str, value: impl AsRef<OsStr>) {
        if self.entries.iter().all(|(existing, _)| *existing != key) {
            self.entries.push((key, env::var_os(key)));
        }
        // SAFETY: serialized with the other tests in this file; restored on
        // drop.
        unsafe {
            env::set_var(key, value);
        }
    }
}

impl Drop for EnvGuard {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        for (key, previous) in self.entries.drain(..).rev() {
            // SAFETY: serialized with the other tests in this file.
            match previous {
                Some(value) => unsafe { env::set_var(key, value) },
                None => unsafe { env::remove_var(key) },
            }
        }
    }
}

#[test]
#[serial]
fn defaults_apply_with_a_clean_environment() {
    let _guard = EnvGuard::clean();
    let config = LoggerConfig::from_env();

    assert_eq!(config.level, Level::Info);
    assert_eq!(config.transport, TransportKind::Syslog);
    assert!(!config.debug);
    assert!(!config.line_info);
    assert!(config.workdir.is_some());
}

#[test]
#[serial]
fn log_level_sets_the_initial_threshold() {
    let mut guard = EnvGuard::clean();
    guard.set(LOG_LEVEL_ENV, "trace");

    assert_eq!(LoggerConfig::from_env().level, Level::Trace);
}

#[test]
#[serial]
fn unknown_level_names_fall_back_to_info() {
    let mut guard = EnvGuard::clean();
    guard.set(LOG_LEVEL_ENV, "verbose");

    assert_eq!(LoggerConfig::from_env().level, Level::Info);
}

#[test]
#[serial]
fn transport_variable_overrides_the_default() {
    let mut guard = EnvGuard::clean();
    guard.set(LOG_TRANSPORT_ENV, "console");

    assert_eq!(LoggerConfig::from_env().transport, TransportKind::Console);
}

#[test]
#[serial]
fn invalid_transport_names_are_ignored() {
    let mut guard = EnvGuard::clean();
    guard.set(LOG_TRANSPORT_ENV, "journald");

    assert_eq!(LoggerConfig::from_env().transport, TransportKind::Syslog);
}

#[test]
#[serial]
fn debug_flag_prefers_the_console_transport() {
    let mut guard = EnvGuard::clean();
    guard.set(DEBUG_ENV, "1");

    let config = LoggerConfig::from_env();
    assert!(config.debug);
    assert_eq!(config.transport, TransportKind::Console);
}

#[test]
#[serial]
fn a_valid_transport_name_beats_the_debug_flag() {
    let mut guard = EnvGuard::clean();
    guard.set(DEBUG_ENV, "1");
    guard.set(LOG_TRANSPORT_ENV, "syslog");

    assert_eq!(LoggerConfig::from_env().transport, TransportKind::Syslog);
}

#[test]
#[serial]
fn empty_values_count_as_unset() {
    let mut guard = EnvGuard::clean();
    guard.set(DEBUG_ENV, "");
    guard.set(LOG_LEVEL_ENV, "");

    let config = LoggerConfig::from_env();
    assert!(!config.debug);
    assert_eq!(config.level, Level::Info);
    assert_eq!(config.transport, TransportKind::Syslog);
}

#[test]
#[serial]
fn line_info_flag_enables_caller_annotations() {
    let mut guard = EnvGuard::clean();
    guard.set(LINE_INFO_ENV, "1");

    assert!(LoggerConfig::from_env().line_info);
}
