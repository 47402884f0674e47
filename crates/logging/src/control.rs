//! crates/logging/src/control.rs
//! Process-wide signal dispatch for runtime verbosity cycling.
//!
//! Exactly one `SIGUSR2` subscription exists per process, installed on the
//! first logger registration. The dispatcher holds weak handles so it never
//! extends a logger's lifetime; handles whose logger has been dropped are
//! pruned on the next delivery.

use std::sync::{Mutex, OnceLock, PoisonError, Weak};

use crate::logger::LoggerShared;

fn registry() -> &'static Mutex<Vec<Weak<LoggerShared>>> {
    static REGISTRY: OnceLock<Mutex<Vec<Weak<LoggerShared>>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(Vec::new()))
}

/// Subscribes a logger to verbosity cycling.
pub(crate) fn register(handle: Weak<LoggerShared>) {
    registry()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(handle);
    install();
}

/// Advances every live logger one level and drops dead handles.
fn cycle_all() {
    let mut handles = registry().lock().unwrap_or_else(PoisonError::into_inner);
    handles.retain(|handle| {
        handle.upgrade().is_some_and(|shared| {
            shared.cycle_and_notify();
            true
        })
    });
}

#[cfg(unix)]
fn install() {
    use signal_hook::consts::SIGUSR2;
    use signal_hook::iterator::Signals;

    static INSTALLED: OnceLock<()> = OnceLock::new();
    INSTALLED.get_or_init(|| {
        // A failed registration leaves runtime cycling disabled; emission
        // itself is unaffected.
        if let Ok(mut signals) = Signals::new([SIGUSR2]) {
            let _ = std::thread::Builder::new()
                .name(String::from("log-level-cycler"))
                .spawn(move || {
                    for _signal in signals.forever() {
                        cycle_all();
                    }
                });
        }
    });
}

#[cfg(not(unix))]
fn install() {}
