//! Shared helpers for the integration suites.
#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use logging::{Level, Logger, LoggerConfig, SharedWriter, TransportKind};

/// Cloneable in-memory writer whose contents stay readable after a logger
/// takes its own handle to it.
#[derive(Clone, Default)]
pub struct CaptureBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the handle a logger configuration wants.
    pub fn writer(&self) -> SharedWriter {
        Arc::new(Mutex::new(self.clone()))
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.inner.lock().expect("buffer lock").clone()).expect("utf-8 output")
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(ToString::to_string).collect()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .expect("buffer lock")
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Console logger writing into a fresh capture buffer. Injected writers are
/// not terminals, so `ColorMode::Auto` keeps the output free of escapes.
pub fn console_logger(level: Level, prefix: &[&str]) -> (Logger, CaptureBuffer) {
    let buffer = CaptureBuffer::new();
    let config = LoggerConfig::default()
        .with_level(level)
        .with_transport(TransportKind::Console)
        .with_prefix(prefix.iter().copied())
        .with_console(buffer.writer());
    (Logger::new(config), buffer)
}
