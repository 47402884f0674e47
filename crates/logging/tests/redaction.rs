//! Integration tests for argument redaction on the emission path.

mod common;

use common::CaptureBuffer;
use logging::{Level, Logger, LoggerConfig, TransportKind, json};

fn redacting_logger(keys: &[&str], values: &[&str]) -> (Logger, CaptureBuffer) {
    let buffer = CaptureBuffer::new();
    let config = LoggerConfig::default()
        .with_level(Level::Silly)
        .with_transport(TransportKind::Console)
        .with_console(buffer.writer())
        .with_redaction(
            keys.iter().map(ToString::to_string),
            values.iter().map(ToString::to_string),
        );
    (Logger::new(config), buffer)
}

#[test]
fn configured_values_are_redacted_in_output() {
    let (log, buffer) = redacting_logger(&[], &["hunter2"]);
    log.info("password is %s", &[json!("hunter2")]);
    assert_eq!(buffer.contents(), "[info] password is [REDACTED]\n");
}

#[test]
fn the_template_itself_is_never_redacted() {
    let (log, buffer) = redacting_logger(&[], &["hunter2"]);
    log.info("hunter2 %s", &[json!("hunter2")]);
    assert_eq!(buffer.contents(), "[info] hunter2 [REDACTED]\n");
}

#[test]
fn configured_keys_are_redacted_inside_structured_arguments() {
    let (log, buffer) = redacting_logger(&["token"], &[]);
    log.info("session %j", &[json!({"token": "abc", "ttl": 60})]);
    assert_eq!(
        buffer.contents(),
        "[info] session {\"token\":\"[REDACTED]\",\"ttl\":60}\n"
    );
}

#[test]
fn nested_structures_are_walked() {
    let (log, buffer) = redacting_logger(&["password"], &[]);
    log.info(
        "request %j",
        &[json!({"user": "ada", "auth": {"password": "pw"}})],
    );
    assert_eq!(
        buffer.contents(),
        "[info] request {\"auth\":{\"password\":\"[REDACTED]\"},\"user\":\"ada\"}\n"
    );
}

#[test]
fn unmatched_arguments_pass_through() {
    let (log, buffer) = redacting_logger(&["token"], &["hunter2"]);
    log.info("plain %s and %d", &[json!("visible"), json!(9)]);
    assert_eq!(buffer.contents(), "[info] plain visible and 9\n");
}
