//! Integration tests for the syslog transport: wire framing through the
//! facade, pooled child connections, and the explicit degraded state left
//! behind by an unreachable log device.
#![cfg(unix)]

use std::os::unix::net::UnixDatagram;
use std::path::PathBuf;
use std::time::Duration;

use logging::{
    EmitError, Level, Logger, LoggerConfig, SyslogConfig, TransportKind, json,
};

fn receiver() -> (tempfile::TempDir, UnixDatagram, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("log.sock");
    let socket = UnixDatagram::bind(&path).expect("bind receiver");
    socket
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("set timeout");
    (dir, socket, path)
}

fn recv_string(socket: &UnixDatagram) -> String {
    let mut buffer = [0u8; 1024];
    let len = socket.recv(&mut buffer).expect("receive datagram");
    String::from_utf8(buffer[..len].to_vec()).expect("utf-8")
}

fn syslog_logger(tag: &str, path: &std::path::Path, level: Level) -> Logger {
    let mut config = LoggerConfig::default()
        .with_level(level)
        .with_transport(TransportKind::Syslog);
    config.syslog = SyslogConfig::new(tag, path);
    Logger::new(config)
}

#[test]
fn emissions_reach_the_bound_socket() {
    let (_dir, socket, path) = receiver();
    let log = syslog_logger("app", &path, Level::Info);

    log.warn("disk %s", &[json!("full")]);

    // user (8) | warning (4) = 12
    assert_eq!(recv_string(&socket), "<12>app [warning]: disk full");
}

#[test]
fn high_verbosity_levels_collapse_onto_debug_on_the_wire() {
    let (_dir, socket, path) = receiver();
    let log = syslog_logger("app", &path, Level::Silly);

    log.silly("every detail", &[]);

    assert_eq!(recv_string(&socket), "<15>app [debug]: every detail");
}

#[test]
fn children_share_the_pooled_connection_and_stay_routable() {
    let (_dir, socket, path) = receiver();
    let parent = syslog_logger("app", &path, Level::Info);
    let child = parent.child("db");

    parent.info("from parent", &[]);
    child.info("from child", &[]);

    assert_eq!(recv_string(&socket), "<14>app [info]: from parent");
    assert_eq!(recv_string(&socket), "<14>app [info]: from child");
}

#[test]
fn an_unreachable_device_still_constructs() {
    let dir = tempfile::tempdir().expect("temp dir");
    let log = syslog_logger("ghost", &dir.path().join("absent.sock"), Level::Info);

    assert_eq!(log.transport(), TransportKind::Syslog);
    assert!(!log.transport_available());
}

#[test]
fn emission_through_a_degraded_binding_surfaces_the_failure() {
    let dir = tempfile::tempdir().expect("temp dir");
    let log = syslog_logger("ghost", &dir.path().join("absent.sock"), Level::Info);

    let error = log
        .log(Level::Error, "boom", &[])
        .expect_err("degraded transport must fail loudly through log()");
    assert!(matches!(error, EmitError::SyslogUnavailable { .. }));
}

#[test]
fn severity_methods_record_the_failure_instead_of_raising() {
    let dir = tempfile::tempdir().expect("temp dir");
    let log = syslog_logger("ghost", &dir.path().join("absent.sock"), Level::Info);

    log.error("boom", &[]);

    let recorded = log
        .take_last_emit_error()
        .expect("failure must be queryable");
    assert!(matches!(recorded, EmitError::SyslogUnavailable { .. }));
    assert!(log.take_last_emit_error().is_none());
}

#[test]
fn filtered_messages_never_touch_a_degraded_binding() {
    let dir = tempfile::tempdir().expect("temp dir");
    let log = syslog_logger("ghost", &dir.path().join("absent.sock"), Level::Error);

    log.silly("below threshold", &[]);

    assert!(log.take_last_emit_error().is_none());
}
