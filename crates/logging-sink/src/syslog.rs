//! crates/logging-sink/src/syslog.rs
//!
//! Datagram client for the system log facility.
//!
//! Each client owns a `UnixDatagram` socket connected once, at construction,
//! to the log device path. The wire payload is assembled here rather than
//! delegated to syslog(3) because both the device path and the exact frame
//! bytes are configurable contracts: collectors downstream parse
//! `<facility*8+severity>tag [label]: message` and tests assert it verbatim.
//!
//! Clients are pooled per (tag, path) so a logger hierarchy sharing one
//! identity shares one socket; the first configuration to open a pool entry
//! also fixes its facility.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::os::unix::net::UnixDatagram;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, Weak};

/// Default tag identifying this process in the system log.
pub const DEFAULT_SYSLOG_TAG: &str = "oc-logger";

/// Default path of the system log datagram socket.
pub const DEFAULT_SYSLOG_PATH: &str = "/dev/log";

/// Syslog facility codes for application logging, matching the POSIX
/// syslog(3) constants.
///
/// The constants from `<syslog.h>` are already shifted left by three bits,
/// so a facility code combines with a severity by bitwise or.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum SyslogFacility {
    /// User-level messages (LOG_USER) - the default for this facade.
    User = libc::LOG_USER,
    /// System daemons (LOG_DAEMON).
    Daemon = libc::LOG_DAEMON,
    /// Reserved for local use (LOG_LOCAL0).
    Local0 = libc::LOG_LOCAL0,
    /// Reserved for local use (LOG_LOCAL1).
    Local1 = libc::LOG_LOCAL1,
    /// Reserved for local use (LOG_LOCAL2).
    Local2 = libc::LOG_LOCAL2,
    /// Reserved for local use (LOG_LOCAL3).
    Local3 = libc::LOG_LOCAL3,
    /// Reserved for local use (LOG_LOCAL4).
    Local4 = libc::LOG_LOCAL4,
    /// Reserved for local use (LOG_LOCAL5).
    Local5 = libc::LOG_LOCAL5,
    /// Reserved for local use (LOG_LOCAL6).
    Local6 = libc::LOG_LOCAL6,
    /// Reserved for local use (LOG_LOCAL7).
    Local7 = libc::LOG_LOCAL7,
}

impl SyslogFacility {
    /// Parses a facility name into the corresponding constant.
    ///
    /// Names are case-insensitive. Returns `None` for unrecognised names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "daemon" => Some(Self::Daemon),
            "local0" => Some(Self::Local0),
            "local1" => Some(Self::Local1),
            "local2" => Some(Self::Local2),
            "local3" => Some(Self::Local3),
            "local4" => Some(Self::Local4),
            "local5" => Some(Self::Local5),
            "local6" => Some(Self::Local6),
            "local7" => Some(Self::Local7),
            _ => None,
        }
    }

    /// Returns the facility name in its configuration spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Daemon => "daemon",
            Self::Local0 => "local0",
            Self::Local1 => "local1",
            Self::Local2 => "local2",
            Self::Local3 => "local3",
            Self::Local4 => "local4",
            Self::Local5 => "local5",
            Self::Local6 => "local6",
            Self::Local7 => "local7",
        }
    }

    /// Returns the numeric facility code as used in the priority prefix.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl Default for SyslogFacility {
    fn default() -> Self {
        Self::User
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Syslog severity levels, 0 = emergency through 7 = debug.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum SyslogSeverity {
    /// System is unusable.
    Emergency = 0,
    /// Action must be taken immediately.
    Alert = 1,
    /// Critical conditions.
    Critical = 2,
    /// Error conditions.
    Error = 3,
    /// Warning conditions.
    Warning = 4,
    /// Normal but significant condition.
    Notice = 5,
    /// Informational messages.
    Info = 6,
    /// Debug-level messages.
    Debug = 7,
}

impl SyslogSeverity {
    /// Returns the numeric severity as used in the priority prefix.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Returns the label spelled into the wire payload.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Alert => "alert",
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for SyslogSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity and destination of a syslog connection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyslogConfig {
    /// Tag identifying the emitting process.
    pub tag: String,
    /// Path of the log device socket.
    pub path: PathBuf,
    /// Facility claimed by every message.
    pub facility: SyslogFacility,
}

impl SyslogConfig {
    /// Creates a configuration with the default facility.
    pub fn new(tag: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            tag: tag.into(),
            path: path.into(),
            facility: SyslogFacility::default(),
        }
    }
}

impl Default for SyslogConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SYSLOG_TAG, DEFAULT_SYSLOG_PATH)
    }
}

/// A connected system log client.
///
/// Construction connects the socket once; [`send`](Self::send) is
/// fire-and-forget apart from surfacing the socket error of the individual
/// datagram. The client never reconnects.
#[derive(Debug)]
pub struct SyslogClient {
    config: SyslogConfig,
    socket: UnixDatagram,
}

type Pool = Mutex<HashMap<(String, PathBuf), Weak<SyslogClient>>>;

fn pool() -> &'static Pool {
    static POOL: OnceLock<Pool> = OnceLock::new();
    POOL.get_or_init(Pool::default)
}

impl SyslogClient {
    /// Opens a dedicated connection to the configured log device.
    pub fn connect(config: SyslogConfig) -> io::Result<Self> {
        let socket = UnixDatagram::unbound()?;
        socket.connect(&config.path)?;
        Ok(Self { config, socket })
    }

    /// Returns the pooled connection for the configuration's (tag, path)
    /// pair, opening it on first use.
    ///
    /// The entry lives as long as any logger holds it; once every holder is
    /// dropped, the next request reopens the socket.
    pub fn shared(config: SyslogConfig) -> io::Result<Arc<Self>> {
        let key = (config.tag.clone(), config.path.clone());
        let mut entries = pool().lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = entries.get(&key).and_then(Weak::upgrade) {
            return Ok(existing);
        }
        let client = Arc::new(Self::connect(config)?);
        entries.insert(key, Arc::downgrade(&client));
        Ok(client)
    }

    /// Returns the configured tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.config.tag
    }

    /// Returns the configured device path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.config.path
    }

    /// Returns the configured facility.
    #[must_use]
    pub const fn facility(&self) -> SyslogFacility {
        self.config.facility
    }

    /// Renders the wire payload for a message without sending it.
    #[must_use]
    pub fn frame(&self, severity: SyslogSeverity, message: &str) -> String {
        let priority = self.config.facility.code() | severity.code();
        format!(
            "<{priority}>{} [{}]: {message}",
            self.config.tag,
            severity.label()
        )
    }

    /// Sends one message at the given severity.
    pub fn send(&self, severity: SyslogSeverity, message: &str) -> io::Result<()> {
        self.socket.send(self.frame(severity, message).as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receiver() -> (tempfile::TempDir, UnixDatagram, PathBuf) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("log.sock");
        let socket = UnixDatagram::bind(&path).expect("bind receiver");
        (dir, socket, path)
    }

    fn recv_string(socket: &UnixDatagram) -> String {
        let mut buffer = [0u8; 1024];
        let len = socket.recv(&mut buffer).expect("receive datagram");
        String::from_utf8(buffer[..len].to_vec()).expect("utf-8")
    }

    #[test]
    fn facility_names_round_trip() {
        for facility in [
            SyslogFacility::User,
            SyslogFacility::Daemon,
            SyslogFacility::Local0,
            SyslogFacility::Local7,
        ] {
            assert_eq!(SyslogFacility::from_name(facility.as_str()), Some(facility));
        }
        assert_eq!(SyslogFacility::from_name("LOCAL3"), Some(SyslogFacility::Local3));
        assert_eq!(SyslogFacility::from_name("kern"), None);
        assert_eq!(SyslogFacility::from_name(""), None);
    }

    #[test]
    fn facility_codes_match_libc() {
        assert_eq!(SyslogFacility::User.code(), libc::LOG_USER);
        assert_eq!(SyslogFacility::Daemon.code(), libc::LOG_DAEMON);
        assert_eq!(SyslogFacility::Local7.code(), libc::LOG_LOCAL7);
    }

    #[test]
    fn severity_codes_match_libc() {
        assert_eq!(SyslogSeverity::Emergency.code(), libc::LOG_EMERG);
        assert_eq!(SyslogSeverity::Error.code(), libc::LOG_ERR);
        assert_eq!(SyslogSeverity::Warning.code(), libc::LOG_WARNING);
        assert_eq!(SyslogSeverity::Debug.code(), libc::LOG_DEBUG);
    }

    #[test]
    fn frame_matches_priority_prefix_convention() {
        let (_dir, _socket, path) = receiver();
        let client =
            SyslogClient::connect(SyslogConfig::new("tagged", path)).expect("connect");

        // user (8) | warning (4) = 12
        assert_eq!(
            client.frame(SyslogSeverity::Warning, "disk almost full"),
            "<12>tagged [warning]: disk almost full"
        );
        assert_eq!(
            client.frame(SyslogSeverity::Debug, "x"),
            "<15>tagged [debug]: x"
        );
    }

    #[test]
    fn send_delivers_the_framed_payload() {
        let (_dir, socket, path) = receiver();
        let client = SyslogClient::connect(SyslogConfig::new("app", path)).expect("connect");

        client
            .send(SyslogSeverity::Info, "started")
            .expect("send succeeds");

        assert_eq!(recv_string(&socket), "<14>app [info]: started");
    }

    #[test]
    fn daemon_facility_shifts_the_priority() {
        let (_dir, socket, path) = receiver();
        let mut config = SyslogConfig::new("d", path);
        config.facility = SyslogFacility::Daemon;
        let client = SyslogClient::connect(config).expect("connect");

        client
            .send(SyslogSeverity::Error, "failed")
            .expect("send succeeds");

        // daemon (24) | error (3) = 27
        assert_eq!(recv_string(&socket), "<27>d [error]: failed");
    }

    #[test]
    fn shared_pools_by_tag_and_path() {
        let (_dir, _socket, path) = receiver();
        let config = SyslogConfig::new("pooled", &path);

        let first = SyslogClient::shared(config.clone()).expect("first connect");
        let second = SyslogClient::shared(config).expect("second connect");

        assert!(Arc::ptr_eq(&first, &second));

        let other = SyslogClient::shared(SyslogConfig::new("distinct", &path))
            .expect("third connect");
        assert!(!Arc::ptr_eq(&first, &other));
    }

    #[test]
    fn pool_entries_expire_with_their_holders() {
        let (_dir, _socket, path) = receiver();
        let config = SyslogConfig::new("expiring", &path);

        let first = SyslogClient::shared(config.clone()).expect("first connect");
        drop(first);
        let second = SyslogClient::shared(config).expect("reopen");

        second
            .send(SyslogSeverity::Notice, "still routable")
            .expect("send succeeds");
    }

    #[test]
    fn connect_to_missing_path_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = SyslogConfig::new("orphan", dir.path().join("absent.sock"));
        assert!(SyslogClient::connect(config).is_err());
    }
}
