//! Walks the severity scale through a small logger hierarchy on the console.
//!
//! Run with `cargo run -p logging --example hierarchy`; cycle the verbosity
//! of the running process with `kill -USR2 <pid>`.

use logging::{Level, Logger, LoggerConfig, TransportKind, json};

fn main() {
    let root = Logger::new(
        LoggerConfig::default()
            .with_level(Level::Silly)
            .with_transport(TransportKind::Console)
            .with_prefix(["@app"]),
    );
    let core = root.child("core");

    for (index, level) in Level::ALL.iter().enumerate() {
        root.log(*level, "level %d", &[json!(index)])
            .expect("console emission");
        core.log(*level, "level %d", &[json!(index)])
            .expect("console emission");
    }

    core.timer("startup");
    core.timer("startup");
}
