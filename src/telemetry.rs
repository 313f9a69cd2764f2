//! Telemetry utilities for command timing and message correlation.

use relaymsg_proto::Message;
use std::time::Instant;

/// Guard for timing command execution and recording metrics.
///
/// Records command latency when dropped.
pub struct CommandTimer {
    command: String,
    start: Instant,
}

impl CommandTimer {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_command(&self.command, duration);
    }
}

/// Extract msgid from message tags if present.
pub fn extract_msgid(msg: &Message) -> Option<String> {
    msg.msgid().map(str::to_string)
}
