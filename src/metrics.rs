//! Prometheus metrics collection for relaymsgd.
//!
//! Recording is a no-op until [`init`] has registered the metrics.
//!
//! - `irc_command_total{command}` - Commands processed by type
//! - `irc_command_duration_seconds{command}` - Command latency histogram
//! - `irc_command_errors_total{command,error}` - Handler errors
//! - `relaymsg_events_total{path,outcome}` - Relay events by entry path
//! - `relaymsg_fanout` - Local recipients per relayed line
//! - `relaymsg_dropped_total{target}` - Copies lost to full or closed queues

use prometheus::{
    Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

/// Commands processed by type.
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Command processing latency by command type.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Command errors by type and error kind.
pub static COMMAND_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

/// Relay events by path (`local`/`remote`) and outcome.
pub static RELAY_EVENTS: OnceLock<IntCounterVec> = OnceLock::new();

/// Local recipients per relayed line.
pub static RELAY_FANOUT: OnceLock<Histogram> = OnceLock::new();

/// Deliveries dropped because a queue was full or closed.
pub static DROPPED_DELIVERIES: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            match $init {
                Ok(m) => {
                    if let Err(e) = r.register(Box::new(m.clone())) {
                        tracing::warn!(error = %e, "Failed to register metric {}", stringify!($metric));
                    }
                    let _ = $metric.set(m);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to create metric {}", stringify!($metric));
                }
            }
        };
    }

    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("irc_command_total", "IRC commands processed by type"), &["command"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("irc_command_duration_seconds", "IRC command latency by type")
            .buckets(vec![0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
        &["command"]));
    register!(COMMAND_ERRORS, IntCounterVec::new(Opts::new("irc_command_errors_total", "IRC command errors by type"), &["command", "error"]));
    register!(RELAY_EVENTS, IntCounterVec::new(Opts::new("relaymsg_events_total", "Relay events by entry path and outcome"), &["path", "outcome"]));
    register!(RELAY_FANOUT, Histogram::with_opts(
        HistogramOpts::new("relaymsg_fanout", "Local recipients per relayed line")
            .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0])));
    register!(DROPPED_DELIVERIES, IntCounterVec::new(Opts::new("relaymsg_dropped_total", "Relay copies dropped on full or closed queues"), &["target"]));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    match encoder.encode_to_string(&metric_families) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode Prometheus metrics");
            String::new()
        }
    }
}

/// Record a command execution with latency.
#[inline]
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
    if let Some(h) = COMMAND_LATENCY.get() {
        h.with_label_values(&[command]).observe(duration_secs);
    }
}

/// Record a command error.
#[inline]
pub fn record_command_error(command: &str, error: &str) {
    if let Some(c) = COMMAND_ERRORS.get() {
        c.with_label_values(&[command, error]).inc();
    }
}

/// Record the outcome of a relay event. `path` is `local` or `remote`.
#[inline]
pub fn record_relay(path: &str, outcome: &str) {
    if let Some(c) = RELAY_EVENTS.get() {
        c.with_label_values(&[path, outcome]).inc();
    }
}

/// Record how many local members received a relayed line.
#[inline]
pub fn record_fanout(recipients: usize) {
    if let Some(h) = RELAY_FANOUT.get() {
        h.observe(recipients as f64);
    }
}

/// Record a dropped copy. `target` is `client` or `peer`.
#[inline]
pub fn record_dropped_delivery(target: &str) {
    if let Some(c) = DROPPED_DELIVERIES.get() {
        c.with_label_values(&[target]).inc();
    }
}
