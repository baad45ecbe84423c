//! Side channel for human-readable progress text.
//!
//! Loader, normalizer and factorization report through a `ProgressSink` so
//! they can run silently in tests. Nothing written here affects results.

use chrono::Local;
use log::info;

pub trait ProgressSink {
    fn message(&mut self, msg: &str);

    /// One factorization iteration and its distance
    fn iteration(&mut self, iter: usize, distance: f64) {
        self.message(&format!("iteration {}: distance {:.6}", iter, distance));
    }
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Routes progress through the `log` facade
pub struct LogProgress {
    method: &'static str,
}

impl LogProgress {
    pub fn new(method: &'static str) -> Self {
        Self { method }
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new("nmf")
    }
}

impl ProgressSink for LogProgress {
    fn message(&mut self, msg: &str) {
        info!("[method: {}] [{}] {}", self.method, timestamp(), msg);
    }
}

/// Discards everything
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn message(&mut self, _msg: &str) {}
}

impl ProgressSink for Vec<String> {
    fn message(&mut self, msg: &str) {
        self.push(msg.to_string());
    }
}
