//! Buffers Rust log lines so Dart can drain them and show in Flutter console (debugPrint).
//! Every line is also forwarded to the `log` facade for native hosts that install a logger.

use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::Mutex;

static RUST_LOG_BUFFER: Lazy<Mutex<VecDeque<String>>> = Lazy::new(|| Mutex::new(VecDeque::new()));

const MAX_BUFFER_LEN: usize = 500;

pub const LOG_TARGET: &str = "roundup_rs";

fn should_buffer(s: &str) -> bool {
    let lower = s.to_lowercase();
    // Always keep errors/warnings and rejected adjustments.
    if lower.contains("error")
        || lower.contains("warn")
        || lower.contains("failed")
        || lower.contains("rejected")
    {
        return true;
    }

    lower.contains("allocation")
        || lower.contains("navigation")
        || lower.contains("bank_connection")
}

/// Push a log line. Called by rust_log! macro.
pub fn push(s: String) {
    log::debug!(target: LOG_TARGET, "{}", s);
    if !should_buffer(&s) {
        return;
    }
    if let Ok(mut lines) = RUST_LOG_BUFFER.lock() {
        if lines.len() == MAX_BUFFER_LEN {
            lines.pop_front();
        }
        lines.push_back(s);
    }
}

/// Drain and clear buffered log lines. Dart calls this and debugPrint's each line.
pub fn drain_rust_logs() -> Vec<String> {
    RUST_LOG_BUFFER
        .lock()
        .map(|mut lines| lines.drain(..).collect())
        .unwrap_or_default()
}

#[macro_export]
macro_rules! rust_log {
    ($($t:tt)*) => {
        $crate::log_bridge::push(format!($($t)*))
    };
}
