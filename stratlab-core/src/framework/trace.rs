//! Debug trace lines: `<timestamp>: <STAGE>: a | b | c`.

use chrono::{DateTime, Utc};
use std::fmt;
use tracing::info;

/// Log target of trace lines.
pub const TRACE_TARGET: &str = "stratlab::trace";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Alpha,
    Portfolio,
    Risk,
    /// Merged targets handed to execution.
    Execution,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alpha => "ALPHA",
            Self::Portfolio => "PORTFOLIO",
            Self::Risk => "RISK",
            Self::Execution => "EXECUTION",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format one trace line, items sorted by their string form. `None` when
/// there is nothing to report.
pub fn format_trace<T: fmt::Display>(time: DateTime<Utc>, stage: Stage, items: &[T]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let mut rendered: Vec<String> = items.iter().map(|item| item.to_string()).collect();
    rendered.sort();
    Some(format!(
        "{}: {}: {}",
        time.format("%Y-%m-%d %H:%M:%S"),
        stage,
        rendered.join(" | ")
    ))
}

/// Emits trace lines when enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugTrace {
    enabled: bool,
}

impl DebugTrace {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn emit<T: fmt::Display>(&self, time: DateTime<Utc>, stage: Stage, items: &[T]) {
        if !self.enabled {
            return;
        }
        if let Some(line) = format_trace(time, stage, items) {
            info!(target: TRACE_TARGET, "{line}");
        }
    }
}
