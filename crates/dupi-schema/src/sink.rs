use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing::Level;

/// Destination for diagnostic lines emitted while mapping and exporting.
///
/// Passed explicitly into each component instead of reaching for a global
/// logger.
pub trait DiagnosticSink {
    /// Record one diagnostic line.
    fn record(&self, level: Level, message: &str);

    /// Whether lines at `level` would be kept. Lets callers skip formatting.
    fn enabled(&self, _level: Level) -> bool {
        true
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn record(&self, level: Level, message: &str) {
        (**self).record(level, message);
    }

    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }
}

/// Forwards diagnostics to `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, level: Level, message: &str) {
        if level == Level::ERROR {
            tracing::error!("{message}");
        } else if level == Level::WARN {
            tracing::warn!("{message}");
        } else if level == Level::INFO {
            tracing::info!("{message}");
        } else if level == Level::DEBUG {
            tracing::debug!("{message}");
        } else {
            tracing::trace!("{message}");
        }
    }

    fn enabled(&self, level: Level) -> bool {
        level <= LevelFilter::current()
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _level: Level, _message: &str) {}

    fn enabled(&self, _level: Level) -> bool {
        false
    }
}

/// Keeps every line in memory. Meant for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded lines.
    pub fn lines(&self) -> Vec<(Level, String)> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Whether any line at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.lines()
            .iter()
            .any(|(l, msg)| *l == level && msg.contains(needle))
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, level: Level, message: &str) {
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.record(Level::DEBUG, "first");
        sink.record(Level::WARN, "second");

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], (Level::DEBUG, "first".to_string()));
        assert!(sink.contains(Level::WARN, "sec"));
        assert!(!sink.contains(Level::DEBUG, "second"));
    }

    #[test]
    fn null_sink_is_disabled() {
        assert!(!NullSink.enabled(Level::ERROR));
        NullSink.record(Level::ERROR, "dropped");
    }

    #[test]
    fn sink_by_reference() {
        let sink = MemorySink::new();
        let by_ref: &dyn DiagnosticSink = &sink;
        (&by_ref).record(Level::INFO, "via ref");
        assert!(sink.contains(Level::INFO, "via ref"));
    }
}
