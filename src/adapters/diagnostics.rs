use crate::domain::ports::DiagnosticSink;
use parking_lot::Mutex;

/// Forwards diagnostics to the `tracing` subscriber at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, line: &str) {
        tracing::warn!("{}", line);
    }
}

/// Keeps every reported line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}
