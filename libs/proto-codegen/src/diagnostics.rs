//! Diagnostics collaborator
//!
//! Generators report progress and recoverable oddities (such as dangling type
//! references) through a [`Diagnostics`] handed to them at construction. The default
//! discards everything; [`TracingDiagnostics`] forwards to `tracing`.

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace,
    Debug,
    Warn,
}

/// A single reported event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    /// Unit being generated when the event was reported
    pub unit: String,
    pub message: String,
}

pub trait Diagnostics: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Discards all diagnostics
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn report(&self, _diagnostic: Diagnostic) {}
}

/// Forwards diagnostics to the `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        let Diagnostic {
            level,
            unit,
            message,
        } = diagnostic;
        match level {
            Level::Trace => tracing::trace!(unit = %unit, "{}", message),
            Level::Debug => tracing::debug!(unit = %unit, "{}", message),
            Level::Warn => tracing::warn!(unit = %unit, "{}", message),
        }
    }
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn at_level(&self, level: Level) -> Vec<Diagnostic> {
        self.events()
            .into_iter()
            .filter(|d| d.level == level)
            .collect()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        match self.events.lock() {
            Ok(mut events) => events.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}

/// Reporter bound to one unit
#[derive(Clone)]
pub(crate) struct Reporter {
    sink: Arc<dyn Diagnostics>,
    unit: String,
}

impl Reporter {
    pub(crate) fn new(sink: Arc<dyn Diagnostics>, unit: &str) -> Self {
        Self {
            sink,
            unit: unit.to_string(),
        }
    }

    fn emit(&self, level: Level, message: String) {
        self.sink.report(Diagnostic {
            level,
            unit: self.unit.clone(),
            message,
        });
    }

    pub(crate) fn trace(&self, message: impl Into<String>) {
        self.emit(Level::Trace, message.into());
    }

    pub(crate) fn debug(&self, message: impl Into<String>) {
        self.emit(Level::Debug, message.into());
    }

    pub(crate) fn warn(&self, message: impl Into<String>) {
        self.emit(Level::Warn, message.into());
    }
}
