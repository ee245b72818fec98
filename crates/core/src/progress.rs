//! Progress reporting.
//!
//! The pipeline emits a linear trace of human-readable messages (stage
//! counts, nesting decisions). Messages always go to the `log` facade; a
//! [`LogSink`] can additionally be attached to receive them directly, e.g.
//! to show them in a front end. Messages carry no control-flow meaning.

use std::fmt;

/// Pipeline stage a message originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Filtering drawing entities into primitives.
    Collect,
    /// Building the planar graph.
    Graph,
    /// Enumerating closed loops.
    Loops,
    /// Turning loops into polygons.
    Polygons,
    /// Assigning scribes.
    Scribes,
    /// Selecting pieces and nesting holes.
    Nesting,
    /// Detecting drill holes.
    DrillHoles,
    /// Classifying and building the catalogue.
    Output,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Collect => "collect",
            Stage::Graph => "graph",
            Stage::Loops => "loops",
            Stage::Polygons => "polygons",
            Stage::Scribes => "scribes",
            Stage::Nesting => "nesting",
            Stage::DrillHoles => "drill-holes",
            Stage::Output => "output",
        };
        f.write_str(name)
    }
}

/// Receiver for diagnostic messages.
pub trait LogSink: Send + Sync {
    /// Called once per message, in pipeline order.
    fn message(&self, stage: Stage, text: &str);
}

impl<F> LogSink for F
where
    F: Fn(Stage, &str) + Send + Sync,
{
    fn message(&self, stage: Stage, text: &str) {
        self(stage, text)
    }
}

/// Forwards messages to the `log` facade and an optional sink.
#[derive(Default)]
pub struct ProgressLog {
    sink: Option<Box<dyn LogSink>>,
}

impl ProgressLog {
    /// Creates a relay that only writes to the `log` facade.
    pub fn new() -> Self {
        Self { sink: None }
    }

    /// Creates a relay that also forwards to `sink`.
    pub fn with_sink(sink: Box<dyn LogSink>) -> Self {
        Self { sink: Some(sink) }
    }

    /// Emits an info-level message.
    pub fn info(&self, stage: Stage, text: impl AsRef<str>) {
        let text = text.as_ref();
        log::info!("[{}] {}", stage, text);
        if let Some(sink) = &self.sink {
            sink.message(stage, text);
        }
    }

    /// Emits a debug-level message. Not forwarded to the sink.
    pub fn debug(&self, stage: Stage, text: impl AsRef<str>) {
        log::debug!("[{}] {}", stage, text.as_ref());
    }

    /// Emits a warning. Forwarded to the sink.
    pub fn warn(&self, stage: Stage, text: impl AsRef<str>) {
        let text = text.as_ref();
        log::warn!("[{}] {}", stage, text);
        if let Some(sink) = &self.sink {
            sink.message(stage, text);
        }
    }
}

impl fmt::Debug for ProgressLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressLog")
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_sink_receives_info_and_warn() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&seen);
        let log = ProgressLog::with_sink(Box::new(move |stage: Stage, text: &str| {
            captured
                .lock()
                .expect("lock")
                .push(format!("{stage}: {text}"));
        }));

        log.info(Stage::Graph, "12 nodes");
        log.debug(Stage::Graph, "not forwarded");
        log.warn(Stage::Loops, "budget reached");

        let seen = seen.lock().expect("lock");
        assert_eq!(
            *seen,
            vec!["graph: 12 nodes".to_string(), "loops: budget reached".to_string()]
        );
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::DrillHoles.to_string(), "drill-holes");
    }
}
