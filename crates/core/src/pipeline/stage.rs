use std::fmt;
use std::time::{Duration, Instant};

/// The states a conversion moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Received,
    Classified,
    Normalized,
    SubtypeResolved,
    Localized,
    Rendered,
    Exported,
    /// The artifact was consumed or dropped.
    Cleaned,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Received => "received",
            Stage::Classified => "classified",
            Stage::Normalized => "normalized",
            Stage::SubtypeResolved => "subtype-resolved",
            Stage::Localized => "localized",
            Stage::Rendered => "rendered",
            Stage::Exported => "exported",
            Stage::Cleaned => "cleaned",
        }
    }

    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Received => Some(Stage::Classified),
            Stage::Classified => Some(Stage::Normalized),
            Stage::Normalized => Some(Stage::SubtypeResolved),
            Stage::SubtypeResolved => Some(Stage::Localized),
            Stage::Localized => Some(Stage::Rendered),
            Stage::Rendered => Some(Stage::Exported),
            Stage::Exported => Some(Stage::Cleaned),
            Stage::Cleaned => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records stage transitions of one run and logs them at debug level.
#[derive(Debug)]
pub struct StageTrace {
    label: String,
    current: Stage,
    started: Instant,
    entered: Instant,
    timings: Vec<(Stage, Duration)>,
}

impl StageTrace {
    pub fn start(label: impl Into<String>) -> Self {
        let label = label.into();
        log::debug!("[{}] {}", label, Stage::Received);
        let now = Instant::now();
        Self {
            label,
            current: Stage::Received,
            started: now,
            entered: now,
            timings: Vec::new(),
        }
    }

    pub fn current(&self) -> Stage {
        self.current
    }

    /// Moves to the next stage. Stages cannot be skipped.
    pub fn advance(&mut self, to: Stage) {
        debug_assert_eq!(self.current.next(), Some(to), "stage skipped");
        let now = Instant::now();
        self.timings.push((self.current, now - self.entered));
        log::debug!(
            "[{}] {} -> {} ({:.2?})",
            self.label,
            self.current,
            to,
            now - self.entered
        );
        self.current = to;
        self.entered = now;
    }

    /// Time spent in each completed stage.
    pub fn timings(&self) -> &[(Stage, Duration)] {
        &self.timings
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn fail(&self, err: &dyn fmt::Display) {
        log::debug!(
            "[{}] failed after reaching '{}': {}",
            self.label,
            self.current,
            err
        );
    }
}
