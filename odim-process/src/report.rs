//! Per-stage warning and error accumulation.

use log::{error, warn};

/// Collects the warnings and errors raised while a stage runs.
///
/// Stages append messages; the driver drains both lists to the global
/// logger after the stage returns. A warning is informational; an error
/// accompanies a fatal stage result for the current file.
#[derive(Debug, Default)]
pub struct StageReport {
    stage: &'static str,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl StageReport {
    /// Creates an empty report labelled with the stage name.
    pub fn new(stage: &'static str) -> Self {
        Self {
            stage,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// The stage this report belongs to.
    pub fn stage(&self) -> &'static str {
        self.stage
    }

    /// Records a recoverable condition.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Records a fatal condition.
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Accumulated warnings, in the order they were raised.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Accumulated errors, in the order they were raised.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// True when a fatal condition was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Emits every accumulated message through the `log` facade and clears
    /// the lists, preserving order.
    pub fn drain_to_log(&mut self) {
        for message in self.warnings.drain(..) {
            warn!("[{}] {}", self.stage, message);
        }
        for message in self.errors.drain(..) {
            error!("[{}] {}", self.stage, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_accumulates_in_order() {
        let mut report = StageReport::new("dealias");
        report.warn("first");
        report.warn("second");
        report.error("fatal");

        assert_eq!(report.stage(), "dealias");
        assert_eq!(report.warnings(), &["first", "second"]);
        assert_eq!(report.errors(), &["fatal"]);
        assert!(report.has_errors());
    }

    #[test]
    fn test_drain_empties_lists() {
        let mut report = StageReport::new("superob");
        report.warn("message");
        report.drain_to_log();

        assert!(report.warnings().is_empty());
        assert!(!report.has_errors());
    }
}
