//! Per-generation progress reporting.

use super::route::Route;

/// Snapshot handed to a [`GenerationObserver`] after each evolved generation.
#[derive(Debug, Clone, Copy)]
pub struct GenerationReport<'r, 'a> {
    /// Index of the generation just evaluated (the random initial population is 0).
    pub generation: usize,

    /// Configured generation budget.
    pub total_generations: usize,

    /// Fittest route of this generation.
    pub fittest: &'r Route<'a>,

    /// Best length seen so far across the whole run.
    pub best_ever_length: f64,
}

impl GenerationReport<'_, '_> {
    pub fn fittest_length(&self) -> f64 {
        self.fittest.length()
    }
}

/// Receives a [`GenerationReport`] after every evolved generation.
///
/// Implemented for any `FnMut(&GenerationReport)` closure.
pub trait GenerationObserver {
    fn on_generation(&mut self, report: &GenerationReport<'_, '_>);
}

impl<F> GenerationObserver for F
where
    F: FnMut(&GenerationReport<'_, '_>),
{
    fn on_generation(&mut self, report: &GenerationReport<'_, '_>) {
        self(report)
    }
}

/// Observer that ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {
    fn on_generation(&mut self, _report: &GenerationReport<'_, '_>) {}
}
