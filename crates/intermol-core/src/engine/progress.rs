//! Progress events of a contact run.
//!
//! A run walks through four phases (valence model, feature extraction,
//! contact detection, refinement). Detection reports one step per detector
//! family and refinement reports each pass it applied.

/// Events emitted while a contact run advances through its phases.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// A workflow phase begins, e.g. `"Contact Detection"`.
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// Detection is about to run `total_steps` detector families.
    TaskStart { total_steps: u64 },
    /// One detector family finished. Under the `parallel` feature these
    /// arrive in completion order.
    TaskIncrement,
    TaskFinish,

    /// An enabled refinement pass finished after clearing `removed` contacts.
    PassFinish { pass: &'static str, removed: usize },
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback. A reporter without a
/// callback discards every event.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `f` between a `PhaseStart` and a `PhaseFinish` event.
    pub fn phase<T>(&self, name: &'static str, f: impl FnOnce() -> T) -> T {
        self.report(Progress::PhaseStart { name });
        let out = f();
        self.report(Progress::PhaseFinish);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn phase_wraps_closure_in_start_and_finish_events() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|e| events.lock().unwrap().push(e)));
        let value = reporter.phase("Feature Extraction", || 7);
        drop(reporter);
        assert_eq!(value, 7);
        assert_eq!(
            events.into_inner().unwrap(),
            vec![Progress::PhaseStart { name: "Feature Extraction" }, Progress::PhaseFinish]
        );
    }

    #[test]
    fn reporter_without_callback_is_silent() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::PassFinish {
            pass: "hydrophobic",
            removed: 3,
        });
        assert_eq!(reporter.phase("Refinement", || 1), 1);
    }
}
