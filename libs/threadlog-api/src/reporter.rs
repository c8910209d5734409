use std::sync::{Mutex, PoisonError};

use crate::error::FormatError;

/// Error sink a formatter is bound to at construction.
///
/// Replaces a back-pointer to the owning worker thread: the thread injects
/// its reporting capability, keeping errors attributable to that thread.
/// One sink may be shared process-wide, so implementations must tolerate
/// concurrent calls from many formatter-owning threads.
pub trait Reporter: Send + Sync {
    fn report(&self, err: &FormatError);
}

/// Forwards every failure as a structured `tracing` error event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, err: &FormatError) {
        tracing::error!(error = %err, "format error");
    }
}

/// Accumulates failures in memory.
///
/// This is how callers inspect the side channel — which is mandatory for
/// [`crate::parse::parse_addr`], whose error return is indistinguishable
/// from a legitimate all-zero address.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    errors: Mutex<Vec<FormatError>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything reported so far.
    pub fn take(&self) -> Vec<FormatError> {
        let mut errors = self.errors.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *errors)
    }

    pub fn len(&self) -> usize {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, err: &FormatError) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(err.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_reporter_drains_in_order() {
        let reporter = CollectingReporter::new();
        reporter.report(&FormatError::MalformedAddr { text: "x".into() });
        reporter.report(&FormatError::ArityMismatch { expected: 2, got: 1 });
        assert_eq!(reporter.len(), 2);

        let errors = reporter.take();
        assert!(matches!(errors[0], FormatError::MalformedAddr { .. }));
        assert!(matches!(errors[1], FormatError::ArityMismatch { .. }));
        assert!(reporter.is_empty());
    }
}
