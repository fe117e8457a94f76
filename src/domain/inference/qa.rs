//! Extractive question answering: predictions and the stored context.

use std::sync::{PoisonError, RwLock};

use crate::domain::foundation::Confidence;

/// Output of one question answering model call.
#[derive(Debug, Clone, PartialEq)]
pub struct QaPrediction {
    /// Answer span selected from the context.
    pub answer: String,
    pub confidence: Confidence,
}

impl QaPrediction {
    pub fn new(answer: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            answer: answer.into(),
            confidence,
        }
    }
}

/// The passage the service answers questions against.
///
/// Holds the last context supplied with a reset request. Non-reset requests
/// reuse it unchanged; it starts out empty and is never validated.
///
/// Resetting and reading happen under one write guard, so a reset call
/// always answers against its own context even with concurrent callers.
/// Across calls the last writer wins.
#[derive(Debug, Default)]
pub struct StoredContext {
    current: RwLock<String>,
}

impl StoredContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the context to answer against for one request.
    pub fn resolve(&self, supplied: &str, reset: bool) -> String {
        if reset {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *current = supplied.to_string();
            current.clone()
        } else {
            self.snapshot()
        }
    }

    /// Current stored context.
    pub fn snapshot(&self) -> String {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_empty() {
        let stored = StoredContext::new();
        assert_eq!(stored.resolve("ignored", false), "");
    }

    #[test]
    fn reset_adopts_supplied_context() {
        let stored = StoredContext::new();
        assert_eq!(
            stored.resolve("La capital de Francia es París", true),
            "La capital de Francia es París"
        );
        assert_eq!(stored.snapshot(), "La capital de Francia es París");
    }

    #[test]
    fn non_reset_ignores_supplied_context() {
        let stored = StoredContext::new();
        stored.resolve("first", true);
        assert_eq!(stored.resolve("second", false), "first");
        assert_eq!(stored.snapshot(), "first");
    }

    proptest! {
        #[test]
        fn context_persists_until_next_reset(
            reset_context in ".*",
            later in proptest::collection::vec(".*", 0..8),
        ) {
            let stored = StoredContext::new();
            prop_assert_eq!(stored.resolve(&reset_context, true), reset_context.clone());
            for supplied in later {
                prop_assert_eq!(stored.resolve(&supplied, false), reset_context.clone());
            }
        }
    }
}
