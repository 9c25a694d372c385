//! Error types for the effects engine.

use thiserror::Error;

/// Result type for engine operations.
pub type RevelarResult<T> = Result<T, RevelarError>;

/// Errors that can occur while running page effects.
///
/// Reveal actions are isolated: an error returned by one action is logged
/// and never prevents the rest of a batch from firing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RevelarError {
    /// A target element is not present in the page model.
    #[error("element not found: {id}")]
    MissingElement {
        /// Element id that failed to resolve
        id: String,
    },

    /// Counter text contained no numeric token.
    #[error("no numeric token in counter text: {text:?}")]
    UnparseableCounter {
        /// The raw text that failed to parse
        text: String,
    },

    /// A reveal action reported a failure.
    #[error("reveal action failed for {target}: {message}")]
    ActionFailed {
        /// Target element id
        target: String,
        /// Failure description
        message: String,
    },
}

impl RevelarError {
    /// Create a missing-element error.
    #[must_use]
    pub fn missing_element(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }

    /// Create an unparseable-counter error.
    #[must_use]
    pub fn unparseable_counter(text: impl Into<String>) -> Self {
        Self::UnparseableCounter { text: text.into() }
    }

    /// Create an action-failed error.
    #[must_use]
    pub fn action_failed(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ActionFailed {
            target: target.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_element_display() {
        let err = RevelarError::missing_element("hero");
        assert!(err.to_string().contains("hero"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_unparseable_counter_display() {
        let err = RevelarError::unparseable_counter("Coming Soon");
        assert!(err.to_string().contains("Coming Soon"));
    }

    #[test]
    fn test_action_failed_display() {
        let err = RevelarError::action_failed("stat-1", "text vanished");
        assert!(err.to_string().contains("stat-1"));
        assert!(err.to_string().contains("text vanished"));
    }
}
