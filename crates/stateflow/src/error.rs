//! Error types for workflow construction and transition invocation.

use std::fmt;
use thiserror::Error;

/// Errors raised when invoking a transition on a
/// [`Machine`](crate::Machine).
#[derive(Debug, Error)]
pub enum TransitionError<S: fmt::Debug + fmt::Display> {
    /// The current state is not in the transition's source set.
    ///
    /// `message` is resolved before construction: the transition's denial
    /// table is keyed by the current state, falling back to a default that
    /// names the transition and the state. `Display` yields exactly the
    /// resolved message.
    #[error("{message}")]
    NotAllowed {
        transition: String,
        from: S,
        message: String,
    },

    /// Source membership passed but a guard condition rejected the call.
    #[error("guard rejected transition '{transition}' from state '{from}'")]
    GuardRejected { transition: String, from: S },

    /// No transition with this name exists in the workflow.
    #[error("unknown transition: {0}")]
    Unknown(String),

    /// The action passed to [`Machine::trigger_with`](crate::Machine::trigger_with)
    /// failed. The state has moved to the transition's failure state if one
    /// was declared, and is untouched otherwise.
    #[error("transition '{transition}' action failed: {source}")]
    ActionFailed {
        transition: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Errors detected while building a [`Workflow`](crate::Workflow).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("duplicate transition name: {0}")]
    DuplicateTransition(String),

    /// The transition admits no state and can never fire: either its source
    /// list is empty, or it combines any-but-target sources with an
    /// unchanged target.
    #[error("transition '{0}' can never fire from any state")]
    SourcelessTransition(String),
}
