//! A record's state field bound to a workflow.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TransitionError;
use crate::workflow::Workflow;

/// An applied transition: which transition fired, the states it connected,
/// and when.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRecord<S> {
    pub transition: String,
    pub from: S,
    pub to: S,
    pub timestamp: DateTime<Utc>,
    /// True when the transition's action failed and `to` is the declared
    /// failure state rather than the target.
    pub failed: bool,
}

/// What a validated invocation will do; captured before any mutation so the
/// workflow borrow is released.
struct Plan<S> {
    to: S,
    fallback: Option<S>,
}

/// A state value that only changes through the transitions its workflow
/// declares. Keeps an append-only history of applied transitions.
pub struct Machine<S, C> {
    workflow: Arc<Workflow<S, C>>,
    state: S,
    history: Vec<TransitionRecord<S>>,
}

impl<S, C> Machine<S, C>
where
    S: Clone + Eq + Hash + fmt::Debug + fmt::Display,
{
    /// Bind a state value to a workflow. The initial state is taken as-is;
    /// every later change goes through [`trigger`](Self::trigger) or
    /// [`trigger_with`](Self::trigger_with).
    pub fn new(workflow: Arc<Workflow<S, C>>, initial: S) -> Self {
        Self {
            workflow,
            state: initial,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn history(&self) -> &[TransitionRecord<S>] {
        &self.history
    }

    pub fn workflow(&self) -> &Arc<Workflow<S, C>> {
        &self.workflow
    }

    /// Whether `name` would be allowed right now: source membership and all
    /// guards pass. Never mutates and never logs.
    pub fn can_proceed(&self, name: &str, ctx: &C) -> bool {
        self.workflow
            .get(name)
            .is_some_and(|t| t.admits(&self.state) && t.guards_pass(ctx))
    }

    /// Names of transitions that can proceed from the current state, in
    /// declaration order.
    pub fn available_transitions(&self, ctx: &C) -> Vec<&str> {
        self.workflow
            .transitions()
            .filter(|t| t.admits(&self.state) && t.guards_pass(ctx))
            .map(|t| t.name())
            .collect()
    }

    /// Invoke a transition: validate source membership, then guards, then
    /// move to the target and append a history record.
    pub fn trigger(
        &mut self,
        name: &str,
        ctx: &C,
    ) -> Result<TransitionRecord<S>, TransitionError<S>> {
        let plan = self.plan(name, ctx)?;
        Ok(self.commit(name, plan.to, false))
    }

    /// Invoke a transition around a fallible action. Validation happens
    /// first; the action runs against the context before the state change
    /// commits. If the action fails, the state moves to the transition's
    /// declared failure state (recorded with `failed = true`) or stays put
    /// when none is declared, and the error surfaces as
    /// [`TransitionError::ActionFailed`] either way.
    pub fn trigger_with<R, E>(
        &mut self,
        name: &str,
        ctx: &mut C,
        action: impl FnOnce(&mut C) -> Result<R, E>,
    ) -> Result<R, TransitionError<S>>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let plan = self.plan(name, ctx)?;
        match action(ctx) {
            Ok(value) => {
                self.commit(name, plan.to, false);
                Ok(value)
            }
            Err(err) => {
                if let Some(fallback) = plan.fallback {
                    warn!(
                        transition = name,
                        from = %self.state,
                        to = %fallback,
                        "transition action failed, moving to failure state"
                    );
                    self.commit(name, fallback, true);
                }
                Err(TransitionError::ActionFailed {
                    transition: name.to_string(),
                    source: Box::new(err),
                })
            }
        }
    }

    /// Validate an invocation without mutating. Errors carry the resolved
    /// denial message for source mismatches.
    fn plan(&self, name: &str, ctx: &C) -> Result<Plan<S>, TransitionError<S>> {
        let transition = self
            .workflow
            .get(name)
            .ok_or_else(|| TransitionError::Unknown(name.to_string()))?;

        if !transition.admits(&self.state) {
            warn!(transition = name, state = %self.state, "transition not allowed");
            return Err(TransitionError::NotAllowed {
                transition: name.to_string(),
                from: self.state.clone(),
                message: transition.denial_message(&self.state),
            });
        }

        if !transition.guards_pass(ctx) {
            warn!(transition = name, state = %self.state, "transition guard rejected");
            return Err(TransitionError::GuardRejected {
                transition: name.to_string(),
                from: self.state.clone(),
            });
        }

        Ok(Plan {
            to: transition.target_state(&self.state),
            fallback: transition.fallback_state().cloned(),
        })
    }

    fn commit(&mut self, name: &str, to: S, failed: bool) -> TransitionRecord<S> {
        let record = TransitionRecord {
            transition: name.to_string(),
            from: std::mem::replace(&mut self.state, to),
            to: self.state.clone(),
            timestamp: Utc::now(),
            failed,
        };
        debug!(
            transition = name,
            from = %record.from,
            to = %record.to,
            failed,
            "transition applied"
        );
        self.history.push(record.clone());
        record
    }
}

impl<S: fmt::Debug, C> fmt::Debug for Machine<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("state", &self.state)
            .field("history", &self.history)
            .finish()
    }
}
