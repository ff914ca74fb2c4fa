//! The transition registry.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::WorkflowError;
use crate::transition::Transition;

/// An immutable registry of named transitions. Built once through
/// [`WorkflowBuilder`], then shared by every machine bound to it.
pub struct Workflow<S, C> {
    transitions: Vec<Transition<S, C>>,
    by_name: HashMap<String, usize>,
}

impl<S, C> Workflow<S, C>
where
    S: Clone + Eq + Hash + fmt::Debug + fmt::Display,
{
    pub fn builder() -> WorkflowBuilder<S, C> {
        WorkflowBuilder {
            transitions: Vec::new(),
        }
    }

    /// Look up a transition by name.
    pub fn get(&self, name: &str) -> Option<&Transition<S, C>> {
        self.by_name.get(name).map(|&idx| &self.transitions[idx])
    }

    /// Transitions in declaration order.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition<S, C>> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl<S: fmt::Debug, C> fmt::Debug for Workflow<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workflow")
            .field("transitions", &self.transitions)
            .finish()
    }
}

/// Accumulates transition declarations and validates them on `build`.
pub struct WorkflowBuilder<S, C> {
    transitions: Vec<Transition<S, C>>,
}

impl<S, C> WorkflowBuilder<S, C>
where
    S: Clone + Eq + Hash + fmt::Debug + fmt::Display,
{
    pub fn transition(mut self, transition: Transition<S, C>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Validate and freeze the registry. Rejects duplicate transition names
    /// and transitions whose source set admits no state.
    pub fn build(self) -> Result<Workflow<S, C>, WorkflowError> {
        let mut by_name = HashMap::with_capacity(self.transitions.len());
        for (idx, transition) in self.transitions.iter().enumerate() {
            if transition.has_empty_sources() {
                return Err(WorkflowError::SourcelessTransition(
                    transition.name().to_string(),
                ));
            }
            if by_name
                .insert(transition.name().to_string(), idx)
                .is_some()
            {
                return Err(WorkflowError::DuplicateTransition(
                    transition.name().to_string(),
                ));
            }
        }
        Ok(Workflow {
            transitions: self.transitions,
            by_name,
        })
    }
}
