//! Serde model for workflow definition files.
//!
//! Definitions describe string-state workflows loaded at runtime, e.g. by
//! the `stateflow` binary. Guards are code-level and never appear here.
//!
//! ```json
//! {
//!   "initial": "pending",
//!   "transitions": [
//!     { "name": "pay", "from": ["pending"], "to": "paid",
//!       "deny": { "paid": "This order was paid." } }
//!   ]
//! }
//! ```
//!
//! `from` accepts a list of states, a single state, or the wildcards `"*"`
//! (any state) and `"+"` (any state but the target). An omitted `to` leaves
//! the state unchanged.

use std::collections::HashMap;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;
use crate::transition::Transition;
use crate::workflow::Workflow;

/// A whole workflow definition: the initial state plus its transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSpec {
    pub initial: String,
    pub transitions: Vec<TransitionSpec>,
}

/// One transition declaration as it appears in a definition file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub name: String,
    pub from: SourcesSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub deny: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_failure: Option<String>,
}

/// Source states in definition-file form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourcesSpec {
    States(Vec<String>),
    Any,
    AnyButTarget,
}

impl<'de> Deserialize<'de> for SourcesSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(String),
            Many(Vec<String>),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::One(s) if s == "*" => SourcesSpec::Any,
            Raw::One(s) if s == "+" => SourcesSpec::AnyButTarget,
            Raw::One(s) => SourcesSpec::States(vec![s]),
            Raw::Many(states) => SourcesSpec::States(states),
        })
    }
}

impl Serialize for SourcesSpec {
    fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
        match self {
            SourcesSpec::States(states) => states.serialize(serializer),
            SourcesSpec::Any => serializer.serialize_str("*"),
            SourcesSpec::AnyButTarget => serializer.serialize_str("+"),
        }
    }
}

impl WorkflowSpec {
    /// Build the workflow this definition describes, returning it with the
    /// declared initial state. Runs the same validation as hand-built
    /// workflows.
    pub fn into_workflow(self) -> Result<(Workflow<String, ()>, String), WorkflowError> {
        let mut builder = Workflow::builder();
        for spec in self.transitions {
            let mut transition = Transition::new(spec.name);
            transition = match spec.from {
                SourcesSpec::States(states) => transition.sources(states),
                SourcesSpec::Any => transition.any_source(),
                SourcesSpec::AnyButTarget => transition.any_source_but_target(),
            };
            transition = match spec.to {
                Some(target) => transition.target(target),
                None => transition.stay(),
            };
            for (state, message) in spec.deny {
                transition = transition.deny_message(state, message);
            }
            if let Some(state) = spec.on_failure {
                transition = transition.on_failure(state);
            }
            builder = builder.transition(transition);
        }
        Ok((builder.build()?, self.initial))
    }
}
