//! Declarative guarded state machines.
//!
//! A [`Workflow`] is an immutable registry of named [`Transition`]s, each
//! declaring which source states it accepts, which target state it produces,
//! and optionally guard conditions and per-state denial messages. A
//! [`Machine`] binds a record's current state to a workflow and only mutates
//! it through declared transitions, keeping an append-only history of
//! [`TransitionRecord`]s.
//!
//! ```
//! use std::sync::Arc;
//! use stateflow::{Machine, Transition, Workflow};
//!
//! let workflow = Arc::new(
//!     Workflow::builder()
//!         .transition(
//!             Transition::new("publish")
//!                 .sources(["draft".to_string()])
//!                 .target("published".to_string())
//!                 .deny_message("published".to_string(), "Already published."),
//!         )
//!         .build()
//!         .unwrap(),
//! );
//!
//! let mut machine = Machine::new(workflow, "draft".to_string());
//! machine.trigger("publish", &()).unwrap();
//! assert_eq!(machine.state(), "published");
//!
//! let err = machine.trigger("publish", &()).unwrap_err();
//! assert_eq!(err.to_string(), "Already published.");
//! ```

pub mod error;
pub mod machine;
pub mod spec;
pub mod transition;
pub mod workflow;

pub use error::{TransitionError, WorkflowError};
pub use machine::{Machine, TransitionRecord};
pub use spec::{SourcesSpec, TransitionSpec, WorkflowSpec};
pub use transition::{Guard, SourceSpec, TargetSpec, Transition};
pub use workflow::{Workflow, WorkflowBuilder};
