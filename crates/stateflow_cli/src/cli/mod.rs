//! Subcommand handlers for the stateflow binary.

pub mod check;
pub mod run;
pub mod validate;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use stateflow::{Workflow, WorkflowSpec};

/// Read and parse a workflow definition file.
pub(crate) fn load_spec(path: &Path) -> Result<WorkflowSpec> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read workflow definition: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid workflow definition: {}", path.display()))
}

/// Load a definition and build its workflow in one step.
pub(crate) fn load_workflow(path: &Path) -> Result<(Arc<Workflow<String, ()>>, String)> {
    let spec = load_spec(path)?;
    let (workflow, initial) = spec
        .into_workflow()
        .with_context(|| format!("workflow definition failed validation: {}", path.display()))?;
    Ok((Arc::new(workflow), initial))
}
