//! `stateflow validate` - parse a definition and report its shape.

use std::path::Path;

use anyhow::Result;

pub fn run(spec_path: &Path) -> Result<()> {
    let (workflow, initial) = super::load_workflow(spec_path)?;

    println!(
        "workflow ok: initial state '{}', {} transition(s)",
        initial,
        workflow.len()
    );
    for transition in workflow.transitions() {
        println!("  {}", transition);
    }
    Ok(())
}
