//! `stateflow check` - would this transition be allowed from a given state.

use std::path::Path;

use anyhow::{bail, Result};
use stateflow::Machine;

pub fn run(spec_path: &Path, state: &str, transition: &str) -> Result<()> {
    let (workflow, _initial) = super::load_workflow(spec_path)?;
    let machine = Machine::new(workflow, state.to_string());

    if machine.can_proceed(transition, &()) {
        println!("allowed: '{}' from state '{}'", transition, state);
        Ok(())
    } else {
        bail!("not allowed: '{}' from state '{}'", transition, state)
    }
}
