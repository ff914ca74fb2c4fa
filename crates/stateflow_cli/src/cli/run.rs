//! `stateflow run` - apply a sequence of transitions from the initial state.

use std::path::Path;

use anyhow::{anyhow, Result};
use stateflow::Machine;
use tracing::info;

pub fn run(spec_path: &Path, transitions: &[String]) -> Result<()> {
    let (workflow, initial) = super::load_workflow(spec_path)?;
    let mut machine = Machine::new(workflow, initial);

    println!("initial state: {}", machine.state());
    for name in transitions {
        let record = machine
            .trigger(name, &())
            .map_err(|err| anyhow!("{err}"))?;
        info!(transition = %record.transition, "applied");
        println!("{}: {} -> {}", record.transition, record.from, record.to);
    }
    println!("final state: {}", machine.state());
    Ok(())
}
