//! Library surface of the `stateflow` binary, exposed so the subcommand
//! handlers can be exercised directly by integration tests.

pub mod cli;
