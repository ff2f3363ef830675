//! Orchestration of resolved parameters into script runs.

pub mod liquid;
