//! mev-flood argument engine.
//!
//! Library crate exposing all modules for use by integration tests
//! and the `mevflood` binary.

pub mod args;
pub mod chain;
pub mod config;
pub mod engine;
pub mod storage;
pub mod types;
