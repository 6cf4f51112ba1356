//! Subcommand implementations. Each module exposes an `Args` struct and a
//! `run_*` entry point taking the resolved [`crate::output::OutputMode`].

pub mod analyze;
pub mod centrality;
pub mod communities;
pub mod compare;
pub mod cycles;
pub mod stats;
pub mod transitions;
