//! Subcommands

pub mod check;
pub mod run;
