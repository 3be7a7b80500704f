//! CLI library components for mtgaup.

pub mod cli;
pub mod commands;
pub mod logging;
