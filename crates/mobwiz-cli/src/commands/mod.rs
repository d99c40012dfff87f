//! CLI command implementations for mobwiz.
//!
//! Each module corresponds to a subcommand (`mobwiz <command>`).

pub mod create;
pub mod list;
