//! Command-line interface
//!
//! This module contains the CLI commands and argument parsing
//! for the `xrpl-codec` binary.

pub mod commands;

pub use commands::{parse_field_map, Command, Opt};
