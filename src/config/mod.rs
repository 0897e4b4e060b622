//! Configuration management
//!
//! Process-wide settings for the command-line tool: the default key
//! algorithm, the decoder's nesting bound and an optional network id. Values
//! come from the environment and can be overridden by a TOML file.

pub mod settings;

pub use settings::{Config, GLOBAL_CONFIG};
