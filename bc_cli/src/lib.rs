//! Internal modules for the `bc` command-line tool.
//!
//! This library provides command parsing, configuration, the HTTP events
//! provider and command execution used by the `bc` binary.

pub mod app;
pub mod commands;
pub mod config;
pub mod http_provider;
