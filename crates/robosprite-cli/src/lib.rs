//! Robosprite CLI library.
//!
//! This crate provides the command implementations behind the `robosprite`
//! binary, plus configuration loading and logging setup.

pub mod commands;
pub mod config;
pub mod logging;
