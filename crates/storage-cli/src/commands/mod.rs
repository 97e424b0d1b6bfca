//! Command implementations for the cloud storage CLI.
//!
//! Each module executes one group of subcommands against a [`Session`]
//! and renders the result in the requested output format.
//!
//! [`Session`]: crate::Session

pub mod browse;
pub mod completions;
pub mod config;
pub mod download;
pub mod modify;
pub mod upload;
