//! Cloud storage CLI library.
//!
//! Exposes the argument definitions, command implementations and output
//! formatters of the `cloud-storage` binary so they can be tested.

#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unnecessary_wraps)]

pub mod actions;
pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;
pub mod session;

pub use actions::ConfigAction;
pub use session::Session;
