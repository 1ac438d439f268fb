//! # SWMA
//!
//! Command line shell of the Space Weather Monitor.
//!
//! Parses arguments, loads configuration and runs registry tools through a
//! [`terminal::CliContext`] that writes charts and images to disk.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod error;
pub mod terminal;

pub use app::{execute, load_config, logging_config, Invocation};
pub use cli::{normalize_args, Cli, Command, RunArgs};
pub use error::{CliError, CliResult};
pub use terminal::CliContext;
