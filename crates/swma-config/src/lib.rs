//! # SWMA Config
//!
//! Type-safe configuration for the Space Weather Monitor.
//!
//! Configuration is read once at startup from a TOML file, patched with
//! environment overrides, validated, and then passed by reference. Nothing
//! here is global or reloadable.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
