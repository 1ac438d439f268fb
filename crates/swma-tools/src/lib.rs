//! # SWMA Tools
//!
//! The monitors a user can pick from, the registry that lists them and the
//! [`RenderContext`] they draw through.
//!
//! A tool runs one fetch, normalize and render pipeline and hands its output
//! to the context. It never talks to a terminal or a UI framework directly.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod context;
pub mod registry;
pub mod tools;

pub use context::{RenderContext, Selection, ToolEnv};
pub use registry::{ToolEntry, ToolRegistry, WELCOME};
pub use tools::Tool;
