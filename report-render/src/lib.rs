//! Rendering of synchronized user records for report tokens.
//!
//! Records arrive in whatever shape the synchronization process produced, so
//! every attribute is read through an ordered list of alias candidates and
//! degrades to a sentinel instead of failing the render.

#![warn(missing_docs, clippy::pedantic)]

pub mod date;
pub mod escape;
pub mod record;
pub mod render;

pub use record::{FieldAliases, UserRecord};
pub use render::{UserRenderer, render_as_list, render_as_table};
