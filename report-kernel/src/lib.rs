//! Token resolution for the host report engine.
//!
//! This crate wires the data-source seam, blob decoding, and rendering into
//! the two hook entry points the host invokes: token catalog contribution and
//! token substitution. The extension is an explicit instance; hosts hold it
//! for as long as their hooks stay registered.

#![warn(missing_docs, clippy::pedantic)]

mod decode;
mod extension;
mod source;

pub use decode::decode_users;
pub use extension::{AllUsersExtension, RenderedUsers, ReportsHost};
pub use source::{FnUserSource, InMemoryUserSource, SourceError, SourceResult, UserSource};
