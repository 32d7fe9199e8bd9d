//! Token advertisement for the host report engine.
//!
//! The modules exposed here contribute the user-listing tokens to the host's
//! token catalog and maintain the per-section "other tokens" structure the
//! report engine consumes at render time.

#![warn(missing_docs, clippy::pedantic)]

pub mod catalog;
pub mod parsed;

pub use catalog::{TokenCatalog, UserTokens, register_tokens, register_user_tokens};
pub use parsed::{ParsedTokens, TokenSection};
