//! All-users listing tokens for site-management report templates.
//!
//! Depend on this crate to get `[allusers]` and `[allusers.table]` support.
//! It bundles the internal crates behind feature flags so embedders can pull
//! in only the renderer, or the full hook wiring.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use report_primitives as primitives;

/// Token catalog and parsed-token sections (enabled by `tokens` feature).
#[cfg(feature = "tokens")]
pub use report_tokens as tokens;

/// User record extraction and rendering (enabled by `render` feature).
#[cfg(feature = "render")]
pub use report_render as render;

/// Token resolution hooks (enabled by `kernel` feature).
#[cfg(feature = "kernel")]
pub use report_kernel as kernel;

/// Configuration management (enabled by `config` feature).
#[cfg(feature = "config")]
pub use report_config as config;

/// Tracing setup (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use report_telemetry as telemetry;

/// The hook-facing extension type.
#[cfg(feature = "kernel")]
pub use report_kernel::AllUsersExtension;
