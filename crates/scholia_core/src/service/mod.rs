//! UI-facing request handlers.
//!
//! # Responsibility
//! - Keep FFI/CLI layers decoupled from store internals.
//! - Return plain serializable envelopes instead of errors.

pub mod handlers;
