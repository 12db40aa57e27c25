//! Flutter-facing bindings for `scholia_core`.

pub mod api;
