//! Flutter-facing bindings for the portfolio core.

pub mod api;
