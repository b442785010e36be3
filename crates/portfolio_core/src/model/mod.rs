//! Portfolio content records.
//!
//! # Responsibility
//! - Define the editable records persisted by content sections.
//! - Keep the JSON shape stable for existing stored collections.
//!
//! # Invariants
//! - Every record exposes a natural key (`name` for skills, `id` otherwise).
//! - Icon references never round-trip through storage.

pub mod experience;
pub mod icon;
pub mod project;
pub mod skill;
pub mod theme;
