//! Content use-case services.
//!
//! # Responsibility
//! - Hydrate editable collections from storage against compiled-in defaults.
//! - Persist the theme preference.
//! - Keep section/FFI callers decoupled from storage details.

pub mod collection_service;
pub mod theme_service;
