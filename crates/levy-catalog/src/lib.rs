//! levy-catalog
//!
//! The faction catalog: an immutable-after-load mapping from a faction
//! key to a seven-slot troop composition, with deterministic fallback
//! resolution that can never fail to return a value.
//!
//! Alongside the composition map the catalog carries the small identifier
//! tables that purchase kinds draw from: culture-id aliases (raw host
//! culture id → canonical faction key), per-faction champion identifiers,
//! and per-faction marine identifiers.
//!
//! Pure data + lookup. No IO; loading and validation live in levy-config.

mod catalog;
mod composition;

pub use catalog::{Catalog, CatalogError, DEFAULT_CHAMPION};
pub use composition::{Composition, Role};
