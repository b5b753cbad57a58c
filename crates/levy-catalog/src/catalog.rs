use std::collections::BTreeMap;

use crate::composition::Composition;

/// Champion identifier used when a faction has no champion entry.
pub const DEFAULT_CHAMPION: &str = "battanian_fian_champion";

/// A structural problem found while validating a loaded catalog.
///
/// Implements `std::error::Error` so loaders can propagate it through
/// anyhow chains without extra wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The configured default faction key has no composition entry.
    MissingDefaultFaction { key: String },
    /// A composition slot ended up empty (blank identifier in the data).
    EmptySlot { faction: String },
    /// An alias points at a faction key that does not exist.
    DanglingAlias { alias: String, target: String },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::MissingDefaultFaction { key } => {
                write!(f, "default faction key '{key}' has no composition entry")
            }
            CatalogError::EmptySlot { faction } => {
                write!(f, "faction '{faction}' has an empty composition slot")
            }
            CatalogError::DanglingAlias { alias, target } => {
                write!(f, "culture alias '{alias}' points at unknown faction '{target}'")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Read-only map from faction key to [`Composition`], plus the small
/// identifier tables the purchase kinds draw from. Built once at session
/// start; lookup-with-fallback only, no other behavior.
#[derive(Clone, Debug)]
pub struct Catalog {
    default_key: String,
    factions: BTreeMap<String, Composition>,
    /// Raw host culture id (trimmed, ASCII-lowercased) → faction key.
    aliases: BTreeMap<String, String>,
    /// Faction key → single elite identifier (the "savage" purchase).
    champions: BTreeMap<String, String>,
    /// Faction key → naval identifier (the "pirate" purchase).
    marines: BTreeMap<String, String>,
    /// Absolute last resort; makes `resolve` total even on a broken map.
    fallback: Composition,
}

impl Catalog {
    pub fn new(
        default_key: impl Into<String>,
        factions: BTreeMap<String, Composition>,
        aliases: BTreeMap<String, String>,
        champions: BTreeMap<String, String>,
        marines: BTreeMap<String, String>,
    ) -> Self {
        Self {
            default_key: default_key.into(),
            factions,
            aliases,
            champions,
            marines,
            fallback: Self::last_resort(),
        }
    }

    /// The fixed hardcoded composition returned when both the requested
    /// and the default key are absent. Should never be reached by a
    /// correctly initialized catalog.
    pub fn last_resort() -> Composition {
        Composition::full(
            "imperial_legionary",
            "imperial_palatine_guard",
            "imperial_elite_cataphract",
            "bucellarii",
            "imperial_legionary",
            "imperial_palatine_guard",
            "imperial_elite_cataphract",
        )
    }

    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    pub fn faction_keys(&self) -> impl Iterator<Item = &str> {
        self.factions.keys().map(String::as_str)
    }

    /// Structural validation for loaders. `resolve` stays total whether or
    /// not this passes; loaders call it so broken data is reported at
    /// startup instead of silently riding the fallback chain.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.factions.contains_key(&self.default_key) {
            return Err(CatalogError::MissingDefaultFaction {
                key: self.default_key.clone(),
            });
        }
        for (key, composition) in &self.factions {
            if !composition.is_fully_populated() {
                return Err(CatalogError::EmptySlot {
                    faction: key.clone(),
                });
            }
        }
        for (alias, target) in &self.aliases {
            if !self.factions.contains_key(target) {
                return Err(CatalogError::DanglingAlias {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
        }
        Ok(())
    }

    /// Total lookup: requested key → default key → hardcoded fallback.
    pub fn resolve(&self, key: &str) -> &Composition {
        if let Some(c) = self.factions.get(key) {
            return c;
        }
        if let Some(c) = self.factions.get(&self.default_key) {
            return c;
        }
        &self.fallback
    }

    /// Canonical faction key for a raw host culture id.
    ///
    /// The raw id is trimmed and ASCII-lowercased, then mapped through the
    /// alias table. Missing or unknown ids resolve to the default key.
    pub fn canonical_faction_key(&self, raw_culture_id: Option<&str>) -> &str {
        let Some(raw) = raw_culture_id else {
            return &self.default_key;
        };
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return &self.default_key;
        }
        match self.aliases.get(&normalized) {
            Some(key) => key,
            None => &self.default_key,
        }
    }

    /// Champion identifier for a faction key, falling back to the fixed
    /// default champion for factions without an entry.
    pub fn champion_for(&self, faction_key: &str) -> &str {
        self.champions
            .get(faction_key)
            .map(String::as_str)
            .unwrap_or(DEFAULT_CHAMPION)
    }

    /// Marine identifier for a raw host culture id, if the culture has
    /// naval units. Unknown cultures have none; callers treat `None` as
    /// "no pirate line available", not as an error.
    pub fn marine_for(&self, raw_culture_id: Option<&str>) -> Option<&str> {
        let raw = raw_culture_id?;
        let normalized = raw.trim().to_ascii_lowercase();
        let key = self.aliases.get(&normalized)?;
        self.marines.get(key).map(String::as_str)
    }
}
