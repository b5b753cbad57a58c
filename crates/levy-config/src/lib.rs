//! levy-config
//!
//! Catalog asset loading. The default data asset ships with this crate;
//! user overrides are YAML documents layered on top of it (later docs win
//! key-by-key). The merged document is canonicalized to JSON and SHA-256
//! hashed so a session journal can record exactly which data it ran with,
//! then validated into a [`Catalog`].

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;

use levy_catalog::{Catalog, Composition};

/// The canonical catalog data asset.
pub const DEFAULT_CATALOG_YAML: &str = include_str!("../assets/default_catalog.yaml");

/// A catalog plus the provenance of the data it was built from.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    /// SHA-256 of the canonical JSON form of the merged document.
    pub catalog_hash: String,
    pub canonical_json: String,
    pub catalog: Catalog,
}

/// Load the shipped default asset with no overrides.
pub fn load_default() -> Result<LoadedCatalog> {
    load_layered_yaml_from_strings(&[DEFAULT_CATALOG_YAML])
}

/// Load the default asset with override files layered on in path order.
pub fn load_with_overrides(paths: &[&str]) -> Result<LoadedCatalog> {
    let mut docs: Vec<String> = vec![DEFAULT_CATALOG_YAML.to_string()];
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
        docs.push(raw);
    }
    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

/// Merge YAML docs in order (earlier docs are base, later docs override),
/// hash the canonical JSON, and validate the result into a catalog.
pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedCatalog> {
    let mut merged = serde_json::json!({});
    for raw in yaml_docs {
        let v_yaml: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        merged = deep_merge(merged, v_json);
    }

    let canonical_json = canonicalize_json(&merged)?;
    let catalog_hash = sha256_hex(canonical_json.as_bytes());

    let file: CatalogFile =
        serde_json::from_value(merged).context("catalog document has an invalid shape")?;
    let catalog = file.into_catalog()?;

    Ok(LoadedCatalog {
        catalog_hash,
        canonical_json,
        catalog,
    })
}

// ---------------------------------------------------------------------------
// Document schema
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CatalogFile {
    default_faction: String,
    factions: BTreeMap<String, FactionEntry>,
    #[serde(default)]
    aliases: BTreeMap<String, String>,
    #[serde(default)]
    champions: BTreeMap<String, String>,
    #[serde(default)]
    marines: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct FactionEntry {
    troops: Vec<String>,
}

impl CatalogFile {
    fn into_catalog(self) -> Result<Catalog> {
        let mut factions = BTreeMap::new();
        for (key, entry) in self.factions {
            let composition = match Composition::from_ids(&entry.troops) {
                Some(c) => c,
                None => bail!(
                    "faction '{}' supplies {} troop identifiers; expected 4..=7",
                    key,
                    entry.troops.len()
                ),
            };
            factions.insert(key, composition);
        }

        // Alias keys are matched after trimming and lowercasing; store
        // them normalized so lookups are a plain map get.
        let mut aliases = BTreeMap::new();
        for (raw, target) in self.aliases {
            aliases.insert(raw.trim().to_ascii_lowercase(), target);
        }

        let catalog = Catalog::new(
            self.default_faction,
            factions,
            aliases,
            self.champions,
            self.marines,
        );
        catalog.validate().context("catalog validation failed")?;
        Ok(catalog)
    }
}

// ---------------------------------------------------------------------------
// Merge + hash helpers
// ---------------------------------------------------------------------------

fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        (_, b_other) => b_other,
    }
}

fn canonicalize_json(v: &Value) -> Result<String> {
    // Compact serialization; map ordering is deterministic given the
    // deterministic merge above.
    serde_json::to_string(v).context("canonical json serialize failed")
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
