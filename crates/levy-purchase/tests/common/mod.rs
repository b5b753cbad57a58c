use std::collections::{BTreeMap, BTreeSet};

use levy_catalog::{Catalog, Composition};
use levy_purchase::{AddUnits, CultureSource, Treasury, UnitSink};

/// Deterministic in-memory host: gold balance, roster, culture. Knows
/// every unit identifier except the ones listed in `unknown`.
pub struct StubHost {
    pub gold: u64,
    pub debits: Vec<u64>,
    pub added: Vec<(String, u32)>,
    pub unknown: BTreeSet<String>,
    pub culture: Option<String>,
}

impl StubHost {
    pub fn with_gold(gold: u64) -> Self {
        Self {
            gold,
            debits: Vec::new(),
            added: Vec::new(),
            unknown: BTreeSet::new(),
            culture: None,
        }
    }
}

impl Treasury for StubHost {
    fn funds_available(&self) -> u64 {
        self.gold
    }

    fn debit(&mut self, amount: u64) {
        self.gold = self.gold.saturating_sub(amount);
        self.debits.push(amount);
    }
}

impl UnitSink for StubHost {
    fn add_units(&mut self, unit_id: &str, quantity: u32) -> AddUnits {
        if self.unknown.contains(unit_id) {
            return AddUnits::UnknownUnit;
        }
        self.added.push((unit_id.to_string(), quantity));
        AddUnits::Added
    }

    fn has_unit(&self, unit_id: &str) -> bool {
        !self.unknown.contains(unit_id)
    }
}

impl CultureSource for StubHost {
    fn current_culture_key(&self) -> Option<String> {
        self.culture.clone()
    }
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Small catalog exercising every lookup the purchase kinds need.
pub fn test_catalog() -> Catalog {
    let mut factions = BTreeMap::new();
    factions.insert(
        "Empire".to_string(),
        Composition::from_ids(&ids(&[
            "e_inf", "e_arc", "e_cav", "e_ha", "e_w1", "e_w2", "e_w3",
        ]))
        .unwrap(),
    );
    factions.insert(
        "Vlandia".to_string(),
        Composition::from_ids(&ids(&["v_inf", "v_arc", "v_cav", "v_ha", "v_w1", "v_w2"])).unwrap(),
    );
    factions.insert(
        "Bandits".to_string(),
        Composition::from_ids(&ids(&["b_inf", "b_arc", "b_cav", "b_ha", "b_w1"])).unwrap(),
    );

    let mut aliases = BTreeMap::new();
    aliases.insert("empire".to_string(), "Empire".to_string());
    aliases.insert("vlandia".to_string(), "Vlandia".to_string());

    let mut champions = BTreeMap::new();
    champions.insert(
        "Empire".to_string(),
        "imperial_elite_cataphract".to_string(),
    );
    champions.insert("Vlandia".to_string(), "vlandian_banner_knight".to_string());

    let mut marines = BTreeMap::new();
    marines.insert("Vlandia".to_string(), "vlandian_marine_t5".to_string());

    Catalog::new("Empire", factions, aliases, champions, marines)
}
