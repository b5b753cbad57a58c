use serde::{Deserialize, Serialize};

/// The seven composition slots, in tier-table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Infantry,
    Archers,
    Cavalry,
    HorseArchers,
    Wildcard1,
    Wildcard2,
    Wildcard3,
}

/// A faction's recruitable roster shape: seven named troop-identifier
/// slots, all populated by construction. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composition {
    pub infantry: String,
    pub archers: String,
    pub cavalry: String,
    pub horse_archers: String,
    pub wildcard1: String,
    pub wildcard2: String,
    pub wildcard3: String,
}

impl Composition {
    /// Seven distinct identifiers, one per slot.
    #[allow(clippy::too_many_arguments)]
    pub fn full(
        infantry: impl Into<String>,
        archers: impl Into<String>,
        cavalry: impl Into<String>,
        horse_archers: impl Into<String>,
        wildcard1: impl Into<String>,
        wildcard2: impl Into<String>,
        wildcard3: impl Into<String>,
    ) -> Self {
        Self {
            infantry: infantry.into(),
            archers: archers.into(),
            cavalry: cavalry.into(),
            horse_archers: horse_archers.into(),
            wildcard1: wildcard1.into(),
            wildcard2: wildcard2.into(),
            wildcard3: wildcard3.into(),
        }
    }

    /// Build from 4..=7 identifiers, collapsing missing wildcard slots.
    ///
    /// The collapse rule is fixed data-fidelity behavior: it decides which
    /// identifiers get reused as filler when source data supplies fewer
    /// than seven distinct troop types:
    ///
    /// | ids | rule                                              |
    /// |-----|---------------------------------------------------|
    /// | 7   | one-to-one                                        |
    /// | 6   | `wildcard3 := wildcard2`                          |
    /// | 5   | `wildcard2 := wildcard3 := wildcard1`             |
    /// | 4   | `w1 := archers`, `w2 := horse_archers`, `w3 := infantry` |
    ///
    /// Returns `None` for any other arity.
    pub fn from_ids(ids: &[String]) -> Option<Self> {
        let get = |i: usize| ids[i].clone();
        match ids.len() {
            7 => Some(Self::full(
                get(0),
                get(1),
                get(2),
                get(3),
                get(4),
                get(5),
                get(6),
            )),
            6 => Some(Self::full(
                get(0),
                get(1),
                get(2),
                get(3),
                get(4),
                get(5),
                get(5),
            )),
            5 => Some(Self::full(
                get(0),
                get(1),
                get(2),
                get(3),
                get(4),
                get(4),
                get(4),
            )),
            4 => Some(Self::full(
                get(0),
                get(1),
                get(2),
                get(3),
                get(1),
                get(3),
                get(0),
            )),
            _ => None,
        }
    }

    /// The identifier occupying a slot.
    pub fn slot(&self, role: Role) -> &str {
        match role {
            Role::Infantry => &self.infantry,
            Role::Archers => &self.archers,
            Role::Cavalry => &self.cavalry,
            Role::HorseArchers => &self.horse_archers,
            Role::Wildcard1 => &self.wildcard1,
            Role::Wildcard2 => &self.wildcard2,
            Role::Wildcard3 => &self.wildcard3,
        }
    }

    /// `true` when every slot holds a non-empty identifier.
    pub fn is_fully_populated(&self) -> bool {
        [
            Role::Infantry,
            Role::Archers,
            Role::Cavalry,
            Role::HorseArchers,
            Role::Wildcard1,
            Role::Wildcard2,
            Role::Wildcard3,
        ]
        .iter()
        .all(|r| !self.slot(*r).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn seven_ids_assign_one_to_one() {
        let c = Composition::from_ids(&ids(&["i", "a", "c", "h", "w1", "w2", "w3"])).unwrap();
        assert_eq!(c.infantry, "i");
        assert_eq!(c.archers, "a");
        assert_eq!(c.cavalry, "c");
        assert_eq!(c.horse_archers, "h");
        assert_eq!(c.wildcard1, "w1");
        assert_eq!(c.wildcard2, "w2");
        assert_eq!(c.wildcard3, "w3");
    }

    #[test]
    fn six_ids_copy_wildcard2_into_wildcard3() {
        let c = Composition::from_ids(&ids(&["i", "a", "c", "h", "w1", "w2"])).unwrap();
        assert_eq!(c.wildcard1, "w1");
        assert_eq!(c.wildcard2, "w2");
        assert_eq!(c.wildcard3, "w2");
    }

    #[test]
    fn five_ids_spread_wildcard1() {
        let c = Composition::from_ids(&ids(&["i", "a", "c", "h", "w1"])).unwrap();
        assert_eq!(c.wildcard1, "w1");
        assert_eq!(c.wildcard2, "w1");
        assert_eq!(c.wildcard3, "w1");
    }

    #[test]
    fn four_ids_fill_wildcards_from_core_slots() {
        let c = Composition::from_ids(&ids(&["i", "a", "c", "h"])).unwrap();
        assert_eq!(c.wildcard1, "a");
        assert_eq!(c.wildcard2, "h");
        assert_eq!(c.wildcard3, "i");
    }

    #[test]
    fn other_arities_are_rejected() {
        assert!(Composition::from_ids(&ids(&[])).is_none());
        assert!(Composition::from_ids(&ids(&["i", "a", "c"])).is_none());
        assert!(Composition::from_ids(&ids(&["i", "a", "c", "h", "w", "w", "w", "w"])).is_none());
    }
}
