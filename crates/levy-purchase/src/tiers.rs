use levy_catalog::Role;

/// One line of a tier table: which composition slot, how many units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierLine {
    pub role: Role,
    pub quantity: u32,
}

const fn line(role: Role, quantity: u32) -> TierLine {
    TierLine { role, quantity }
}

/// The tier tables are fixed configuration data, reproduced verbatim.
/// This is the single canonical copy; nothing recomputes these numbers.
pub const ELITE_TIER: &[TierLine] = &[
    line(Role::HorseArchers, 15),
    line(Role::Cavalry, 10),
    line(Role::Archers, 20),
    line(Role::Infantry, 15),
    line(Role::Wildcard1, 10),
    line(Role::Wildcard2, 5),
    line(Role::Wildcard3, 5),
];

pub const BASIC_TIER: &[TierLine] = &[
    line(Role::HorseArchers, 10),
    line(Role::Cavalry, 10),
    line(Role::Archers, 15),
    line(Role::Infantry, 10),
    line(Role::Wildcard1, 5),
];

/// Bandit lines always draw from the fixed [`BANDIT_KEY`] composition,
/// never the current culture.
pub const BANDIT_TIER: &[TierLine] = &[
    line(Role::HorseArchers, 5),
    line(Role::Cavalry, 5),
    line(Role::Archers, 10),
    line(Role::Infantry, 5),
    line(Role::Wildcard1, 5),
];

pub const BANDIT_KEY: &str = "Bandits";

/// Sisters are two fixed lines, independent of culture.
pub const SISTER_LINES: &[(&str, u32)] = &[
    ("sword_sisters_sister_t5", 25),
    ("sword_sisters_sister_infantry_t5", 25),
];

/// One marine line per pirate purchase.
pub const PIRATE_CREW_SIZE: u32 = 16;

/// One champion per fian ("savage") purchase.
pub const CHAMPION_QUANTITY: u32 = 1;

/// Catch-all for unrecognized kinds routed through `Other`.
pub const OTHER_FALLBACK_LINE: (&str, u32) = ("imperial_legionary", 1);
