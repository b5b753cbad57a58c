//! levy-context
//!
//! Context classification: is the current host moment safe to act in?
//!
//! Pure deterministic predicate over a caller-supplied signal bundle.
//! No IO, no time, no host calls. The host boundary samples the signals;
//! this crate only judges them.
//!
//! The check is conservative and false-positive-tolerant: ambiguity must
//! resolve to *unsafe*, never to *safe*.

/// Externally supplied signals describing the current host moment.
///
/// Every field defaults to the conservative value when the host cannot
/// answer a probe (a signal the sampler could not read is reported as
/// unsafe by the sampler, not silently cleared).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextSignals {
    /// The main actor's party is attached to an active siege.
    pub actor_in_active_siege: bool,

    /// The settlement the main actor occupies is currently besieged.
    pub actor_settlement_besieged: bool,

    /// An encounter battle is active and is a siege variant
    /// (assault, outside, or ambush).
    pub siege_encounter_active: bool,

    /// The menu identifier being opened, when the evaluation happens in
    /// response to a menu event. `None` outside menu flow.
    pub menu_id: Option<String>,
}

impl ContextSignals {
    /// All-clear signals: nothing besieged, no encounter, no menu.
    pub fn safe() -> Self {
        Self::default()
    }

    /// Safe signals carrying a menu identifier.
    pub fn in_menu(menu_id: impl Into<String>) -> Self {
        Self {
            menu_id: Some(menu_id.into()),
            ..Self::default()
        }
    }
}

/// Substring that marks a menu as siege flow regardless of the boolean
/// signals. Matched ASCII-case-insensitively. Known to be a heuristic
/// with potential false positives on unrelated menus; kept as-is.
const SIEGE_MENU_MARKER: &str = "siege";

/// `true` when the current moment is combat/siege-unsafe.
///
/// Any boolean signal set, or a menu identifier containing `"siege"`
/// (case-insensitive), is unsafe.
pub fn is_unsafe(signals: &ContextSignals) -> bool {
    if signals.actor_in_active_siege
        || signals.actor_settlement_besieged
        || signals.siege_encounter_active
    {
        return true;
    }

    match &signals.menu_id {
        Some(id) => contains_ignore_ascii_case(id, SIEGE_MENU_MARKER),
        None => false,
    }
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    haystack
        .windows(needle.len())
        .any(|w| w.eq_ignore_ascii_case(needle))
}
