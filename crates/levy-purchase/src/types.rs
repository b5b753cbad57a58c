use serde::Serialize;

/// The purchase kinds a menu action can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseKind {
    Elite,
    Basic,
    Bandit,
    Fian,
    Sisters,
    Pirate,
    Other,
}

impl PurchaseKind {
    /// User-facing label. "fian" reads as "savage" to players.
    pub fn label(&self) -> &'static str {
        match self {
            PurchaseKind::Elite => "elite",
            PurchaseKind::Basic => "basic",
            PurchaseKind::Bandit => "bandit",
            PurchaseKind::Fian => "savage",
            PurchaseKind::Sisters => "sisters",
            PurchaseKind::Pirate => "pirate",
            PurchaseKind::Other => "other",
        }
    }
}

/// One purchase request. Created per invocation, never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PurchaseOrder {
    pub kind: PurchaseKind,
    pub cost: u64,
}

impl PurchaseOrder {
    pub fn new(kind: PurchaseKind, cost: u64) -> Self {
        Self { kind, cost }
    }
}

/// Host answer to a roster insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddUnits {
    Added,
    /// The identifier resolves to nothing in the host; the line is skipped.
    UnknownUnit,
}

/// The host's gold balance.
pub trait Treasury {
    fn funds_available(&self) -> u64;
    fn debit(&mut self, amount: u64);
}

/// The host's party roster.
pub trait UnitSink {
    fn add_units(&mut self, unit_id: &str, quantity: u32) -> AddUnits;

    /// Whether the host can resolve the identifier at all. Used by
    /// enablement checks to hide lines that could never deliver.
    fn has_unit(&self, unit_id: &str) -> bool;
}

/// The raw culture id of the current settlement or actor, if any.
pub trait CultureSource {
    fn current_culture_key(&self) -> Option<String>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeliveredLine {
    pub unit_id: String,
    pub quantity: u32,
}

/// What a completed purchase actually did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PurchaseReceipt {
    pub kind: PurchaseKind,
    pub cost: u64,
    /// The canonical faction key the composition was resolved under.
    pub faction_key: String,
    pub delivered: Vec<DeliveredLine>,
    /// Identifiers the host could not resolve; their lines were skipped.
    pub skipped: Vec<String>,
}

/// Purchase result. `Completed` regardless of how many lines landed;
/// partial delivery is visible in the receipt, never rolled back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum PurchaseOutcome {
    Declined { required: u64, available: u64 },
    Completed(PurchaseReceipt),
}
