//! levy-purchase
//!
//! The purchase engine: validates funds, debits the cost, and expands a
//! purchase kind's tier table into "add N units of id" effects against
//! the host roster.
//!
//! Ordering is debit-then-deliver: the cost is taken exactly once, before
//! any units land, and is not refunded when individual lines fail to
//! resolve. A single unknown identifier skips that line and the purchase
//! completes with whatever delivered; partial delivery is recorded, not
//! rolled back.
//!
//! Deterministic, pure logic over the host traits. No IO, no time.

mod engine;
mod tiers;
mod types;

pub use engine::purchase;
pub use tiers::{
    TierLine, BANDIT_KEY, BANDIT_TIER, BASIC_TIER, CHAMPION_QUANTITY, ELITE_TIER,
    OTHER_FALLBACK_LINE, PIRATE_CREW_SIZE, SISTER_LINES,
};
pub use types::{
    AddUnits, CultureSource, DeliveredLine, PurchaseKind, PurchaseOrder, PurchaseOutcome,
    PurchaseReceipt, Treasury, UnitSink,
};
