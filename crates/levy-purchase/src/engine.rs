use levy_catalog::{Catalog, Composition};

use crate::tiers::{
    TierLine, BANDIT_KEY, BANDIT_TIER, BASIC_TIER, CHAMPION_QUANTITY, ELITE_TIER,
    OTHER_FALLBACK_LINE, PIRATE_CREW_SIZE, SISTER_LINES,
};
use crate::types::{
    AddUnits, CultureSource, DeliveredLine, PurchaseKind, PurchaseOrder, PurchaseOutcome,
    PurchaseReceipt, Treasury, UnitSink,
};

/// Run one purchase.
///
/// 1. Insufficient funds decline with zero mutation.
/// 2. The cost is debited exactly once, before any delivery.
/// 3. The culture key resolves to a catalog faction (bandits use the
///    fixed key; pirates derive a marine identifier from the raw culture).
/// 4. Each tier line lands via `add_units`; an unknown identifier skips
///    that line only.
/// 5. The purchase completes whatever the delivery count; the debit
///    stands and skipped lines are recorded in the receipt.
pub fn purchase<H>(order: &PurchaseOrder, host: &mut H, catalog: &Catalog) -> PurchaseOutcome
where
    H: Treasury + UnitSink + CultureSource,
{
    let available = host.funds_available();
    if available < order.cost {
        return PurchaseOutcome::Declined {
            required: order.cost,
            available,
        };
    }

    host.debit(order.cost);

    let raw_culture = host.current_culture_key();
    let faction_key = match order.kind {
        PurchaseKind::Bandit => BANDIT_KEY.to_string(),
        _ => catalog
            .canonical_faction_key(raw_culture.as_deref())
            .to_string(),
    };

    let lines = match order.kind {
        PurchaseKind::Elite => expand_tier(ELITE_TIER, catalog.resolve(&faction_key)),
        PurchaseKind::Basic => expand_tier(BASIC_TIER, catalog.resolve(&faction_key)),
        PurchaseKind::Bandit => expand_tier(BANDIT_TIER, catalog.resolve(BANDIT_KEY)),
        PurchaseKind::Fian => vec![(
            catalog.champion_for(&faction_key).to_string(),
            CHAMPION_QUANTITY,
        )],
        PurchaseKind::Sisters => SISTER_LINES
            .iter()
            .map(|(id, qty)| (id.to_string(), *qty))
            .collect(),
        PurchaseKind::Pirate => match catalog.marine_for(raw_culture.as_deref()) {
            // No marine identifier for this culture: nothing can deliver.
            // The debit stands (debit-then-deliver); the enablement check
            // keeps the option hidden so this only arises via direct calls.
            None => Vec::new(),
            Some(id) => vec![(id.to_string(), PIRATE_CREW_SIZE)],
        },
        PurchaseKind::Other => vec![(OTHER_FALLBACK_LINE.0.to_string(), OTHER_FALLBACK_LINE.1)],
    };

    let mut receipt = PurchaseReceipt {
        kind: order.kind,
        cost: order.cost,
        faction_key,
        delivered: Vec::new(),
        skipped: Vec::new(),
    };

    for (unit_id, quantity) in lines {
        match host.add_units(&unit_id, quantity) {
            AddUnits::Added => receipt.delivered.push(DeliveredLine { unit_id, quantity }),
            AddUnits::UnknownUnit => receipt.skipped.push(unit_id),
        }
    }

    PurchaseOutcome::Completed(receipt)
}

fn expand_tier(tier: &[TierLine], composition: &Composition) -> Vec<(String, u32)> {
    tier.iter()
        .map(|l| (composition.slot(l.role).to_string(), l.quantity))
        .collect()
}
