use std::sync::Arc;

use serde_json::json;

use levy_audit::JournalRecord;
use levy_catalog::Catalog;
use levy_dispatch::{
    ActionDispatcher, ActionOutput, ActionSpec, ActionId, CheckFn, EffectFn, MenuRegistrar,
};
use levy_purchase::{purchase, PurchaseKind, PurchaseOrder, PurchaseOutcome};

use crate::HostServices;

// Host menu anchors.
pub const TOWN_MENU: &str = "town";
pub const CASTLE_MENU: &str = "castle";
pub const PORT_MENU: &str = "port_menu";

/// The submenu this behavior owns.
pub const MOD_MENU: &str = "elite_retinue_mod";
const MOD_MENU_TITLE: &str = "There is a selection of retinues willing to join your party.";

pub const ACTION_OPEN: &str = "retinue_open";
pub const ACTION_BASIC: &str = "retinue_basic";
pub const ACTION_ELITE: &str = "retinue_elite";
pub const ACTION_BANDIT: &str = "retinue_bandit";
pub const ACTION_FIAN: &str = "retinue_fian";
pub const ACTION_SISTERS: &str = "retinue_sisters";
pub const ACTION_PIRATE: &str = "retinue_pirate";
pub const ACTION_LEAVE: &str = "retinue_leave";

const BASIC_COST: u64 = 10_000;
const ELITE_COST: u64 = 30_000;
const BANDIT_COST: u64 = 3_000;
const FIAN_COST: u64 = 500;
const SISTERS_COST: u64 = 4_000;
const PIRATE_COST: u64 = 3_000;

/// Register the full action set with the dispatcher and the host menu
/// system. Called once per session; any registrar failure aborts and is
/// treated as a fault by the caller.
pub(crate) fn register_actions<H: HostServices>(
    dispatcher: &mut ActionDispatcher<H>,
    registrar: &mut dyn MenuRegistrar,
    catalog: &Arc<Catalog>,
    naval_content: bool,
) -> anyhow::Result<()> {
    // Town entry point into the retinue submenu.
    add_action(
        dispatcher,
        registrar,
        spec(TOWN_MENU, ACTION_OPEN, "Hire Retinue", 6),
        always_enabled(),
        switch_effect(MOD_MENU),
    )?;

    registrar.add_menu(MOD_MENU, MOD_MENU_TITLE)?;

    add_action(
        dispatcher,
        registrar,
        spec(MOD_MENU, ACTION_BASIC, "Basic Retinue (50 : 10k)", 0),
        always_enabled(),
        purchase_effect(catalog, PurchaseKind::Basic, BASIC_COST, TOWN_MENU),
    )?;
    add_action(
        dispatcher,
        registrar,
        spec(MOD_MENU, ACTION_ELITE, "Elite Cohort (80 : 30k)", 0),
        always_enabled(),
        purchase_effect(catalog, PurchaseKind::Elite, ELITE_COST, TOWN_MENU),
    )?;
    add_action(
        dispatcher,
        registrar,
        spec(MOD_MENU, ACTION_BANDIT, "Bandit Army (30 : 3k)", 0),
        always_enabled(),
        purchase_effect(catalog, PurchaseKind::Bandit, BANDIT_COST, TOWN_MENU),
    )?;
    add_action(
        dispatcher,
        registrar,
        spec(MOD_MENU, ACTION_FIAN, "Savage (1 : 500gp)", 0),
        always_enabled(),
        purchase_effect(catalog, PurchaseKind::Fian, FIAN_COST, TOWN_MENU),
    )?;

    add_action(
        dispatcher,
        registrar,
        spec(CASTLE_MENU, ACTION_SISTERS, "Hire Sword Sisters (50 : 4k)", 6),
        always_enabled(),
        purchase_effect(catalog, PurchaseKind::Sisters, SISTERS_COST, CASTLE_MENU),
    )?;

    if naval_content {
        add_action(
            dispatcher,
            registrar,
            spec(PORT_MENU, ACTION_PIRATE, "Hire Pirate Crew (16 : 3k)", 5),
            pirate_check(catalog),
            purchase_effect(catalog, PurchaseKind::Pirate, PIRATE_COST, PORT_MENU),
        )?;
    } else {
        dispatcher.journal(JournalRecord::new(
            "capability_skip",
            "naval content not detected; skipping port action registration",
        ));
    }

    add_action(
        dispatcher,
        registrar,
        spec(MOD_MENU, ACTION_LEAVE, "Leave", 4),
        always_enabled(),
        switch_effect(TOWN_MENU),
    )?;

    Ok(())
}

fn spec(menu_id: &str, action_id: &str, label: &str, priority: i32) -> ActionSpec {
    ActionSpec {
        menu_id: menu_id.to_string(),
        action_id: ActionId::new(action_id),
        label: label.to_string(),
        priority,
    }
}

fn add_action<H: HostServices>(
    dispatcher: &mut ActionDispatcher<H>,
    registrar: &mut dyn MenuRegistrar,
    spec: ActionSpec,
    check: CheckFn<H>,
    effect: EffectFn<H>,
) -> anyhow::Result<()> {
    registrar.add_option(&spec)?;
    dispatcher.register(spec, check, effect);
    Ok(())
}

fn always_enabled<H: HostServices>() -> CheckFn<H> {
    Box::new(|_host: &mut H| Ok(true))
}

fn switch_effect<H: HostServices>(menu_id: &'static str) -> EffectFn<H> {
    Box::new(move |host: &mut H| {
        host.switch_menu(menu_id);
        Ok(ActionOutput::silent())
    })
}

/// The pirate option only shows when the current culture has a marine
/// identifier the host can actually resolve.
fn pirate_check<H: HostServices>(catalog: &Arc<Catalog>) -> CheckFn<H> {
    let catalog = Arc::clone(catalog);
    Box::new(move |host: &mut H| {
        let culture = host.current_culture_key();
        Ok(catalog
            .marine_for(culture.as_deref())
            .map(|id| host.has_unit(id))
            .unwrap_or(false))
    })
}

fn purchase_effect<H: HostServices>(
    catalog: &Arc<Catalog>,
    kind: PurchaseKind,
    cost: u64,
    return_menu: &'static str,
) -> EffectFn<H> {
    let catalog = Arc::clone(catalog);
    Box::new(move |host: &mut H| {
        let outcome = purchase(&PurchaseOrder::new(kind, cost), host, &catalog);
        host.switch_menu(return_menu);
        Ok(outcome_output(kind, outcome))
    })
}

fn outcome_output(kind: PurchaseKind, outcome: PurchaseOutcome) -> ActionOutput {
    match outcome {
        PurchaseOutcome::Declined {
            required,
            available,
        } => {
            let mut out = ActionOutput::notice(format!(
                "Not enough denars. {required} required to recruit {} retinue.",
                kind.label()
            ));
            out.push_journal(
                JournalRecord::new(
                    "purchase_declined",
                    format!(
                        "{} retinue declined: {available} available, {required} required",
                        kind.label()
                    ),
                )
                .with_fields(json!({
                    "kind": kind.label(),
                    "required": required,
                    "available": available,
                })),
            );
            out
        }
        PurchaseOutcome::Completed(receipt) => {
            let mut out = ActionOutput::notice(format!(
                "Recruiting {} retinue for {} denars.",
                kind.label(),
                receipt.cost
            ));
            for unit_id in &receipt.skipped {
                out.push_journal(
                    JournalRecord::new("skipped_line", format!("missing troop id: {unit_id}"))
                        .with_fields(json!({ "unit_id": unit_id })),
                );
            }
            let fields = serde_json::to_value(&receipt).unwrap_or(serde_json::Value::Null);
            out.push_journal(
                JournalRecord::new(
                    "purchase",
                    format!(
                        "{} retinue delivered {} lines for {} denars",
                        kind.label(),
                        receipt.delivered.len(),
                        receipt.cost
                    ),
                )
                .with_fields(fields),
            );
            out
        }
    }
}
