mod common;

use common::{test_catalog, StubHost};
use levy_purchase::{purchase, PurchaseKind, PurchaseOrder, PurchaseOutcome};

fn completed(outcome: PurchaseOutcome) -> levy_purchase::PurchaseReceipt {
    match outcome {
        PurchaseOutcome::Completed(receipt) => receipt,
        other => panic!("expected Completed, got {other:?}"),
    }
}

#[test]
fn scenario_elite_tier_quantities_and_ordering() {
    let catalog = test_catalog();
    let mut host = StubHost::with_gold(100_000);
    host.culture = Some("empire".to_string());

    let receipt = completed(purchase(
        &PurchaseOrder::new(PurchaseKind::Elite, 30_000),
        &mut host,
        &catalog,
    ));

    assert_eq!(
        host.added,
        vec![
            ("e_ha".to_string(), 15),
            ("e_cav".to_string(), 10),
            ("e_arc".to_string(), 20),
            ("e_inf".to_string(), 15),
            ("e_w1".to_string(), 10),
            ("e_w2".to_string(), 5),
            ("e_w3".to_string(), 5),
        ]
    );
    assert_eq!(receipt.faction_key, "Empire");
    assert!(receipt.skipped.is_empty());
}

#[test]
fn scenario_partial_delivery_still_completes() {
    let catalog = test_catalog();
    let mut host = StubHost::with_gold(100_000);
    host.culture = Some("empire".to_string());
    host.unknown.insert("e_cav".to_string());

    let receipt = completed(purchase(
        &PurchaseOrder::new(PurchaseKind::Elite, 30_000),
        &mut host,
        &catalog,
    ));

    // The unresolvable line is skipped; the other six land with the
    // documented quantities, and the debit stands.
    assert_eq!(receipt.skipped, vec!["e_cav".to_string()]);
    assert_eq!(receipt.delivered.len(), 6);
    assert_eq!(
        host.added,
        vec![
            ("e_ha".to_string(), 15),
            ("e_arc".to_string(), 20),
            ("e_inf".to_string(), 15),
            ("e_w1".to_string(), 10),
            ("e_w2".to_string(), 5),
            ("e_w3".to_string(), 5),
        ]
    );
    assert_eq!(host.debits, vec![30_000]);
}

#[test]
fn scenario_basic_tier_draws_five_lines() {
    let catalog = test_catalog();
    let mut host = StubHost::with_gold(100_000);
    host.culture = Some("vlandia".to_string());

    completed(purchase(
        &PurchaseOrder::new(PurchaseKind::Basic, 10_000),
        &mut host,
        &catalog,
    ));

    assert_eq!(
        host.added,
        vec![
            ("v_ha".to_string(), 10),
            ("v_cav".to_string(), 10),
            ("v_arc".to_string(), 15),
            ("v_inf".to_string(), 10),
            ("v_w1".to_string(), 5),
        ]
    );
}

#[test]
fn scenario_bandit_tier_ignores_the_current_culture() {
    let catalog = test_catalog();
    let mut host = StubHost::with_gold(100_000);
    host.culture = Some("vlandia".to_string());

    let receipt = completed(purchase(
        &PurchaseOrder::new(PurchaseKind::Bandit, 3_000),
        &mut host,
        &catalog,
    ));

    assert_eq!(receipt.faction_key, "Bandits");
    assert_eq!(
        host.added,
        vec![
            ("b_ha".to_string(), 5),
            ("b_cav".to_string(), 5),
            ("b_arc".to_string(), 10),
            ("b_inf".to_string(), 5),
            ("b_w1".to_string(), 5),
        ]
    );
}

#[test]
fn scenario_fian_recruits_one_culture_champion() {
    let catalog = test_catalog();
    let mut host = StubHost::with_gold(1_000);
    host.culture = Some("vlandia".to_string());

    completed(purchase(
        &PurchaseOrder::new(PurchaseKind::Fian, 500),
        &mut host,
        &catalog,
    ));

    assert_eq!(host.added, vec![("vlandian_banner_knight".to_string(), 1)]);
}

#[test]
fn scenario_fian_without_champion_entry_uses_the_default_champion() {
    let catalog = test_catalog();
    let mut host = StubHost::with_gold(1_000);
    host.culture = Some("unknown_culture".to_string());

    completed(purchase(
        &PurchaseOrder::new(PurchaseKind::Fian, 500),
        &mut host,
        &catalog,
    ));

    // Unknown culture resolves to the default faction (Empire), which has
    // a champion entry here.
    assert_eq!(
        host.added,
        vec![("imperial_elite_cataphract".to_string(), 1)]
    );
}

#[test]
fn scenario_sisters_are_two_fixed_lines_independent_of_culture() {
    let catalog = test_catalog();
    for culture in [Some("vlandia"), Some("empire"), None] {
        let mut host = StubHost::with_gold(10_000);
        host.culture = culture.map(str::to_string);

        completed(purchase(
            &PurchaseOrder::new(PurchaseKind::Sisters, 4_000),
            &mut host,
            &catalog,
        ));

        assert_eq!(
            host.added,
            vec![
                ("sword_sisters_sister_t5".to_string(), 25),
                ("sword_sisters_sister_infantry_t5".to_string(), 25),
            ]
        );
    }
}

#[test]
fn scenario_pirate_draws_sixteen_culture_marines() {
    let catalog = test_catalog();
    let mut host = StubHost::with_gold(10_000);
    host.culture = Some("vlandia".to_string());

    completed(purchase(
        &PurchaseOrder::new(PurchaseKind::Pirate, 3_000),
        &mut host,
        &catalog,
    ));

    assert_eq!(host.added, vec![("vlandian_marine_t5".to_string(), 16)]);
}

#[test]
fn scenario_pirate_without_marine_identifier_delivers_nothing_but_debits() {
    let catalog = test_catalog();
    let mut host = StubHost::with_gold(10_000);
    host.culture = Some("empire".to_string()); // no marine entry

    let receipt = completed(purchase(
        &PurchaseOrder::new(PurchaseKind::Pirate, 3_000),
        &mut host,
        &catalog,
    ));

    assert!(host.added.is_empty());
    assert!(receipt.delivered.is_empty());
    assert_eq!(host.debits, vec![3_000], "debit-then-deliver: no refund");
}

#[test]
fn scenario_other_kind_falls_back_to_a_single_legionary() {
    let catalog = test_catalog();
    let mut host = StubHost::with_gold(10_000);

    completed(purchase(
        &PurchaseOrder::new(PurchaseKind::Other, 0),
        &mut host,
        &catalog,
    ));

    assert_eq!(host.added, vec![("imperial_legionary".to_string(), 1)]);
}
