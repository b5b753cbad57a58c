mod common;

use common::make_session;
use levy_behavior::{ACTION_BASIC, ACTION_ELITE, ACTION_PIRATE, TOWN_MENU};
use levy_dispatch::ActionId;
use levy_testkit::{PaperHost, RecordingRegistrar};

#[test]
fn scenario_basic_purchase_flows_from_menu_to_roster() {
    let mut s = make_session(false);
    s.behavior.on_session_launched(&mut RecordingRegistrar::new());

    let mut host = PaperHost::with_gold(50_000).with_culture("vlandia");
    let id = ActionId::new(ACTION_BASIC);

    assert!(s.behavior.check_enabled(&id, Some(TOWN_MENU), &mut host));
    s.behavior.run_effect(&id, Some(TOWN_MENU), &mut host);

    // Vlandia ships six identifiers; basic draws five lines in tier order.
    assert_eq!(
        host.added,
        vec![
            ("vlandian_vanguard".to_string(), 10),
            ("vlandian_banner_knight".to_string(), 10),
            ("vlandian_sharpshooter".to_string(), 15),
            ("vlandian_sergeant".to_string(), 10),
            ("vlandian_voulgier".to_string(), 5),
        ]
    );
    assert_eq!(host.gold, 40_000);
    assert_eq!(host.menu_switches, vec![TOWN_MENU.to_string()]);
    assert!(s
        .notices
        .borrow()
        .iter()
        .any(|n| n == "Recruiting basic retinue for 10000 denars."));
}

#[test]
fn scenario_insufficient_funds_decline_with_a_notice_and_no_roster_change() {
    let mut s = make_session(false);
    s.behavior.on_session_launched(&mut RecordingRegistrar::new());

    let mut host = PaperHost::with_gold(400).with_culture("empire");
    let id = ActionId::new(ACTION_ELITE);

    s.behavior.run_effect(&id, Some(TOWN_MENU), &mut host);

    assert!(host.added.is_empty());
    assert!(host.debits.is_empty());
    assert_eq!(host.gold, 400);
    assert!(s
        .notices
        .borrow()
        .iter()
        .any(|n| n == "Not enough denars. 30000 required to recruit elite retinue."));
    assert!(s
        .journal
        .borrow()
        .iter()
        .any(|r| r.kind == "purchase_declined"));
}

#[test]
fn scenario_partial_delivery_is_journaled_not_rolled_back() {
    let mut s = make_session(false);
    s.behavior.on_session_launched(&mut RecordingRegistrar::new());

    let mut host = PaperHost::with_gold(100_000).with_culture("empire");
    host.forget_unit("bucellarii"); // Empire's horse archer slot
    let id = ActionId::new(ACTION_ELITE);

    s.behavior.run_effect(&id, Some(TOWN_MENU), &mut host);

    assert_eq!(host.added.len(), 6, "six of seven lines landed");
    assert_eq!(host.debits, vec![30_000], "no refund for the skipped line");
    assert!(s.journal.borrow().iter().any(|r| {
        r.kind == "skipped_line" && r.message.contains("bucellarii")
    }));
    assert!(
        !s.notices.borrow().iter().any(|n| n.contains("bucellarii")),
        "skipped lines are journal-only, no user notice"
    );
    assert!(s.behavior.gate_state().is_active(), "a skipped line is not a fault");
}

#[test]
fn scenario_pirate_enablement_tracks_culture_and_host_knowledge() {
    let mut s = make_session(true);
    s.behavior.on_session_launched(&mut RecordingRegistrar::new());

    let id = ActionId::new(ACTION_PIRATE);

    let mut vlandian = PaperHost::with_gold(10_000).with_culture("vlandia");
    assert!(s.behavior.check_enabled(&id, None, &mut vlandian));

    let mut cultureless = PaperHost::with_gold(10_000);
    assert!(!s.behavior.check_enabled(&id, None, &mut cultureless));

    let mut missing_unit = PaperHost::with_gold(10_000).with_culture("vlandia");
    missing_unit.forget_unit("vlandian_marine_t5");
    assert!(!s.behavior.check_enabled(&id, None, &mut missing_unit));

    // Enabled host actually hires the crew.
    s.behavior.run_effect(&id, None, &mut vlandian);
    assert_eq!(vlandian.added, vec![("vlandian_marine_t5".to_string(), 16)]);
}
