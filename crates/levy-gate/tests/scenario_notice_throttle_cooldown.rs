use levy_context::ContextSignals;
use levy_gate::{GateConfig, SafetyGate};

/// Two blocked attempts inside the 10 s window produce exactly one
/// user-visible notice; a third attempt after the cooldown produces a
/// second one.
#[test]
fn scenario_disabled_notices_respect_the_cooldown_window() {
    let mut gate = SafetyGate::new(GateConfig::sane_defaults());
    gate.disable("Menu registration failed.", 0);

    let safe = ContextSignals::safe();

    let first = gate.evaluate(&safe, "town option", 100);
    assert!(first.notice.is_some());

    let second = gate.evaluate(&safe, "town option", 105);
    assert!(second.notice.is_none(), "within cooldown: suppressed");

    let third = gate.evaluate(&safe, "town option", 111);
    assert!(third.notice.is_some(), "cooldown elapsed: notified again");
}

#[test]
fn scenario_paused_notices_respect_the_cooldown_window() {
    let mut gate = SafetyGate::new(GateConfig::sane_defaults());
    let unsafe_signals = ContextSignals {
        actor_settlement_besieged: true,
        ..ContextSignals::safe()
    };

    assert!(gate.evaluate(&unsafe_signals, "menu open", 0).notice.is_some());
    assert!(gate.evaluate(&unsafe_signals, "menu open", 4).notice.is_none());
    assert!(gate.evaluate(&unsafe_signals, "menu open", 9).notice.is_none());
    assert!(gate.evaluate(&unsafe_signals, "menu open", 10).notice.is_some());
}

#[test]
fn scenario_distinct_action_contexts_throttle_independently() {
    let mut gate = SafetyGate::new(GateConfig::sane_defaults());
    gate.disable("Fault in dispatch.", 0);

    let safe = ContextSignals::safe();
    assert!(gate.evaluate(&safe, "town option", 100).notice.is_some());
    assert!(
        gate.evaluate(&safe, "castle option", 101).notice.is_some(),
        "a different context has its own cooldown"
    );
    assert!(gate.evaluate(&safe, "town option", 102).notice.is_none());
}
