use std::collections::BTreeMap;

use serde_json::json;

use levy_audit::{Journal, JournalRecord};
use levy_context::ContextSignals;
use levy_gate::{GateOutcome, SafetyGate, SafetyState, StateChange};

use crate::seams::{Clock, NoticeSink, SignalSource};

/// Stable action identity (e.g. `retinue_basic`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// What the host needs to place a registered action in its menu system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionSpec {
    pub menu_id: String,
    pub action_id: ActionId,
    pub label: String,
    pub priority: i32,
}

/// Notices and journal records produced by wrapped logic, forwarded by
/// the dispatcher. Keeps wrapped logic free of direct IO.
#[derive(Debug, Default)]
pub struct ActionOutput {
    pub notices: Vec<String>,
    pub journal: Vec<JournalRecord>,
}

impl ActionOutput {
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            notices: vec![message.into()],
            journal: Vec::new(),
        }
    }

    pub fn push_notice(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
    }

    pub fn push_journal(&mut self, record: JournalRecord) {
        self.journal.push(record);
    }
}

/// Enablement check for a registered action.
pub type CheckFn<H> = Box<dyn FnMut(&mut H) -> anyhow::Result<bool>>;

/// Effect of a registered action.
pub type EffectFn<H> = Box<dyn FnMut(&mut H) -> anyhow::Result<ActionOutput>>;

struct RegisteredAction<H> {
    spec: ActionSpec,
    check: CheckFn<H>,
    effect: EffectFn<H>,
}

/// Gate, sinks, and probes: the non-registry half of the dispatcher.
/// Split out so registry borrows and boundary borrows stay disjoint.
struct BoundaryCore {
    gate: SafetyGate,
    signals: Box<dyn SignalSource>,
    clock: Box<dyn Clock>,
    notices: Box<dyn NoticeSink>,
    journal: Box<dyn Journal>,
}

impl BoundaryCore {
    /// Journal a gate state change and forward its notice, if any.
    fn apply(&mut self, outcome: &GateOutcome, context: &str) {
        if let Some(change) = &outcome.change {
            let record = match change {
                StateChange::Paused { reason } => {
                    JournalRecord::new("gate_paused", format!("PAUSED: {reason}"))
                }
                StateChange::Resumed => {
                    JournalRecord::new("gate_resumed", format!("RESUMED: {context}"))
                }
                StateChange::Disabled { reason } => {
                    JournalRecord::new("gate_disabled", format!("DISABLED: {reason}"))
                }
            };
            self.journal.record(record);
        }
        if let Some(notice) = &outcome.notice {
            self.notices.notify(notice);
        }
    }

    /// Sample signals and run the gate. `false` blocks the caller; a probe
    /// failure is contained here and blocks too.
    fn gate_allows(&mut self, context: &str, menu_id: Option<&str>) -> bool {
        let mut signals = match self.signals.sample() {
            Ok(s) => s,
            Err(err) => {
                self.contain(context, &err.to_string());
                return false;
            }
        };
        if let Some(id) = menu_id {
            signals.menu_id = Some(id.to_string());
        }

        let now = self.clock.now_secs();
        let outcome = self.gate.evaluate(&signals, context, now);
        self.apply(&outcome, context);
        outcome.allowed()
    }

    /// The fault boundary: journal the fault, disable the gate, surface
    /// the disable notice. Never returns the error anywhere.
    fn contain(&mut self, origin: &str, message: &str) {
        self.journal.record(
            JournalRecord::new("fault", format!("{origin} failed: {message}"))
                .with_fields(json!({ "origin": origin })),
        );
        let now = self.clock.now_secs();
        let outcome = self.gate.report_fault(origin, message, now);
        self.apply(&outcome, origin);
    }

    fn forward(&mut self, output: ActionOutput) {
        for record in output.journal {
            self.journal.record(record);
        }
        for notice in output.notices {
            self.notices.notify(&notice);
        }
    }
}

/// The dispatcher. Generic over the host-services type `H` handed to
/// wrapped checks and effects at invocation time; the dispatcher itself
/// never inspects `H`.
pub struct ActionDispatcher<H> {
    core: BoundaryCore,
    actions: BTreeMap<ActionId, RegisteredAction<H>>,
}

impl<H> ActionDispatcher<H> {
    pub fn new(
        gate: SafetyGate,
        signals: Box<dyn SignalSource>,
        clock: Box<dyn Clock>,
        notices: Box<dyn NoticeSink>,
        journal: Box<dyn Journal>,
    ) -> Self {
        Self {
            core: BoundaryCore {
                gate,
                signals,
                clock,
                notices,
                journal,
            },
            actions: BTreeMap::new(),
        }
    }

    pub fn gate_state(&self) -> &SafetyState {
        self.core.gate.state()
    }

    /// Register an action. A re-registration under the same id replaces
    /// the previous entry.
    pub fn register(&mut self, spec: ActionSpec, check: CheckFn<H>, effect: EffectFn<H>) {
        self.actions.insert(
            spec.action_id.clone(),
            RegisteredAction {
                spec,
                check,
                effect,
            },
        );
    }

    /// Registered specs, for handing to the host's menu registrar.
    pub fn specs(&self) -> impl Iterator<Item = &ActionSpec> {
        self.actions.values().map(|a| &a.spec)
    }

    /// Host-facing enablement wrapper. Safe default: `false`.
    pub fn check_enabled(&mut self, id: &ActionId, menu_id: Option<&str>, host: &mut H) -> bool {
        let core = &mut self.core;
        let Some(action) = self.actions.get_mut(id) else {
            core.journal.record(JournalRecord::new(
                "unknown_action",
                format!("enablement probe for unregistered action '{}'", id.as_str()),
            ));
            return false;
        };

        let context = format!("{} condition", action.spec.action_id.as_str());
        if !core.gate_allows(&context, menu_id) {
            return false;
        }

        match (action.check)(host) {
            Ok(enabled) => enabled,
            Err(err) => {
                core.contain(&context, &format!("{err:#}"));
                false
            }
        }
    }

    /// Host-facing effect wrapper. Safe default: no-op.
    pub fn run_effect(&mut self, id: &ActionId, menu_id: Option<&str>, host: &mut H) {
        let core = &mut self.core;
        let Some(action) = self.actions.get_mut(id) else {
            core.journal.record(JournalRecord::new(
                "unknown_action",
                format!("effect invocation for unregistered action '{}'", id.as_str()),
            ));
            return;
        };

        let context = format!("{} consequence", action.spec.action_id.as_str());
        if !core.gate_allows(&context, menu_id) {
            return;
        }

        match (action.effect)(host) {
            Ok(output) => core.forward(output),
            Err(err) => core.contain(&context, &format!("{err:#}")),
        }
    }

    /// Gate evaluation outside any registered action (menu-open events).
    /// Pauses/resumes as the signals dictate; `true` means allowed.
    pub fn evaluate_context(&mut self, context: &str, menu_id: Option<&str>) -> bool {
        self.core.gate_allows(context, menu_id)
    }

    /// Explicit pause from a host safety event.
    pub fn pause(&mut self, reason: &str, context: &str) {
        let now = self.core.clock.now_secs();
        let outcome = self.core.gate.pause(reason, context, now);
        self.core.apply(&outcome, context);
    }

    /// Re-check a paused gate against fresh signals.
    pub fn try_resume(&mut self, context: &str) {
        match self.core.signals.sample() {
            Ok(signals) => {
                let now = self.core.clock.now_secs();
                let outcome = self.core.gate.try_resume(&signals, context, now);
                self.core.apply(&outcome, context);
            }
            Err(err) => self.core.contain(context, &err.to_string()),
        }
    }

    /// `true` when terminally disabled; emits the throttled blocked
    /// notice as a side effect.
    pub fn is_disabled_and_notify(&mut self, context: &str) -> bool {
        if !self.core.gate.state().is_disabled() {
            return false;
        }
        let now = self.core.clock.now_secs();
        let outcome = self.core.gate.evaluate(&ContextSignals::safe(), context, now);
        self.core.apply(&outcome, context);
        true
    }

    /// Contain a fault raised outside any registered action (lifecycle
    /// handler bodies). Disables the gate; never propagates.
    pub fn report_fault(&mut self, origin: &str, error: &anyhow::Error) {
        self.core.contain(origin, &format!("{error:#}"));
    }

    /// Append a record to the session journal.
    pub fn journal(&mut self, record: JournalRecord) {
        self.core.journal.record(record);
    }
}
