//! levy-testkit
//!
//! Deterministic test doubles shared by the scenario tests: a manual
//! clock, a scriptable signal source, recording sinks, and an in-memory
//! "paper" host implementing the full resource surface.
//!
//! No randomness, no wall clock, no IO. Doubles hand out `Rc` handles so
//! a test keeps control after the boxed double moves into the dispatcher.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

use levy_audit::{Journal, JournalRecord};
use levy_context::ContextSignals;
use levy_dispatch::{
    ActionSpec, Clock, MenuFlow, MenuRegistrar, NoticeSink, SignalError, SignalSource,
};
use levy_purchase::{AddUnits, CultureSource, Treasury, UnitSink};

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Clock advanced explicitly by the test.
#[derive(Clone)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn at(now_secs: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(now_secs)),
        }
    }

    /// Handle for advancing the clock after the boxed clone moved away.
    pub fn handle(&self) -> Rc<Cell<u64>> {
        Rc::clone(&self.now)
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> u64 {
        self.now.get()
    }
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct SignalScript {
    signals: ContextSignals,
    fail_with: Option<String>,
}

/// Signal source whose next answer is set from the outside.
#[derive(Clone, Default)]
pub struct ScriptedSignals {
    script: Rc<RefCell<SignalScript>>,
}

impl ScriptedSignals {
    pub fn safe() -> Self {
        Self::default()
    }

    pub fn set(&self, signals: ContextSignals) {
        self.script.borrow_mut().signals = signals;
        self.script.borrow_mut().fail_with = None;
    }

    pub fn set_unsafe(&self) {
        self.set(ContextSignals {
            siege_encounter_active: true,
            ..ContextSignals::safe()
        });
    }

    pub fn set_safe(&self) {
        self.set(ContextSignals::safe());
    }

    /// Make the next samples fail; exercises the probe fault path.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.script.borrow_mut().fail_with = Some(message.into());
    }
}

impl SignalSource for ScriptedSignals {
    fn sample(&mut self) -> Result<ContextSignals, SignalError> {
        let script = self.script.borrow();
        match &script.fail_with {
            Some(msg) => Err(SignalError::new(msg.clone())),
            None => Ok(script.signals.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Notice sink that remembers every message.
#[derive(Clone, Default)]
pub struct RecordingNotices {
    messages: Rc<RefCell<Vec<String>>>,
}

impl RecordingNotices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.messages)
    }
}

impl NoticeSink for RecordingNotices {
    fn notify(&mut self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

/// In-memory journal.
#[derive(Clone, Default)]
pub struct MemoryJournal {
    records: Rc<RefCell<Vec<JournalRecord>>>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Rc<RefCell<Vec<JournalRecord>>> {
        Rc::clone(&self.records)
    }
}

impl Journal for MemoryJournal {
    fn record(&mut self, record: JournalRecord) {
        self.records.borrow_mut().push(record);
    }
}

// ---------------------------------------------------------------------------
// Paper host
// ---------------------------------------------------------------------------

/// Deterministic in-memory host: treasury, roster, culture, menu flow.
///
/// Knows every unit identifier except those in `unknown`; insertions are
/// recorded in call order for exact assertions.
#[derive(Debug, Default)]
pub struct PaperHost {
    pub gold: u64,
    pub debits: Vec<u64>,
    pub added: Vec<(String, u32)>,
    pub unknown: BTreeSet<String>,
    pub culture: Option<String>,
    pub menu_switches: Vec<String>,
}

impl PaperHost {
    pub fn with_gold(gold: u64) -> Self {
        Self {
            gold,
            ..Self::default()
        }
    }

    pub fn with_culture(mut self, raw_culture_id: impl Into<String>) -> Self {
        self.culture = Some(raw_culture_id.into());
        self
    }

    /// Declare an identifier the host cannot resolve.
    pub fn forget_unit(&mut self, unit_id: impl Into<String>) {
        self.unknown.insert(unit_id.into());
    }
}

impl Treasury for PaperHost {
    fn funds_available(&self) -> u64 {
        self.gold
    }

    fn debit(&mut self, amount: u64) {
        self.gold = self.gold.saturating_sub(amount);
        self.debits.push(amount);
    }
}

impl UnitSink for PaperHost {
    fn add_units(&mut self, unit_id: &str, quantity: u32) -> AddUnits {
        if self.unknown.contains(unit_id) {
            return AddUnits::UnknownUnit;
        }
        self.added.push((unit_id.to_string(), quantity));
        AddUnits::Added
    }

    fn has_unit(&self, unit_id: &str) -> bool {
        !self.unknown.contains(unit_id)
    }
}

impl CultureSource for PaperHost {
    fn current_culture_key(&self) -> Option<String> {
        self.culture.clone()
    }
}

impl MenuFlow for PaperHost {
    fn switch_menu(&mut self, menu_id: &str) {
        self.menu_switches.push(menu_id.to_string());
    }
}

// ---------------------------------------------------------------------------
// Menu registrar
// ---------------------------------------------------------------------------

/// Registrar that records what the behavior registered, optionally
/// failing to exercise the registration fault path.
#[derive(Debug, Default)]
pub struct RecordingRegistrar {
    pub menus: Vec<(String, String)>,
    pub options: Vec<ActionSpec>,
    pub fail_with: Option<String>,
}

impl RecordingRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn option_ids(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|s| s.action_id.as_str().to_string())
            .collect()
    }
}

impl MenuRegistrar for RecordingRegistrar {
    fn add_menu(&mut self, menu_id: &str, title: &str) -> anyhow::Result<()> {
        if let Some(msg) = &self.fail_with {
            anyhow::bail!("{msg}");
        }
        self.menus.push((menu_id.to_string(), title.to_string()));
        Ok(())
    }

    fn add_option(&mut self, spec: &ActionSpec) -> anyhow::Result<()> {
        if let Some(msg) = &self.fail_with {
            anyhow::bail!("{msg}");
        }
        self.options.push(spec.clone());
        Ok(())
    }
}
