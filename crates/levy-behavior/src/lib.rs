//! levy-behavior
//!
//! The session-scoped behavior object: owns the safety gate (via the
//! dispatcher), the shared catalog, and the capability flags; handles the
//! host's lifecycle events; and registers the purchase action set exactly
//! once per session.
//!
//! All session-wide mutable state lives on this instance; there are no
//! process-wide singletons. The host constructs one `SessionBehavior` per
//! session and drives it from its callback thread; nothing here blocks,
//! spawns, or re-enters.
//!
//! Persisted state is explicitly empty: [`SessionBehavior::sync_data`] is
//! a no-op, and a fresh session always starts with an Active gate.

mod menus;

use std::sync::Arc;

use serde_json::json;

use levy_audit::{Journal, JournalRecord};
use levy_catalog::Catalog;
use levy_dispatch::{
    ActionDispatcher, ActionId, Clock, MenuFlow, MenuRegistrar, NoticeSink, SignalSource,
};
use levy_gate::{GateConfig, SafetyGate, SafetyState};
use levy_purchase::{CultureSource, Treasury, UnitSink};

pub use menus::{
    ACTION_BANDIT, ACTION_BASIC, ACTION_ELITE, ACTION_FIAN, ACTION_LEAVE, ACTION_OPEN,
    ACTION_PIRATE, ACTION_SISTERS, CASTLE_MENU, MOD_MENU, PORT_MENU, TOWN_MENU,
};

/// Everything registered effects need from the host.
pub trait HostServices: Treasury + UnitSink + CultureSource + MenuFlow {}

impl<T: Treasury + UnitSink + CultureSource + MenuFlow> HostServices for T {}

/// Optional host capabilities, probed exactly once at construction.
/// Replaces runtime introspection with an explicit, injected answer.
pub trait CapabilityProbe {
    /// Whether the extended naval content (marine units, port menus) is
    /// present in this session.
    fn naval_content_present(&self) -> bool;
}

/// A map event the host reported starting.
#[derive(Clone, Debug)]
pub struct MapEventInfo {
    pub involves_player: bool,
    /// Host-reported event type, for the pause reason only.
    pub event_type: String,
}

/// A siege engine loss the host reported.
#[derive(Clone, Debug)]
pub struct SiegeEngineLoss {
    pub settlement_id: Option<String>,
    pub side: String,
    pub engine_type: Option<String>,
}

/// The session behavior. Generic over the host-services type `H` that
/// registered checks and effects receive at invocation time.
pub struct SessionBehavior<H: HostServices> {
    dispatcher: ActionDispatcher<H>,
    catalog: Arc<Catalog>,
    naval_content: bool,
    registration_complete: bool,
}

impl<H: HostServices> SessionBehavior<H> {
    pub fn new(
        catalog: Arc<Catalog>,
        signals: Box<dyn SignalSource>,
        clock: Box<dyn Clock>,
        notices: Box<dyn NoticeSink>,
        journal: Box<dyn Journal>,
        probe: &dyn CapabilityProbe,
    ) -> Self {
        let naval_content = probe.naval_content_present();
        let dispatcher = ActionDispatcher::new(
            SafetyGate::new(GateConfig::sane_defaults()),
            signals,
            clock,
            notices,
            journal,
        );
        Self {
            dispatcher,
            catalog,
            naval_content,
            registration_complete: false,
        }
    }

    pub fn gate_state(&self) -> &SafetyState {
        self.dispatcher.gate_state()
    }

    pub fn naval_content(&self) -> bool {
        self.naval_content
    }

    // -----------------------------------------------------------------------
    // Lifecycle events
    // -----------------------------------------------------------------------

    /// Register the menu/action set. Runs at most once per session; a
    /// registration failure is a fault and terminates the feature set.
    pub fn on_session_launched(&mut self, registrar: &mut dyn MenuRegistrar) {
        if self.dispatcher.is_disabled_and_notify("session launch") {
            return;
        }
        if self.registration_complete {
            return;
        }

        let catalog = Arc::clone(&self.catalog);
        match menus::register_actions(
            &mut self.dispatcher,
            registrar,
            &catalog,
            self.naval_content,
        ) {
            Ok(()) => {
                self.registration_complete = true;
                tracing::debug!("menu registration complete");
            }
            Err(err) => self.dispatcher.report_fault("menu registration", &err),
        }
    }

    /// Re-evaluate safety on every menu open: pauses on unsafe context,
    /// resumes when the context cleared, notifies when disabled.
    pub fn on_menu_opened(&mut self, menu_id: Option<&str>) {
        tracing::debug!(menu_id = menu_id.unwrap_or("(unknown)"), "menu opened");
        self.dispatcher.evaluate_context("menu open", menu_id);
    }

    pub fn on_player_siege_started(&mut self) {
        self.dispatcher
            .pause("Player entered siege flow.", "player siege started");
    }

    pub fn on_map_event_started(&mut self, event: &MapEventInfo) {
        if !event.involves_player {
            return;
        }
        self.dispatcher.pause(
            &format!("Player map event started ({}).", event.event_type),
            "map event started",
        );
    }

    pub fn on_map_event_ended(&mut self) {
        self.dispatcher.try_resume("map event ended");
    }

    pub fn on_siege_engine_destroyed(&mut self, loss: &SiegeEngineLoss) {
        self.dispatcher.journal(
            JournalRecord::new(
                "siege_engine_destroyed",
                format!(
                    "siege engine destroyed: settlement={}, side={}, engine={}",
                    loss.settlement_id.as_deref().unwrap_or("(null)"),
                    loss.side,
                    loss.engine_type.as_deref().unwrap_or("(null)"),
                ),
            )
            .with_fields(json!({
                "settlement_id": loss.settlement_id,
                "side": loss.side,
                "engine_type": loss.engine_type,
            })),
        );
        self.dispatcher
            .pause("Siege engine destruction detected.", "siege engine destroyed");
    }

    /// Daily housekeeping: nothing to repair in this core, but a paused
    /// gate gets a fresh chance to resume off the menu path.
    pub fn on_daily_tick(&mut self) {
        self.dispatcher.try_resume("daily tick");
    }

    /// The session-sync hook. Persisted state is explicitly empty.
    pub fn sync_data(&mut self) {}

    // -----------------------------------------------------------------------
    // Host-facing action surface
    // -----------------------------------------------------------------------

    /// Enablement wrapper for a registered action. Safe default: `false`.
    pub fn check_enabled(&mut self, id: &ActionId, menu_id: Option<&str>, host: &mut H) -> bool {
        self.dispatcher.check_enabled(id, menu_id, host)
    }

    /// Effect wrapper for a registered action. Safe default: no-op.
    pub fn run_effect(&mut self, id: &ActionId, menu_id: Option<&str>, host: &mut H) {
        self.dispatcher.run_effect(id, menu_id, host)
    }
}
