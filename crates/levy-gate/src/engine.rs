use levy_context::{is_unsafe, ContextSignals};

use crate::types::{
    GateConfig, GateOutcome, GateVerdict, NoticeThrottle, SafetyState, StateChange,
};

/// Placeholder recorded when a disable reason is blank.
const UNKNOWN_DISABLE_REASON: &str = "Unknown safety shutdown reason.";

/// Placeholder recorded when a pause reason is blank.
const UNKNOWN_PAUSE_REASON: &str = "Unsafe host state.";

/// Notice shown once when the gate transitions back to Active.
const RESUME_NOTICE: &str = "Re-enabled: safe context restored.";

/// The safety gate state machine. See the crate docs for invariants.
#[derive(Clone, Debug)]
pub struct SafetyGate {
    cfg: GateConfig,
    state: SafetyState,
    paused_notices: NoticeThrottle,
    disabled_notices: NoticeThrottle,
}

impl SafetyGate {
    pub fn new(cfg: GateConfig) -> Self {
        Self {
            cfg,
            state: SafetyState::Active,
            paused_notices: NoticeThrottle::new(),
            disabled_notices: NoticeThrottle::new(),
        }
    }

    pub fn state(&self) -> &SafetyState {
        &self.state
    }

    /// Decide whether an action in `context` may run right now.
    ///
    /// Disabled always blocks. Unsafe signals pause (or keep paused) and
    /// block. A paused gate with safe signals resumes and allows; pause
    /// is reversible, disable is not.
    pub fn evaluate(
        &mut self,
        signals: &ContextSignals,
        context: &str,
        now_secs: u64,
    ) -> GateOutcome {
        if self.state.is_disabled() {
            return self.blocked_disabled(context, now_secs);
        }

        if is_unsafe(signals) {
            let reason = format!("Unsafe combat/siege state detected while {context}.");
            let change = self.enter_pause(reason, now_secs);
            let notice = self.paused_notice(context, now_secs);
            return GateOutcome {
                verdict: GateVerdict::BlockPaused,
                change,
                notice,
            };
        }

        if self.state.is_paused() {
            return self.resume();
        }

        GateOutcome::allow()
    }

    /// Explicit pause triggered by a host safety event (siege started, map
    /// event started, siege engine destroyed). Silently ignored once
    /// disabled; the terminal state never regresses to a softer one.
    pub fn pause(&mut self, reason: &str, context: &str, now_secs: u64) -> GateOutcome {
        if self.state.is_disabled() {
            return GateOutcome {
                verdict: GateVerdict::BlockDisabled,
                change: None,
                notice: None,
            };
        }

        let clean = clean_reason(reason, UNKNOWN_PAUSE_REASON);
        let change = self.enter_pause(clean, now_secs);
        let notice = self.paused_notice(context, now_secs);
        GateOutcome {
            verdict: GateVerdict::BlockPaused,
            change,
            notice,
        }
    }

    /// Leave the paused state if the signals are safe again; otherwise
    /// stay paused and (throttled) remind the user why.
    pub fn try_resume(
        &mut self,
        signals: &ContextSignals,
        context: &str,
        now_secs: u64,
    ) -> GateOutcome {
        match &self.state {
            SafetyState::Disabled { .. } => self.blocked_disabled(context, now_secs),
            SafetyState::Active => GateOutcome::allow(),
            SafetyState::Paused { .. } => {
                if is_unsafe(signals) {
                    let notice = self.paused_notice(context, now_secs);
                    GateOutcome {
                        verdict: GateVerdict::BlockPaused,
                        change: None,
                        notice,
                    }
                } else {
                    self.resume()
                }
            }
        }
    }

    /// Terminal disable. Idempotent: the first call records the reason and
    /// produces the one non-throttled notice; later calls change nothing
    /// visible and never overwrite an already-set non-empty reason.
    pub fn disable(&mut self, reason: &str, now_secs: u64) -> GateOutcome {
        let clean = clean_reason(reason, UNKNOWN_DISABLE_REASON);

        if let SafetyState::Disabled { reason: stored, .. } = &mut self.state {
            if stored.trim().is_empty() {
                *stored = clean;
            }
            return GateOutcome {
                verdict: GateVerdict::BlockDisabled,
                change: None,
                notice: None,
            };
        }

        self.state = SafetyState::Disabled {
            reason: clean.clone(),
            since: now_secs,
        };
        GateOutcome {
            verdict: GateVerdict::BlockDisabled,
            change: Some(StateChange::Disabled {
                reason: clean.clone(),
            }),
            notice: Some(format!(
                "Safety mode enabled. Purchase actions are disabled for this session: {clean}"
            )),
        }
    }

    /// Disable with a reason composed from a fault's origin and message.
    /// The caller journals the fault detail before invoking this.
    pub fn report_fault(&mut self, origin: &str, message: &str, now_secs: u64) -> GateOutcome {
        self.disable(&format!("{origin} failed: {message}"), now_secs)
    }

    fn resume(&mut self) -> GateOutcome {
        self.state = SafetyState::Active;
        GateOutcome {
            verdict: GateVerdict::Allow,
            change: Some(StateChange::Resumed),
            notice: Some(RESUME_NOTICE.to_string()),
        }
    }

    /// Enter (or re-reason) the paused state. Returns a change only when
    /// the pause is new or the reason differs; `since` is kept across a
    /// reason update so the pause records when blocking began.
    fn enter_pause(&mut self, reason: String, now_secs: u64) -> Option<StateChange> {
        match &mut self.state {
            SafetyState::Disabled { .. } => None,
            SafetyState::Paused { reason: stored, .. } => {
                if *stored == reason {
                    None
                } else {
                    *stored = reason.clone();
                    Some(StateChange::Paused { reason })
                }
            }
            SafetyState::Active => {
                self.state = SafetyState::Paused {
                    reason: reason.clone(),
                    since: now_secs,
                };
                Some(StateChange::Paused { reason })
            }
        }
    }

    fn blocked_disabled(&mut self, context: &str, now_secs: u64) -> GateOutcome {
        let reason = self
            .state
            .reason()
            .unwrap_or(UNKNOWN_DISABLE_REASON)
            .to_string();
        let notice = self
            .disabled_notices
            .try_emit(context, now_secs, self.cfg.notice_cooldown_secs)
            .then(|| format!("Blocked ({context}): {reason}"));
        GateOutcome {
            verdict: GateVerdict::BlockDisabled,
            change: None,
            notice,
        }
    }

    fn paused_notice(&mut self, context: &str, now_secs: u64) -> Option<String> {
        let reason = self
            .state
            .reason()
            .unwrap_or(UNKNOWN_PAUSE_REASON)
            .to_string();
        self.paused_notices
            .try_emit(context, now_secs, self.cfg.notice_cooldown_secs)
            .then(|| format!("Temporarily blocked ({context}): {reason}"))
    }
}

fn clean_reason(reason: &str, fallback: &str) -> String {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
