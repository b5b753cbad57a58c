use std::collections::BTreeMap;

/// Gate configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateConfig {
    /// Minimum seconds between user-facing notices for the same
    /// action-context while a blocking state persists.
    pub notice_cooldown_secs: u64,
}

impl GateConfig {
    pub fn sane_defaults() -> Self {
        Self {
            notice_cooldown_secs: 10,
        }
    }
}

/// The gate's three states.
///
/// `since` is the caller-supplied monotonic second at which the state was
/// entered; `reason` is the human-readable cause recorded on entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SafetyState {
    /// Actions run normally.
    Active,
    /// Actions are blocked while the context is unsafe; reversible.
    Paused { reason: String, since: u64 },
    /// Actions are blocked for the rest of the session; terminal.
    Disabled { reason: String, since: u64 },
}

impl SafetyState {
    pub fn is_active(&self) -> bool {
        matches!(self, SafetyState::Active)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, SafetyState::Paused { .. })
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, SafetyState::Disabled { .. })
    }

    /// The recorded reason, for the blocking states.
    pub fn reason(&self) -> Option<&str> {
        match self {
            SafetyState::Active => None,
            SafetyState::Paused { reason, .. } | SafetyState::Disabled { reason, .. } => {
                Some(reason)
            }
        }
    }
}

/// What the caller may do with the action it asked about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateVerdict {
    /// Run the action.
    Allow,
    /// Skip the action; the context is temporarily unsafe.
    BlockPaused,
    /// Skip the action; the gate is terminally disabled.
    BlockDisabled,
}

/// A state transition the caller should journal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateChange {
    Paused { reason: String },
    Resumed,
    Disabled { reason: String },
}

/// Result of one gate operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateOutcome {
    pub verdict: GateVerdict,
    /// Present only when this call actually changed gate state.
    pub change: Option<StateChange>,
    /// User-facing notice, already throttled; forward to the sink as-is.
    pub notice: Option<String>,
}

impl GateOutcome {
    pub(crate) fn allow() -> Self {
        Self {
            verdict: GateVerdict::Allow,
            change: None,
            notice: None,
        }
    }

    pub fn allowed(&self) -> bool {
        self.verdict == GateVerdict::Allow
    }
}

/// Per-action-context notice suppression.
///
/// Records the last monotonic second a notice was emitted for a context
/// and swallows repeats inside the cooldown window. One throttle exists
/// per blocking state so a pause notice does not consume the disabled
/// notice budget.
#[derive(Clone, Debug, Default)]
pub struct NoticeThrottle {
    last_notice: BTreeMap<String, u64>,
}

impl NoticeThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when a notice for `context` may be emitted now; records the
    /// emission time when it may.
    pub fn try_emit(&mut self, context: &str, now_secs: u64, cooldown_secs: u64) -> bool {
        if let Some(last) = self.last_notice.get(context) {
            if now_secs.saturating_sub(*last) < cooldown_secs {
                return false;
            }
        }
        self.last_notice.insert(context.to_string(), now_secs);
        true
    }
}
