//! levy-gate
//!
//! The safety gate: a three-state machine (Active, Paused, Disabled)
//! deciding whether a registered action may run.
//!
//! # Invariants
//!
//! - **Transitions are monotone with respect to severity**: Active ⇄ Paused
//!   is reversible; Active → Disabled and Paused → Disabled are one-way;
//!   Disabled has no outgoing transition for the lifetime of the process.
//!
//! - **Only gate methods mutate gate state.** Callers hold the gate inside
//!   the session behavior instance and never touch `SafetyState` directly.
//!
//! - **The gate performs no IO.** Every method returns a [`GateOutcome`]
//!   carrying the verdict, the state change to journal (if any), and the
//!   already-throttled user notice to display (if any). Time enters as a
//!   caller-supplied monotonic `now_secs`; there is no clock, no logging,
//!   no randomness in here.

mod engine;
mod types;

pub use engine::SafetyGate;
pub use types::{
    GateConfig, GateOutcome, GateVerdict, NoticeThrottle, SafetyState, StateChange,
};
