//! levy-dispatch
//!
//! The action dispatcher: the SINGLE choke-point through which every
//! host-facing action flows.
//!
//! # Invariants
//!
//! - **Gate first.** Every enablement check and every effect runs
//!   `SafetyGate::evaluate` before the wrapped logic; a non-Allow verdict
//!   short-circuits to the safe default (check → `false`, effect → no-op)
//!   without invoking the wrapped logic.
//!
//! - **Nothing escapes.** Any error returned by wrapped logic (or by the
//!   context signal probe itself) is caught here, journaled with the
//!   action identity, reported to the gate (which disables for the rest
//!   of the session), and converted into the same safe default. The host
//!   never observes a failure from this crate.
//!
//! - **Wrapped logic does no IO.** Checks return `bool`; effects return an
//!   [`ActionOutput`] of notices and journal records that the dispatcher
//!   forwards to its sinks. Sink failures are absorbed below this layer
//!   (see levy-audit) and never affect gate state.

mod dispatcher;
mod seams;

pub use dispatcher::{ActionDispatcher, ActionId, ActionOutput, ActionSpec, CheckFn, EffectFn};
pub use seams::{
    Clock, MenuFlow, MenuRegistrar, NoticeSink, SessionClock, SignalError, SignalSource,
};
