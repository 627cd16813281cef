//! Lifecycle bookkeeping for a single asynchronous request.
//!
//! A [`RequestTracker`] records the observable state of one request slot:
//! the last successful payload, whether a call is in flight, and the last
//! error. Every issued call gets an [`Invocation`] id so that, by default,
//! only the most recently issued call may change what is observed. A
//! [`RequestCell`] shares a tracker with a change notifier and drives a
//! future through it, which is what UI hooks build on. An [`Operation`]
//! adds the arguments of the last invocation so a call can be refreshed.

mod cell;
mod operation;
mod outcome;
mod tracker;

pub use cell::RequestCell;
pub use operation::Operation;
pub use outcome::{FetchState, RequestOutcome};
pub use tracker::{
    Invocation, RequestSnapshot, RequestTracker, SettleOrder, Settlement,
};
