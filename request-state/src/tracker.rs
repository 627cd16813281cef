use crate::{FetchState, RequestOutcome};

/// Which settlement is allowed to update observable state when calls
/// overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SettleOrder {
    /// Only the most recently issued call is applied; responses from
    /// superseded calls are discarded when they arrive.
    #[default]
    LatestIssued,
    /// Every settlement is applied, so whichever response arrives last wins
    /// regardless of issue order. Non-deterministic under overlap.
    LastSettled,
}

/// Identity of one issued call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Invocation(u64);

impl Invocation {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// What a settlement did to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    /// The invocation was superseded, reset away or already settled.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Succeeded,
    Failed,
}

/// Observable fields of a request slot, cloned out of a tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSnapshot<T, E> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<E>,
}

/// State of one request slot across any number of invocations.
///
/// `data` keeps the last successful payload even after later failures.
/// `error` is cleared whenever a call begins and set only by a failed
/// settlement.
#[derive(Debug)]
pub struct RequestTracker<T, E> {
    order: SettleOrder,
    issued: u64,
    /// Invocations that have begun but not settled or been abandoned.
    pending: Vec<u64>,
    data: FetchState<T>,
    error: Option<E>,
    phase: Phase,
}

impl<T, E> Default for RequestTracker<T, E> {
    fn default() -> Self {
        Self::new(SettleOrder::default())
    }
}

impl<T, E> RequestTracker<T, E> {
    pub fn new(order: SettleOrder) -> Self {
        Self {
            order,
            issued: 0,
            pending: Vec::new(),
            data: FetchState::NotFetched,
            error: None,
            phase: Phase::Idle,
        }
    }

    pub fn order(&self) -> SettleOrder {
        self.order
    }

    /// Start a new call. Clears the error and supersedes any earlier
    /// pending call.
    pub fn begin(&mut self) -> Invocation {
        self.issued += 1;
        self.pending.push(self.issued);
        self.error = None;
        Invocation(self.issued)
    }

    /// Record the result of a call.
    pub fn settle(
        &mut self,
        invocation: Invocation,
        result: Result<T, E>,
    ) -> Settlement {
        if !self.take_pending(invocation) {
            return Settlement::Stale;
        }
        if self.order == SettleOrder::LatestIssued
            && invocation.0 != self.issued
        {
            tracing::debug!(
                invocation = invocation.0,
                latest = self.issued,
                "Discarding response from superseded request"
            );
            return Settlement::Stale;
        }
        match result {
            Ok(data) => {
                self.data = FetchState::Fetched(data);
                self.error = None;
                self.phase = Phase::Succeeded;
            }
            Err(error) => {
                self.error = Some(error);
                self.phase = Phase::Failed;
            }
        }
        Settlement::Applied
    }

    /// Forget a call that will never settle, e.g. because its future was
    /// dropped. Returns whether it was still pending.
    pub fn abandon(&mut self, invocation: Invocation) -> bool {
        self.take_pending(invocation)
    }

    /// Return to `Idle` with no data, discarding anything in flight.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.data = FetchState::NotFetched;
        self.error = None;
        self.phase = Phase::Idle;
    }

    pub fn is_loading(&self) -> bool {
        match self.order {
            SettleOrder::LatestIssued => self.pending.contains(&self.issued),
            SettleOrder::LastSettled => !self.pending.is_empty(),
        }
    }

    pub fn data(&self) -> &FetchState<T> {
        &self.data
    }

    pub fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }

    /// Number of calls issued over the tracker's lifetime.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    pub fn outcome(&self) -> RequestOutcome<&T, &E> {
        if self.is_loading() {
            return RequestOutcome::Pending;
        }
        match (self.phase, &self.data, &self.error) {
            (Phase::Failed, _, Some(error)) => RequestOutcome::Failed(error),
            (Phase::Succeeded, FetchState::Fetched(data), _) => {
                RequestOutcome::Succeeded(data)
            }
            _ => RequestOutcome::Idle,
        }
    }

    pub fn snapshot(&self) -> RequestSnapshot<T, E>
    where
        T: Clone,
        E: Clone,
    {
        RequestSnapshot {
            data: self.data.clone(),
            is_loading: self.is_loading(),
            error: self.error.clone(),
        }
    }

    fn take_pending(&mut self, invocation: Invocation) -> bool {
        match self.pending.iter().position(|id| *id == invocation.0) {
            Some(index) => {
                self.pending.swap_remove(index);
                true
            }
            None => false,
        }
    }
}
