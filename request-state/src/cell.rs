use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use crate::{
    Invocation, RequestSnapshot, RequestTracker, SettleOrder, Settlement,
};

/// A shared [`RequestTracker`] plus a callback fired after every change.
///
/// Cloning is cheap and clones observe the same tracker. Meant for
/// single-threaded executors; the tracker is never borrowed across an await
/// and the notifier runs with no borrow held, so it may read the tracker.
pub struct RequestCell<T, E> {
    tracker: Rc<RefCell<RequestTracker<T, E>>>,
    notify: Rc<dyn Fn()>,
}

impl<T, E> Clone for RequestCell<T, E> {
    fn clone(&self) -> Self {
        Self {
            tracker: self.tracker.clone(),
            notify: self.notify.clone(),
        }
    }
}

impl<T: 'static, E: 'static> RequestCell<T, E> {
    pub fn new(order: SettleOrder) -> Self {
        let tracker = Rc::new(RefCell::new(RequestTracker::new(order)));
        Self::from_shared(tracker, || {})
    }

    /// Wrap a tracker owned elsewhere, e.g. by a UI hook's state slot.
    pub fn from_shared(
        tracker: Rc<RefCell<RequestTracker<T, E>>>,
        notify: impl Fn() + 'static,
    ) -> Self {
        Self {
            tracker,
            notify: Rc::new(notify),
        }
    }
}

impl<T, E> RequestCell<T, E> {
    /// Inspect the tracker without cloning its contents.
    pub fn with<R>(&self, f: impl FnOnce(&RequestTracker<T, E>) -> R) -> R {
        f(&self.tracker.borrow())
    }

    pub fn snapshot(&self) -> RequestSnapshot<T, E>
    where
        T: Clone,
        E: Clone,
    {
        self.tracker.borrow().snapshot()
    }

    pub fn is_loading(&self) -> bool {
        self.tracker.borrow().is_loading()
    }

    /// Return the slot to `Idle` with no data.
    pub fn reset(&self) {
        self.tracker.borrow_mut().reset();
        (self.notify)();
    }

    /// Run one call through the tracker and hand its result back.
    ///
    /// Loading starts when the returned future is first polled. If the
    /// future is dropped before the call settles, the invocation is
    /// abandoned so loading cannot get stuck. The result is returned even
    /// when a newer call superseded this one; use
    /// [`run_tracked`](Self::run_tracked) to tell the two apart.
    pub async fn run<Fut>(&self, call: Fut) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
        T: Clone,
        E: Clone,
    {
        self.run_tracked(call).await.1
    }

    /// Like [`run`](Self::run), also reporting whether the result reached
    /// the tracker. A [`Settlement::Stale`] result was discarded and should
    /// not trigger any side effect.
    pub async fn run_tracked<Fut>(
        &self,
        call: Fut,
    ) -> (Settlement, Result<T, E>)
    where
        Fut: Future<Output = Result<T, E>>,
        T: Clone,
        E: Clone,
    {
        let in_flight = self.begin();
        let result = call.await;
        let settlement = in_flight.settle(result.clone());
        (settlement, result)
    }

    /// Like [`run_tracked`](Self::run_tracked), but only when the required
    /// input is present. Without it the slot is reset, `op` is never called
    /// and `None` is returned.
    pub async fn run_required<I, F, Fut>(
        &self,
        input: Option<I>,
        op: F,
    ) -> Option<(Settlement, Result<T, E>)>
    where
        F: FnOnce(I) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: Clone,
        E: Clone,
    {
        match input {
            Some(input) => Some(self.run_tracked(op(input)).await),
            None => {
                tracing::debug!("Required input missing, skipping request");
                self.reset();
                None
            }
        }
    }

    fn begin(&self) -> InFlight<'_, T, E> {
        let invocation = self.tracker.borrow_mut().begin();
        (self.notify)();
        InFlight {
            cell: self,
            invocation: Some(invocation),
        }
    }
}

/// Settles or abandons its invocation exactly once.
struct InFlight<'a, T, E> {
    cell: &'a RequestCell<T, E>,
    invocation: Option<Invocation>,
}

impl<T, E> InFlight<'_, T, E> {
    fn settle(mut self, result: Result<T, E>) -> Settlement {
        let Some(invocation) = self.invocation.take() else {
            return Settlement::Stale;
        };
        let settlement =
            self.cell.tracker.borrow_mut().settle(invocation, result);
        if settlement == Settlement::Applied {
            (self.cell.notify)();
        }
        settlement
    }
}

impl<T, E> Drop for InFlight<'_, T, E> {
    fn drop(&mut self) {
        if let Some(invocation) = self.invocation.take() {
            let was_pending =
                self.cell.tracker.borrow_mut().abandon(invocation);
            if was_pending {
                tracing::debug!(
                    invocation = invocation.id(),
                    "Request dropped before settling"
                );
                (self.cell.notify)();
            }
        }
    }
}
