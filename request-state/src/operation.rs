use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use crate::{RequestCell, Settlement};

/// A [`RequestCell`] that remembers the arguments of its last invocation so
/// the same call can be issued again with [`refresh`](Self::refresh).
pub struct Operation<A, T, E> {
    cell: RequestCell<T, E>,
    last_args: Rc<RefCell<Option<A>>>,
}

impl<A, T, E> Clone for Operation<A, T, E> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            last_args: self.last_args.clone(),
        }
    }
}

impl<A, T, E> Operation<A, T, E> {
    pub fn new(cell: RequestCell<T, E>) -> Self {
        Self::from_shared(cell, Rc::new(RefCell::new(None)))
    }

    /// Use an argument slot owned elsewhere, e.g. by a UI hook.
    pub fn from_shared(
        cell: RequestCell<T, E>,
        last_args: Rc<RefCell<Option<A>>>,
    ) -> Self {
        Self { cell, last_args }
    }

    pub fn cell(&self) -> &RequestCell<T, E> {
        &self.cell
    }

    pub fn last_args(&self) -> Option<A>
    where
        A: Clone,
    {
        self.last_args.borrow().clone()
    }

    /// Record `args` as the latest arguments and run `op` with them.
    pub async fn invoke<F, Fut>(
        &self,
        args: A,
        op: F,
    ) -> (Settlement, Result<T, E>)
    where
        A: Clone,
        F: FnOnce(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: Clone,
        E: Clone,
    {
        *self.last_args.borrow_mut() = Some(args.clone());
        self.cell.run_tracked(op(args)).await
    }

    /// Run `op` again with the arguments of the last invocation. Before the
    /// first invocation nothing is called and `None` is returned.
    pub async fn refresh<F, Fut>(
        &self,
        op: F,
    ) -> Option<(Settlement, Result<T, E>)>
    where
        A: Clone,
        F: FnOnce(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: Clone,
        E: Clone,
    {
        let args = self.last_args();
        match args {
            Some(args) => Some(self.invoke(args, op).await),
            None => {
                tracing::debug!("Nothing invoked yet, skipping refresh");
                None
            }
        }
    }

    /// Invoke with `input` when present. A missing input forgets the last
    /// arguments and resets the slot, discarding any call in flight.
    pub async fn invoke_required<F, Fut>(
        &self,
        input: Option<A>,
        op: F,
    ) -> Option<(Settlement, Result<T, E>)>
    where
        A: Clone,
        F: FnOnce(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: Clone,
        E: Clone,
    {
        match input {
            Some(args) => Some(self.invoke(args, op).await),
            None => {
                self.last_args.borrow_mut().take();
                self.cell.run_required(None, op).await
            }
        }
    }
}
