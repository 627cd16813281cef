use request_state::{
    FetchState, Operation, RequestCell, RequestTracker, Settlement,
};
use std::fmt::Display;
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

/// Generic fetch hook return type
pub struct FetchHookReturn<T> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub refetch: Callback<()>,
}

impl<T: Clone> FetchHookReturn<T> {
    /// Returns true if this is the initial load (data not yet fetched,
    /// currently loading, and no error).
    pub fn is_initial_loading(&self) -> bool {
        self.is_loading && !self.data.is_fetched() && self.error.is_none()
    }

    /// Render based on fetch state with contextual loading/error messages.
    ///
    /// Without data, shows "Loading {context}..." or the error. With data,
    /// calls `render_fn(data, is_loading, error)` so a failed refetch can be
    /// shown next to the data from the previous fetch.
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool, Option<&String>) -> Html,
    {
        match self.data.as_ref() {
            None => {
                if self.is_loading {
                    html! {
                        <div class="text-center py-12">
                            <p class="text-neutral-600 dark:text-neutral-400">
                                {format!("Loading {}...", context)}
                            </p>
                        </div>
                    }
                } else if let Some(error) = &self.error {
                    html! {
                        <div class="p-4 rounded-md bg-red-50 \
                                   dark:bg-red-900/20 border \
                                   border-red-200 dark:border-red-800">
                            <p class="text-sm text-red-700 \
                                      dark:text-red-400">
                                {format!("Error loading {}: {}", context, error)}
                            </p>
                        </div>
                    }
                } else {
                    // required input missing, nothing was requested
                    html! {
                        <div class="text-center py-12">
                            <p class="text-neutral-600 dark:text-neutral-400">
                                {format!("No {} found", context)}
                            </p>
                        </div>
                    }
                }
            }
            Some(data) => render_fn(data, self.is_loading, self.error.as_ref()),
        }
    }
}

/// Return type of hooks that run an operation on demand.
pub struct MutationHookReturn<A, T> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub invoke: Callback<A>,
    /// Invoke again with the arguments of the last invocation, if any.
    pub refresh: Callback<()>,
    pub reset: Callback<()>,
}

/// A request cell kept across renders. Every change re-renders the
/// component.
#[hook]
fn use_request_cell<T>() -> RequestCell<T, String>
where
    T: 'static,
{
    let tracker = use_mut_ref(RequestTracker::default);
    let update = use_force_update();
    RequestCell::from_shared(tracker, move || update.force_update())
}

/// A request cell plus the arguments of its last invocation, kept across
/// renders.
#[hook]
fn use_operation<A, T>() -> Operation<A, T, String>
where
    A: 'static,
    T: 'static,
{
    let cell = use_request_cell::<T>();
    let last_args = use_mut_ref(|| None::<A>);
    Operation::from_shared(cell, last_args)
}

/// Log and hand on a settled result. Responses from superseded calls were
/// discarded by the tracker and are dropped here too.
fn report<T>(
    settled: Option<(Settlement, Result<T, String>)>,
    on_settled: &Callback<Result<T, String>>,
) {
    match settled {
        Some((Settlement::Applied, result)) => {
            if let Err(error) = &result {
                tracing::warn!(%error, "Request failed");
            }
            on_settled.emit(result);
        }
        Some((Settlement::Stale, _)) => {
            tracing::debug!("Ignoring response from a superseded request")
        }
        None => {}
    }
}

/// Generic fetch hook composer.
///
/// Fetches on mount and whenever `deps` change, and provides refetch.
/// The fetch function captures dependencies from the closure, and the
/// deps parameter is used only for dependency tracking in use_callback
/// and use_effect_with. Only the response to the most recent call is
/// kept.
///
/// # Example
///
/// ```rust,ignore
/// #[hook]
/// pub fn use_parties(filter: PartyFilter) -> FetchHookReturn<Vec<Party>> {
///     use_fetch(filter.clone(), move || {
///         let filter = filter.clone();
///         async move { get_api_client().list_parties(&filter).await }
///     })
/// }
/// ```
#[hook]
pub fn use_fetch<T, E, D, F, Fut>(deps: D, fetch_fn: F) -> FetchHookReturn<T>
where
    T: Clone + 'static,
    E: Display + 'static,
    D: PartialEq + Clone + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    let cell = use_request_cell::<T>();

    let refetch = {
        let cell = cell.clone();
        let fetch_fn = Rc::new(fetch_fn);

        use_callback(deps.clone(), move |_, _| {
            let cell = cell.clone();
            let call = fetch_fn();
            yew::platform::spawn_local(async move {
                let settled = cell
                    .run_tracked(async move {
                        call.await.map_err(|e| e.to_string())
                    })
                    .await;
                report(Some(settled), &Callback::noop());
            });
        })
    };

    // Auto-fetch on mount and when deps change
    {
        let refetch = refetch.clone();
        use_effect_with(deps, move |_| refetch.emit(()));
    }

    let snapshot = cell.snapshot();
    FetchHookReturn {
        data: snapshot.data,
        is_loading: snapshot.is_loading,
        error: snapshot.error,
        refetch,
    }
}

/// Like [`use_fetch`], for fetches that need an input which may not be
/// available yet (an id from the route, the logged in session).
///
/// While `input` is `None` nothing is requested and the data stays
/// `NotFetched`. Losing the input resets the data and discards any call
/// still in flight.
#[hook]
pub fn use_fetch_required<I, T, E, F, Fut>(
    input: Option<I>,
    fetch_fn: F,
) -> FetchHookReturn<T>
where
    I: PartialEq + Clone + 'static,
    T: Clone + 'static,
    E: Display + 'static,
    F: Fn(I) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    let operation = use_operation::<I, T>();

    let refetch = {
        let operation = operation.clone();
        let fetch_fn = Rc::new(fetch_fn);

        use_callback(input.clone(), move |_, input: &Option<I>| {
            let operation = operation.clone();
            let fetch_fn = fetch_fn.clone();
            let input = input.clone();
            yew::platform::spawn_local(async move {
                let settled = operation
                    .invoke_required(input, |input| async move {
                        fetch_fn(input).await.map_err(|e| e.to_string())
                    })
                    .await;
                report(settled, &Callback::noop());
            });
        })
    };

    {
        let refetch = refetch.clone();
        use_effect_with(input, move |_| refetch.emit(()));
    }

    let snapshot = operation.cell().snapshot();
    FetchHookReturn {
        data: snapshot.data,
        is_loading: snapshot.is_loading,
        error: snapshot.error,
        refetch,
    }
}

/// Hook for an operation the user triggers, such as a form submission.
#[hook]
pub fn use_mutation<A, T, E, F, Fut>(op: F) -> MutationHookReturn<A, T>
where
    A: Clone + 'static,
    T: Clone + 'static,
    E: Display + 'static,
    F: Fn(A) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    use_mutation_with(op, Callback::noop())
}

/// Like [`use_mutation`], also handing every applied result to
/// `on_settled`, e.g. to navigate away after a successful save. Results of
/// calls superseded by a later invoke never reach it.
#[hook]
pub fn use_mutation_with<A, T, E, F, Fut>(
    op: F,
    on_settled: Callback<Result<T, String>>,
) -> MutationHookReturn<A, T>
where
    A: Clone + 'static,
    T: Clone + 'static,
    E: Display + 'static,
    F: Fn(A) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    let operation = use_operation::<A, T>();
    let op = Rc::new(op);
    let call = move |args: A| {
        let op = op.clone();
        async move { op(args).await.map_err(|e| e.to_string()) }
    };

    let invoke = {
        let operation = operation.clone();
        let call = call.clone();
        let on_settled = on_settled.clone();

        Callback::from(move |args: A| {
            let operation = operation.clone();
            let call = call.clone();
            let on_settled = on_settled.clone();
            yew::platform::spawn_local(async move {
                let settled = operation.invoke(args, call).await;
                report(Some(settled), &on_settled);
            });
        })
    };

    // no-op until the first invoke
    let refresh = {
        let operation = operation.clone();

        Callback::from(move |_| {
            let operation = operation.clone();
            let call = call.clone();
            let on_settled = on_settled.clone();
            yew::platform::spawn_local(async move {
                let settled = operation.refresh(call).await;
                report(settled, &on_settled);
            });
        })
    };

    let reset = {
        let cell = operation.cell().clone();
        Callback::from(move |_| cell.reset())
    };

    let snapshot = operation.cell().snapshot();
    MutationHookReturn {
        data: snapshot.data,
        is_loading: snapshot.is_loading,
        error: snapshot.error,
        invoke,
        refresh,
        reset,
    }
}
