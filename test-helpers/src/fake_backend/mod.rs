//! An in-process stand-in for the marketplace backend.
//!
//! Serves the same routes the client calls, backed by an in-memory
//! [`Store`]. Tests reach into the store directly to seed records with
//! known ids, and can add latency or simulate an outage to exercise the
//! client's failure paths.

mod error;
mod routes;
pub mod store;

use actix_web::dev::{Server, Service};
use actix_web::{App, HttpServer, web};
use jiff::Timestamp;
use std::net::TcpListener;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

pub use error::APIError;
pub use store::{Store, StoreError};

#[derive(Default)]
pub struct FakeBackend {
    store: Mutex<Store>,
    requests: AtomicUsize,
    latency_ms: AtomicU64,
    outage: AtomicBool,
}

impl FakeBackend {
    pub fn store(&self) -> MutexGuard<'_, Store> {
        // a panicking test must not take every later request down with it
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of requests received so far, including failed ones.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Delay every response by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    /// While set, every request fails with a 500 and a plain text body.
    pub fn set_outage(&self, outage: bool) {
        self.outage.store(outage, Ordering::SeqCst);
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms.load(Ordering::SeqCst))
    }
}

/// Build the server, but not await it.
pub fn build(
    listener: TcpListener,
    backend: Arc<FakeBackend>,
) -> std::io::Result<Server> {
    let backend = web::Data::from(backend);
    let server = HttpServer::new(move || {
        let counting = backend.clone();
        App::new()
            .wrap_fn(move |req, srv| {
                counting.requests.fetch_add(1, Ordering::SeqCst);
                let latency = counting.latency();
                // handlers must not run during an outage
                let response = (!counting.outage.load(Ordering::SeqCst))
                    .then(|| srv.call(req));
                async move {
                    if !latency.is_zero() {
                        tokio::time::sleep(latency).await;
                    }
                    match response {
                        Some(response) => response.await,
                        None => Err(actix_web::Error::from(
                            APIError::UnexpectedError(anyhow::anyhow!(
                                "Simulated outage"
                            )),
                        )),
                    }
                }
            })
            .app_data(backend.clone())
            .service(routes::api_services())
    })
    .workers(1)
    .listen(listener)?
    .run();
    Ok(server)
}
