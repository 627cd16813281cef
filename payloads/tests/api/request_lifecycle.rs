//! The request-state cell driving real client calls.

use payloads::{ArtistId, responses::Artist};
use request_state::{FetchState, RequestCell, SettleOrder};
use std::time::Duration;

use test_helpers::{spawn_app, spawn_app_with_timeout};

fn artist_cell() -> RequestCell<Artist, String> {
    RequestCell::new(SettleOrder::LatestIssued)
}

#[tokio::test]
async fn fetch_by_id_stores_the_artist() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.insert_artist("42", "Foo");
    let cell = artist_cell();

    let result = cell
        .run(async {
            app.client
                .get_artist(&ArtistId("42".into()))
                .await
                .map_err(|e| e.to_string())
        })
        .await;

    assert_eq!(result.map(|a| a.name), Ok("Foo".to_string()));
    let snapshot = cell.snapshot();
    assert_eq!(
        snapshot.data.as_ref().map(|a| a.name.as_str()),
        Some("Foo")
    );
    assert!(!snapshot.is_loading);
    assert_eq!(snapshot.error, None);

    Ok(())
}

#[tokio::test]
async fn not_found_keeps_previous_artist() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.insert_artist("42", "Foo");
    let cell = artist_cell();
    let fetch = |id: &'static str| {
        let client = app.client.clone();
        async move {
            client
                .get_artist(&ArtistId(id.into()))
                .await
                .map_err(|e| e.to_string())
        }
    };

    cell.run(fetch("42")).await.map_err(anyhow::Error::msg)?;
    let result = cell.run(fetch("missing")).await;

    assert_eq!(result, Err("Not found".to_string()));
    let snapshot = cell.snapshot();
    assert_eq!(snapshot.error.as_deref(), Some("Not found"));
    assert_eq!(
        snapshot.data.as_ref().map(|a| a.name.as_str()),
        Some("Foo")
    );
    assert!(!snapshot.is_loading);

    Ok(())
}

#[tokio::test]
async fn missing_id_sends_nothing() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let cell = artist_cell();

    let result = cell
        .run_required(None::<ArtistId>, |id| {
            let client = app.client.clone();
            async move {
                client.get_artist(&id).await.map_err(|e| e.to_string())
            }
        })
        .await;

    assert!(result.is_none());
    assert_eq!(cell.snapshot().data, FetchState::NotFetched);
    assert_eq!(app.backend.request_count(), 0);

    Ok(())
}

#[tokio::test]
async fn loading_is_visible_while_the_backend_is_slow() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.insert_artist("42", "Foo");
    app.backend.set_latency(Duration::from_millis(200));
    let cell = artist_cell();

    let call = cell.run(async {
        app.client
            .get_artist(&ArtistId("42".into()))
            .await
            .map_err(|e| e.to_string())
    });
    let observe = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cell.is_loading()
    };
    let (result, loading_mid_flight) = tokio::join!(call, observe);

    assert!(loading_mid_flight);
    assert!(result.is_ok());
    assert!(!cell.is_loading());

    Ok(())
}

#[tokio::test]
async fn timeouts_surface_as_errors() -> anyhow::Result<()> {
    let app = spawn_app_with_timeout(Duration::from_millis(100)).await;
    app.insert_artist("42", "Foo");
    app.backend.set_latency(Duration::from_millis(500));
    let cell = artist_cell();

    let result = cell
        .run(async {
            app.client
                .get_artist(&ArtistId("42".into()))
                .await
                .map_err(|e| e.to_string())
        })
        .await;

    assert_eq!(
        result,
        Err("Network error. Please check your connection.".to_string())
    );
    assert!(!cell.is_loading());
    assert!(cell.with(|t| t.data() == &FetchState::NotFetched));

    Ok(())
}
