use payloads::{APIClient, ArtistId, ClientConfig, ClientError};
use reqwest::StatusCode;
use std::time::Duration;

use test_helpers::{spawn_app, spawn_app_with_timeout};

#[tokio::test]
async fn plain_text_errors_are_passed_through() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend.set_outage(true);

    let result = app.client.list_artists().await;

    match result {
        Err(ClientError::APIError(code, text)) => {
            assert_eq!(code, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(text, "Something went wrong");
        }
        _ => panic!("Expected APIError"),
    }

    app.backend.set_outage(false);
    app.client.list_artists().await?;

    Ok(())
}

#[tokio::test]
async fn forbidden_uses_the_error_field() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let auth = app.login_customer().await?;

    let result = app.client.owner_profile(&auth).await;

    match result {
        Err(ClientError::APIError(code, text)) => {
            assert_eq!(code, StatusCode::FORBIDDEN);
            assert_eq!(text, "Your account is not allowed to do that");
        }
        _ => panic!("Expected APIError"),
    }

    Ok(())
}

#[tokio::test]
async fn slow_responses_time_out() -> anyhow::Result<()> {
    let app = spawn_app_with_timeout(Duration::from_millis(100)).await;
    app.backend.set_latency(Duration::from_millis(500));

    let result = app.client.list_artists().await;

    match result {
        Err(ClientError::Network(e)) => assert!(e.is_timeout()),
        _ => panic!("Expected a network error"),
    }

    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // nothing listens on the discard port
    let client = APIClient::new(&ClientConfig::new("http://127.0.0.1:9"));

    let result = client.health_check().await;

    assert!(matches!(result, Err(ClientError::Network(_))));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Network error. Please check your connection."
    );
}

#[tokio::test]
async fn empty_ids_are_not_sent() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app.client.get_artist(&ArtistId(" ".into())).await;

    match result {
        Err(ClientError::Validation(message)) => {
            assert_eq!(message, "Missing artist id")
        }
        _ => panic!("Expected a validation error"),
    }
    assert_eq!(app.backend.request_count(), 0);

    Ok(())
}
