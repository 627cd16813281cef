mod artists;
mod errors;
mod login;
mod news;
mod parties;
mod request_lifecycle;
mod tickets;
mod venues;

use payloads::ClientConfig;
use test_helpers::spawn_app;

#[tokio::test]
async fn health_check() -> anyhow::Result<()> {
    let app = spawn_app().await;

    app.client.health_check().await?;

    Ok(())
}

#[tokio::test]
async fn client_timeout_comes_from_the_environment() {
    let app = spawn_app().await;

    assert_eq!(app.client.timeout, ClientConfig::from_env().timeout);
    assert!(!app.client.timeout.is_zero());
}
