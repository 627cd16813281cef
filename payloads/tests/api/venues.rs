use payloads::requests;
use reqwest::StatusCode;

use test_helpers::{assert_status_code, spawn_app, venue_details};

#[tokio::test]
async fn owner_creates_and_updates_venue() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let auth = app.login_owner().await?;

    let venue = app.create_test_venue(&auth).await?;
    let profile = app.client.owner_profile(&auth).await?;
    assert_eq!(profile.venue_ids, vec![venue.venue_id.clone()]);
    assert_eq!(venue.owner_id, profile.owner_id);

    let update = requests::UpdateVenue {
        capacity: Some(750),
        ..Default::default()
    };
    let updated = app
        .client
        .update_venue(&auth, &venue.venue_id, &update)
        .await?;
    assert_eq!(updated.capacity, 750);
    assert_eq!(updated.name, venue.name);

    let fetched = app.client.get_venue(&venue.venue_id).await?;
    assert_eq!(fetched, updated);
    assert_eq!(app.client.list_venues().await?, vec![updated]);

    Ok(())
}

#[tokio::test]
async fn staff_have_no_owner_profile() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let auth = app.login_staff().await?;

    let result = app.client.owner_profile(&auth).await;
    assert_status_code(result, StatusCode::FORBIDDEN);

    let result = app.client.create_venue(&auth, &venue_details()).await;
    assert_status_code(result, StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn zero_capacity_is_not_sent() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let auth = app.login_owner().await?;
    let sent = app.backend.request_count();

    let mut details = venue_details();
    details.capacity = 0;
    let result = app.client.create_venue(&auth, &details).await;

    assert!(matches!(result, Err(payloads::ClientError::Validation(_))));
    assert_eq!(app.backend.request_count(), sent);

    Ok(())
}
