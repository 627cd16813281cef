use jiff::ToSpan;
use payloads::{ClientError, PartyStatus, requests};
use reqwest::StatusCode;

use test_helpers::{
    artist_details, assert_status_code, party_details, spawn_app,
};

#[tokio::test]
async fn published_party_is_listed() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let auth = app.login_owner().await?;

    let party = app.create_published_party(&auth).await?;
    assert_eq!(party.status, PartyStatus::Published);

    let all = app.client.list_parties(&Default::default()).await?;
    assert_eq!(all, vec![party.clone()]);

    let fetched = app.client.get_party(&party.party_id).await?;
    assert_eq!(fetched, party);

    let ticket_types = app.client.list_ticket_types(&party.party_id).await?;
    assert_eq!(ticket_types.len(), 1);
    assert_eq!(ticket_types[0].remaining, 100);
    assert!(!ticket_types[0].is_sold_out());

    Ok(())
}

#[tokio::test]
async fn drafts_are_only_visible_to_their_owner() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let auth = app.login_owner().await?;
    let venue = app.create_test_venue(&auth).await?;

    let draft = app
        .client
        .create_party(&auth, &party_details(&venue.venue_id, vec![]))
        .await?;
    assert_eq!(draft.status, PartyStatus::Draft);

    assert!(app.client.list_parties(&Default::default()).await?.is_empty());
    assert_eq!(app.client.owner_parties(&auth).await?, vec![draft]);

    Ok(())
}

#[tokio::test]
async fn filters_narrow_the_listing() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let auth = app.login_owner().await?;
    let party = app.create_published_party(&auth).await?;
    let other_artist =
        app.client.create_artist(&auth, &artist_details()).await?;

    let by_city = requests::PartyFilter {
        city: Some("berlin".into()),
        upcoming_only: true,
        ..Default::default()
    };
    assert_eq!(app.client.list_parties(&by_city).await?, vec![party.clone()]);

    let elsewhere = requests::PartyFilter {
        city: Some("Lisbon".into()),
        ..Default::default()
    };
    assert!(app.client.list_parties(&elsewhere).await?.is_empty());

    let by_artist = requests::PartyFilter {
        artist_id: Some(party.artist_ids[0].clone()),
        ..Default::default()
    };
    assert_eq!(app.client.list_parties(&by_artist).await?, vec![party]);

    let not_playing = requests::PartyFilter {
        artist_id: Some(other_artist.artist_id),
        ..Default::default()
    };
    assert!(app.client.list_parties(&not_playing).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn owner_updates_and_deletes_party() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let auth = app.login_owner().await?;
    let party = app.create_published_party(&auth).await?;

    let update = requests::UpdateParty {
        title: Some("Closing party".into()),
        ..Default::default()
    };
    let updated = app
        .client
        .update_party(&auth, &party.party_id, &update)
        .await?;
    assert_eq!(updated.title, "Closing party");
    assert_eq!(updated.starts_at, party.starts_at);

    app.client.delete_party(&auth, &party.party_id).await?;
    let result = app.client.get_party(&party.party_id).await;
    assert_status_code(result, StatusCode::NOT_FOUND);

    let result = app.client.list_ticket_types(&party.party_id).await;
    assert_status_code(result, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn customers_cannot_change_parties() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let owner = app.login_owner().await?;
    let party = app.create_published_party(&owner).await?;
    let customer = app.login_customer().await?;

    let result = app.client.delete_party(&customer, &party.party_id).await;
    assert_status_code(result, StatusCode::FORBIDDEN);

    let result = app.client.owner_parties(&customer).await;
    assert_status_code(result, StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn party_ending_before_it_starts_is_not_sent() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let auth = app.login_owner().await?;
    let venue = app.create_test_venue(&auth).await?;
    let sent = app.backend.request_count();

    let mut details = party_details(&venue.venue_id, vec![]);
    details.ends_at = Some(details.starts_at - 1.hour());
    let result = app.client.create_party(&auth, &details).await;

    match result {
        Err(ClientError::Validation(message)) => {
            assert_eq!(message, "A party must end after it starts")
        }
        _ => panic!("Expected a validation error"),
    }
    assert_eq!(app.backend.request_count(), sent);

    Ok(())
}
