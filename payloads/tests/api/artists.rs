use payloads::{ArtistId, ClientError, requests};
use reqwest::StatusCode;

use test_helpers::{artist_details, assert_status_code, spawn_app};

#[tokio::test]
async fn get_artist_by_id() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.insert_artist("42", "Foo");

    let artist = app.client.get_artist(&ArtistId("42".into())).await?;
    assert_eq!(artist.name, "Foo");

    Ok(())
}

#[tokio::test]
async fn owner_manages_artists() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let auth = app.login_owner().await?;

    let created = app.client.create_artist(&auth, &artist_details()).await?;
    assert_eq!(created.name, "Night Shift");

    let update = requests::UpdateArtist {
        genre: Some("House".into()),
        ..Default::default()
    };
    let updated = app
        .client
        .update_artist(&auth, &created.artist_id, &update)
        .await?;
    assert_eq!(updated.genre.as_deref(), Some("House"));
    assert_eq!(updated.name, created.name);

    let listed = app.client.list_artists().await?;
    assert_eq!(listed, vec![updated]);

    app.client.delete_artist(&auth, &created.artist_id).await?;
    let result = app.client.get_artist(&created.artist_id).await;
    assert_status_code(result, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn customers_cannot_create_artists() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let auth = app.login_customer().await?;

    let result = app.client.create_artist(&auth, &artist_details()).await;
    assert_status_code(result, StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn ids_are_escaped_in_paths() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.insert_artist("a b", "Spaced");

    let artist = app.client.get_artist(&ArtistId("a b".into())).await?;
    assert_eq!(artist.name, "Spaced");

    Ok(())
}

#[tokio::test]
async fn padded_ids_are_not_sent() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.insert_artist("42", "Foo");

    let result = app.client.get_artist(&ArtistId(" 42".into())).await;

    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert_eq!(app.backend.request_count(), 0);

    Ok(())
}
