use jiff::Timestamp;
use payloads::{NewsId, requests};
use reqwest::StatusCode;

use test_helpers::{assert_status_code, spawn_app};

#[tokio::test]
async fn news_is_newest_first_and_paged() -> anyhow::Result<()> {
    let app = spawn_app().await;
    for (id, day) in [("n1", 1), ("n2", 2), ("n3", 3)] {
        let published_at: Timestamp =
            format!("2025-01-0{day}T12:00:00Z").parse()?;
        app.insert_news(id, &format!("Story {day}"), published_at);
    }

    let page = requests::Page {
        limit: 2,
        offset: 0,
    };
    let first = app.client.list_news(&page).await?;
    let ids: Vec<_> = first.iter().map(|a| a.news_id.0.as_str()).collect();
    assert_eq!(ids, ["n3", "n2"]);

    let second = app.client.list_news(&page.next()).await?;
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].news_id, NewsId("n1".into()));

    Ok(())
}

#[tokio::test]
async fn single_article() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.insert_news("n1", "Opening night", Timestamp::UNIX_EPOCH);

    let article = app.client.get_news_article(&NewsId("n1".into())).await?;
    assert_eq!(article.title, "Opening night");

    let result = app.client.get_news_article(&NewsId("n9".into())).await;
    assert_status_code(result, StatusCode::NOT_FOUND);

    Ok(())
}
