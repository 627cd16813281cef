use payloads::{NewsId, requests::Page, responses::NewsArticle};
use yew::prelude::*;

use super::{FetchHookReturn, use_fetch, use_fetch_required};
use crate::get_api_client;

/// One page of news, newest first.
#[hook]
pub fn use_news(page: Page) -> FetchHookReturn<Vec<NewsArticle>> {
    use_fetch(page, move || async move {
        get_api_client().list_news(&page).await
    })
}

#[hook]
pub fn use_news_article(
    news_id: Option<NewsId>,
) -> FetchHookReturn<NewsArticle> {
    use_fetch_required(news_id, |news_id| async move {
        get_api_client().get_news_article(&news_id).await
    })
}
