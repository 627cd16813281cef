use actix_web::{HttpResponse, get, web};
use payloads::{NewsId, requests};

use super::{APIError, FakeBackend};

#[tracing::instrument(skip(backend))]
#[get("/news")]
pub async fn list_news(
    page: web::Query<requests::Page>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    Ok(HttpResponse::Ok().json(backend.store().list_news(&page)))
}

#[tracing::instrument(skip(backend))]
#[get("/news/{news_id}")]
pub async fn get_news_article(
    news_id: web::Path<NewsId>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let article = backend.store().get_news_article(&news_id)?;
    Ok(HttpResponse::Ok().json(article))
}
