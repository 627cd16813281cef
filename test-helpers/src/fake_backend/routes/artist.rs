use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use payloads::{ArtistId, requests};

use super::{APIError, FakeBackend, authenticated};

#[tracing::instrument(skip(backend))]
#[get("/artists")]
pub async fn list_artists(
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    Ok(HttpResponse::Ok().json(backend.store().list_artists()))
}

#[tracing::instrument(skip(backend))]
#[get("/artists/{artist_id}")]
pub async fn get_artist(
    artist_id: web::Path<ArtistId>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let artist = backend.store().get_artist(&artist_id)?;
    Ok(HttpResponse::Ok().json(artist))
}

#[tracing::instrument(
    skip(request, details, backend),
    fields(user_id = tracing::field::Empty)
)]
#[post("/artists")]
pub async fn create_artist(
    request: HttpRequest,
    details: web::Json<requests::CreateArtist>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let user = authenticated(&request, &backend)?;
    let now = backend.now();
    let artist = backend.store().create_artist(&user, &details, now)?;
    Ok(HttpResponse::Ok().json(artist))
}

#[tracing::instrument(
    skip(request, details, backend),
    fields(user_id = tracing::field::Empty)
)]
#[put("/artists/{artist_id}")]
pub async fn update_artist(
    request: HttpRequest,
    artist_id: web::Path<ArtistId>,
    details: web::Json<requests::UpdateArtist>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let user = authenticated(&request, &backend)?;
    let artist = backend.store().update_artist(&user, &artist_id, &details)?;
    Ok(HttpResponse::Ok().json(artist))
}

#[tracing::instrument(
    skip(request, backend),
    fields(user_id = tracing::field::Empty)
)]
#[delete("/artists/{artist_id}")]
pub async fn delete_artist(
    request: HttpRequest,
    artist_id: web::Path<ArtistId>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let user = authenticated(&request, &backend)?;
    backend.store().delete_artist(&user, &artist_id)?;
    Ok(HttpResponse::Ok().finish())
}
