use actix_web::{HttpRequest, HttpResponse, get, post, put, web};
use payloads::{VenueId, requests};

use super::{APIError, FakeBackend, authenticated};

#[tracing::instrument(skip(backend))]
#[get("/venues")]
pub async fn list_venues(
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    Ok(HttpResponse::Ok().json(backend.store().list_venues()))
}

#[tracing::instrument(skip(backend))]
#[get("/venues/{venue_id}")]
pub async fn get_venue(
    venue_id: web::Path<VenueId>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let venue = backend.store().get_venue(&venue_id)?;
    Ok(HttpResponse::Ok().json(venue))
}

#[tracing::instrument(
    skip(request, details, backend),
    fields(user_id = tracing::field::Empty)
)]
#[post("/venues")]
pub async fn create_venue(
    request: HttpRequest,
    details: web::Json<requests::CreateVenue>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let user = authenticated(&request, &backend)?;
    let venue = backend.store().create_venue(&user, &details)?;
    Ok(HttpResponse::Ok().json(venue))
}

#[tracing::instrument(
    skip(request, details, backend),
    fields(user_id = tracing::field::Empty)
)]
#[put("/venues/{venue_id}")]
pub async fn update_venue(
    request: HttpRequest,
    venue_id: web::Path<VenueId>,
    details: web::Json<requests::UpdateVenue>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let user = authenticated(&request, &backend)?;
    let venue = backend.store().update_venue(&user, &venue_id, &details)?;
    Ok(HttpResponse::Ok().json(venue))
}

#[tracing::instrument(
    skip(request, backend),
    fields(user_id = tracing::field::Empty)
)]
#[get("/owners/me")]
pub async fn owner_profile(
    request: HttpRequest,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let user = authenticated(&request, &backend)?;
    let profile = backend.store().owner_profile(&user)?;
    Ok(HttpResponse::Ok().json(profile))
}
