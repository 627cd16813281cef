use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use payloads::{PartyId, requests};

use super::{APIError, FakeBackend, authenticated};

#[tracing::instrument(skip(backend))]
#[get("/parties")]
pub async fn list_parties(
    filter: web::Query<requests::PartyFilter>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let now = backend.now();
    let parties = backend.store().list_parties(&filter, now);
    Ok(HttpResponse::Ok().json(parties))
}

#[tracing::instrument(skip(backend))]
#[get("/parties/{party_id}")]
pub async fn get_party(
    party_id: web::Path<PartyId>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let party = backend.store().get_party(&party_id)?;
    Ok(HttpResponse::Ok().json(party))
}

#[tracing::instrument(skip(backend))]
#[get("/parties/{party_id}/ticket_types")]
pub async fn list_ticket_types(
    party_id: web::Path<PartyId>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let ticket_types = backend.store().list_ticket_types(&party_id)?;
    Ok(HttpResponse::Ok().json(ticket_types))
}

#[tracing::instrument(
    skip(request, details, backend),
    fields(user_id = tracing::field::Empty)
)]
#[post("/parties")]
pub async fn create_party(
    request: HttpRequest,
    details: web::Json<requests::CreateParty>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let user = authenticated(&request, &backend)?;
    let party = backend.store().create_party(&user, &details)?;
    Ok(HttpResponse::Ok().json(party))
}

#[tracing::instrument(
    skip(request, details, backend),
    fields(user_id = tracing::field::Empty)
)]
#[put("/parties/{party_id}")]
pub async fn update_party(
    request: HttpRequest,
    party_id: web::Path<PartyId>,
    details: web::Json<requests::UpdateParty>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let user = authenticated(&request, &backend)?;
    let party = backend.store().update_party(&user, &party_id, &details)?;
    Ok(HttpResponse::Ok().json(party))
}

#[tracing::instrument(
    skip(request, backend),
    fields(user_id = tracing::field::Empty)
)]
#[delete("/parties/{party_id}")]
pub async fn delete_party(
    request: HttpRequest,
    party_id: web::Path<PartyId>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let user = authenticated(&request, &backend)?;
    backend.store().delete_party(&user, &party_id)?;
    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(
    skip(request, backend),
    fields(user_id = tracing::field::Empty)
)]
#[get("/owners/me/parties")]
pub async fn owner_parties(
    request: HttpRequest,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let user = authenticated(&request, &backend)?;
    let parties = backend.store().owner_parties(&user)?;
    Ok(HttpResponse::Ok().json(parties))
}
