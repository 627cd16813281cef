use actix_web::{HttpRequest, HttpResponse, get, post, web};
use payloads::requests;

use super::{APIError, FakeBackend, authenticated};

#[tracing::instrument(
    skip(request, backend),
    fields(user_id = tracing::field::Empty)
)]
#[post("/tickets/purchase")]
pub async fn purchase_tickets(
    request: HttpRequest,
    details: web::Json<requests::PurchaseTickets>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let user = authenticated(&request, &backend)?;
    let now = backend.now();
    let purchase = backend.store().purchase_tickets(&user, &details, now)?;
    Ok(HttpResponse::Ok().json(purchase))
}

#[tracing::instrument(
    skip(request, backend),
    fields(user_id = tracing::field::Empty)
)]
#[get("/tickets/mine")]
pub async fn my_tickets(
    request: HttpRequest,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let user = authenticated(&request, &backend)?;
    Ok(HttpResponse::Ok().json(backend.store().tickets_for(&user)))
}

#[tracing::instrument(
    skip(request, backend),
    fields(user_id = tracing::field::Empty)
)]
#[post("/tickets/scan")]
pub async fn scan_ticket(
    request: HttpRequest,
    details: web::Json<requests::ScanTicket>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let user = authenticated(&request, &backend)?;
    let now = backend.now();
    let result = backend.store().scan_ticket(&user, &details, now)?;
    Ok(HttpResponse::Ok().json(result))
}
