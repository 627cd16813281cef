use actix_web::{HttpRequest, HttpResponse, get, post, web};
use payloads::requests;

use super::{APIError, FakeBackend, authenticated};

#[tracing::instrument(
    skip(credentials, backend),
    fields(email = %credentials.email)
)]
#[post("/auth/login")]
pub async fn login(
    credentials: web::Json<requests::LoginCredentials>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let session = backend.store().login(&credentials)?;
    Ok(HttpResponse::Ok().json(session))
}

#[tracing::instrument(skip(details, backend))]
#[post("/auth/register")]
pub async fn register(
    details: web::Json<requests::CreateAccount>,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let profile = backend.store().register(&details)?;
    Ok(HttpResponse::Ok().json(profile))
}

#[tracing::instrument(
    skip(request, backend),
    fields(user_id = tracing::field::Empty)
)]
#[get("/users/me")]
pub async fn current_user(
    request: HttpRequest,
    backend: web::Data<FakeBackend>,
) -> Result<HttpResponse, APIError> {
    let user = authenticated(&request, &backend)?;
    Ok(HttpResponse::Ok().json(user))
}
