pub mod artist;
pub mod login;
pub mod news;
pub mod party;
pub mod ticket;
pub mod venue;

use actix_web::{
    HttpRequest, HttpResponse, Responder, dev::HttpServiceFactory, get,
    http::header, web,
};
use payloads::responses::UserProfile;

use super::{APIError, FakeBackend};

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api")
        .service(health_check)
        .service(login::login)
        .service(login::register)
        .service(login::current_user)
        .service(artist::list_artists)
        .service(artist::create_artist)
        .service(artist::get_artist)
        .service(artist::update_artist)
        .service(artist::delete_artist)
        .service(party::list_parties)
        .service(party::create_party)
        .service(party::get_party)
        .service(party::update_party)
        .service(party::delete_party)
        .service(party::list_ticket_types)
        .service(party::owner_parties)
        .service(news::list_news)
        .service(news::get_news_article)
        .service(venue::list_venues)
        .service(venue::create_venue)
        .service(venue::get_venue)
        .service(venue::update_venue)
        .service(venue::owner_profile)
        .service(ticket::purchase_tickets)
        .service(ticket::my_tickets)
        .service(ticket::scan_ticket)
}

#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("healthy")
}

/// Resolve the bearer token on the request to a logged in user.
fn authenticated(
    request: &HttpRequest,
    backend: &FakeBackend,
) -> Result<UserProfile, APIError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| {
            APIError::Unauthorized(anyhow::anyhow!("Missing bearer token"))
        })?;
    let user = backend.store().user_for_token(token)?;
    tracing::Span::current()
        .record("user_id", tracing::field::display(&user.user_id));
    Ok(user)
}
