use crate::{
    ArtistId, AuthContext, ClientConfig, NewsId, PartyId, VenueId, requests,
    responses,
};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use std::time::Duration;

type ClientResult<T> = Result<T, ClientError>;

/// An API client for interfacing with the backend.
///
/// Holds no credentials; authenticated calls take an [`AuthContext`].
#[derive(Debug, Clone)]
pub struct APIClient {
    pub address: String,
    pub timeout: Duration,
    pub inner_client: reqwest::Client,
}

impl APIClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Use a preconfigured reqwest client, e.g. one with a custom redirect
    /// policy in tests.
    pub fn with_client(
        config: &ClientConfig,
        inner_client: reqwest::Client,
    ) -> Self {
        Self {
            address: config.address.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            inner_client,
        }
    }
}

/// Helper methods for http actions
impl APIClient {
    /// Build `{address}/api/{segments...}`, percent-encoding each segment.
    fn format_url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = Url::parse(&self.address).map_err(|e| {
            ClientError::Validation(format!(
                "Invalid backend address {}: {e}",
                self.address
            ))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::Validation(format!(
                    "Backend address {} cannot have a path",
                    self.address
                ))
            })?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        auth: Option<&AuthContext>,
    ) -> ClientResult<RequestBuilder> {
        let url = self.format_url(segments)?;
        tracing::debug!(%method, %url, authenticated = auth.is_some(), "API request");
        let mut request = self.inner_client.request(method, url);

        // the wasm client has no per-request timeout
        #[cfg(not(target_arch = "wasm32"))]
        {
            request = request.timeout(self.timeout);
        }

        if let Some(auth) = auth {
            request = request.header(AUTHORIZATION, auth.bearer());
        }
        Ok(request)
    }

    async fn get(
        &self,
        segments: &[&str],
        auth: Option<&AuthContext>,
    ) -> ClientResult<reqwest::Response> {
        let request = self.request(Method::GET, segments, auth)?;
        Ok(request.send().await?)
    }

    async fn get_with_query(
        &self,
        segments: &[&str],
        query: &impl Serialize,
    ) -> ClientResult<reqwest::Response> {
        let request = self.request(Method::GET, segments, None)?.query(query);
        Ok(request.send().await?)
    }

    async fn post(
        &self,
        segments: &[&str],
        body: &impl Serialize,
        auth: Option<&AuthContext>,
    ) -> ClientResult<reqwest::Response> {
        let request = self.request(Method::POST, segments, auth)?.json(body);
        Ok(request.send().await?)
    }

    async fn put(
        &self,
        segments: &[&str],
        body: &impl Serialize,
        auth: &AuthContext,
    ) -> ClientResult<reqwest::Response> {
        let request =
            self.request(Method::PUT, segments, Some(auth))?.json(body);
        Ok(request.send().await?)
    }

    async fn delete(
        &self,
        segments: &[&str],
        auth: &AuthContext,
    ) -> ClientResult<reqwest::Response> {
        let request = self.request(Method::DELETE, segments, Some(auth))?;
        Ok(request.send().await?)
    }
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.get(&["health_check"], None).await?;
        ok_empty(response).await
    }

    /// Log in, returning the credentials to pass to authenticated calls.
    pub async fn login(
        &self,
        details: &requests::LoginCredentials,
    ) -> Result<(AuthContext, responses::UserProfile), ClientError> {
        details.validate().map_err(ClientError::Validation)?;
        let response = self.post(&["auth", "login"], details, None).await?;
        let session: responses::LoginSession = ok_body(response).await?;
        let auth = AuthContext::new(session.user.user_id.clone(), session.token);
        Ok((auth, session.user))
    }

    pub async fn create_account(
        &self,
        details: &requests::CreateAccount,
    ) -> Result<responses::UserProfile, ClientError> {
        details.validate().map_err(ClientError::Validation)?;
        let response = self.post(&["auth", "register"], details, None).await?;
        ok_body(response).await
    }

    /// Get the profile of the logged in user.
    pub async fn current_user(
        &self,
        auth: &AuthContext,
    ) -> Result<responses::UserProfile, ClientError> {
        let response = self.get(&["users", "me"], Some(auth)).await?;
        ok_body(response).await
    }

    pub async fn list_artists(
        &self,
    ) -> Result<Vec<responses::Artist>, ClientError> {
        let response = self.get(&["artists"], None).await?;
        ok_body(response).await
    }

    pub async fn get_artist(
        &self,
        artist_id: &ArtistId,
    ) -> Result<responses::Artist, ClientError> {
        let id = require_id("artist", &artist_id.0)?;
        let response = self.get(&["artists", id], None).await?;
        ok_body(response).await
    }

    pub async fn create_artist(
        &self,
        auth: &AuthContext,
        details: &requests::CreateArtist,
    ) -> Result<responses::Artist, ClientError> {
        details.validate().map_err(ClientError::Validation)?;
        let response = self.post(&["artists"], details, Some(auth)).await?;
        ok_body(response).await
    }

    pub async fn update_artist(
        &self,
        auth: &AuthContext,
        artist_id: &ArtistId,
        details: &requests::UpdateArtist,
    ) -> Result<responses::Artist, ClientError> {
        let id = require_id("artist", &artist_id.0)?;
        details.validate().map_err(ClientError::Validation)?;
        let response = self.put(&["artists", id], details, auth).await?;
        ok_body(response).await
    }

    pub async fn delete_artist(
        &self,
        auth: &AuthContext,
        artist_id: &ArtistId,
    ) -> Result<(), ClientError> {
        let id = require_id("artist", &artist_id.0)?;
        let response = self.delete(&["artists", id], auth).await?;
        ok_empty(response).await
    }

    /// List parties, optionally filtered by city, artist or venue.
    pub async fn list_parties(
        &self,
        filter: &requests::PartyFilter,
    ) -> Result<Vec<responses::Party>, ClientError> {
        let response = self.get_with_query(&["parties"], filter).await?;
        ok_body(response).await
    }

    pub async fn get_party(
        &self,
        party_id: &PartyId,
    ) -> Result<responses::Party, ClientError> {
        let id = require_id("party", &party_id.0)?;
        let response = self.get(&["parties", id], None).await?;
        ok_body(response).await
    }

    /// Create a party at one of the caller's venues (owner only).
    pub async fn create_party(
        &self,
        auth: &AuthContext,
        details: &requests::CreateParty,
    ) -> Result<responses::Party, ClientError> {
        require_id("venue", &details.venue_id.0)?;
        details.validate().map_err(ClientError::Validation)?;
        let response = self.post(&["parties"], details, Some(auth)).await?;
        ok_body(response).await
    }

    pub async fn update_party(
        &self,
        auth: &AuthContext,
        party_id: &PartyId,
        details: &requests::UpdateParty,
    ) -> Result<responses::Party, ClientError> {
        let id = require_id("party", &party_id.0)?;
        details.validate().map_err(ClientError::Validation)?;
        let response = self.put(&["parties", id], details, auth).await?;
        ok_body(response).await
    }

    pub async fn delete_party(
        &self,
        auth: &AuthContext,
        party_id: &PartyId,
    ) -> Result<(), ClientError> {
        let id = require_id("party", &party_id.0)?;
        let response = self.delete(&["parties", id], auth).await?;
        ok_empty(response).await
    }

    pub async fn list_ticket_types(
        &self,
        party_id: &PartyId,
    ) -> Result<Vec<responses::TicketType>, ClientError> {
        let id = require_id("party", &party_id.0)?;
        let response = self.get(&["parties", id, "ticket_types"], None).await?;
        ok_body(response).await
    }

    /// Newest articles first.
    pub async fn list_news(
        &self,
        page: &requests::Page,
    ) -> Result<Vec<responses::NewsArticle>, ClientError> {
        let response = self.get_with_query(&["news"], page).await?;
        ok_body(response).await
    }

    pub async fn get_news_article(
        &self,
        news_id: &NewsId,
    ) -> Result<responses::NewsArticle, ClientError> {
        let id = require_id("news article", &news_id.0)?;
        let response = self.get(&["news", id], None).await?;
        ok_body(response).await
    }

    pub async fn list_venues(
        &self,
    ) -> Result<Vec<responses::Venue>, ClientError> {
        let response = self.get(&["venues"], None).await?;
        ok_body(response).await
    }

    pub async fn get_venue(
        &self,
        venue_id: &VenueId,
    ) -> Result<responses::Venue, ClientError> {
        let id = require_id("venue", &venue_id.0)?;
        let response = self.get(&["venues", id], None).await?;
        ok_body(response).await
    }

    /// Register a venue owned by the caller (owner only).
    pub async fn create_venue(
        &self,
        auth: &AuthContext,
        details: &requests::CreateVenue,
    ) -> Result<responses::Venue, ClientError> {
        details.validate().map_err(ClientError::Validation)?;
        let response = self.post(&["venues"], details, Some(auth)).await?;
        ok_body(response).await
    }

    pub async fn update_venue(
        &self,
        auth: &AuthContext,
        venue_id: &VenueId,
        details: &requests::UpdateVenue,
    ) -> Result<responses::Venue, ClientError> {
        let id = require_id("venue", &venue_id.0)?;
        details.validate().map_err(ClientError::Validation)?;
        let response = self.put(&["venues", id], details, auth).await?;
        ok_body(response).await
    }

    pub async fn owner_profile(
        &self,
        auth: &AuthContext,
    ) -> Result<responses::OwnerProfile, ClientError> {
        let response = self.get(&["owners", "me"], Some(auth)).await?;
        ok_body(response).await
    }

    /// Parties at the caller's venues, including drafts.
    pub async fn owner_parties(
        &self,
        auth: &AuthContext,
    ) -> Result<Vec<responses::Party>, ClientError> {
        let response =
            self.get(&["owners", "me", "parties"], Some(auth)).await?;
        ok_body(response).await
    }

    pub async fn purchase_tickets(
        &self,
        auth: &AuthContext,
        details: &requests::PurchaseTickets,
    ) -> Result<responses::Purchase, ClientError> {
        require_id("party", &details.party_id.0)?;
        require_id("ticket type", &details.ticket_type_id.0)?;
        details.validate().map_err(ClientError::Validation)?;
        let response = self
            .post(&["tickets", "purchase"], details, Some(auth))
            .await?;
        ok_body(response).await
    }

    /// Tickets held by the caller.
    pub async fn my_tickets(
        &self,
        auth: &AuthContext,
    ) -> Result<Vec<responses::Ticket>, ClientError> {
        let response = self.get(&["tickets", "mine"], Some(auth)).await?;
        ok_body(response).await
    }

    /// Check a scanned QR code at the door (owner or staff only).
    ///
    /// A successful call does not mean admission; inspect the returned
    /// outcome.
    pub async fn scan_ticket(
        &self,
        auth: &AuthContext,
        details: &requests::ScanTicket,
    ) -> Result<responses::ScanResult, ClientError> {
        require_id("party", &details.party_id.0)?;
        details.validate().map_err(ClientError::Validation)?;
        let response =
            self.post(&["tickets", "scan"], details, Some(auth)).await?;
        ok_body(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing the best message the
    /// response offered.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
    /// The request was not sent because its inputs were invalid.
    #[error("{0}")]
    Validation(String),
}

impl ClientError {
    /// HTTP status of the failed response, if the backend answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::APIError(status, _) => Some(*status),
            Self::Network(e) => e.status(),
            Self::Validation(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

/// Reject empty ids before they turn into a malformed path. Ids are opaque,
/// so surrounding whitespace is rejected rather than trimmed away.
fn require_id<'a>(resource: &str, id: &'a str) -> ClientResult<&'a str> {
    if id.trim().is_empty() {
        return Err(ClientError::Validation(format!("Missing {resource} id")));
    }
    if id.trim() != id {
        return Err(ClientError::Validation(format!("Invalid {resource} id")));
    }
    Ok(id)
}

/// Pick a human-readable message for a failed response.
///
/// Prefers the `title`, `message` or `error` field of a JSON body, then the
/// raw body text, then the status' canonical reason.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<responses::ErrorBody>(body)
        && let Some(message) = parsed.best_message()
    {
        return message.to_string();
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}

async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    match response.text().await {
        Ok(text) => {
            let message = error_message(status, &text);
            tracing::warn!(%status, %message, "API request failed");
            ClientError::APIError(status, message)
        }
        Err(e) => ClientError::Network(e),
    }
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(response.json::<T>().await?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(())
}
