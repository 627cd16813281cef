pub mod fake_backend;
pub mod telemetry;

use fake_backend::FakeBackend;
use jiff::{Timestamp, ToSpan};
use payloads::{
    APIClient, ArtistId, AuthContext, ClientConfig, NewsId, PartyId,
    PartyStatus, Role, VenueId, requests, responses,
};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    pub backend: Arc<FakeBackend>,
    pub client: APIClient,
}

/// Accounts and sessions
impl TestApp {
    /// Create the owner (through the store, owners can't self-register),
    /// the staff member and the customer.
    pub async fn seed_users(&self) -> anyhow::Result<()> {
        {
            let mut store = self.backend.store();
            for (credentials, name, role) in [
                (owner_credentials(), "Olivia", Role::Owner),
                (staff_credentials(), "Sam", Role::Staff),
            ] {
                store.insert_user(
                    &credentials.email,
                    name,
                    &credentials.password,
                    role,
                );
            }
        }
        self.client.create_account(&customer_account()).await?;
        Ok(())
    }

    pub async fn login_owner(&self) -> anyhow::Result<AuthContext> {
        let (auth, _) = self.client.login(&owner_credentials()).await?;
        Ok(auth)
    }

    pub async fn login_staff(&self) -> anyhow::Result<AuthContext> {
        let (auth, _) = self.client.login(&staff_credentials()).await?;
        Ok(auth)
    }

    pub async fn login_customer(&self) -> anyhow::Result<AuthContext> {
        let (auth, _) = self.client.login(&customer_credentials()).await?;
        Ok(auth)
    }
}

/// Catalogue fixtures
impl TestApp {
    /// Put an artist with a chosen id straight into the store.
    pub fn insert_artist(&self, artist_id: &str, name: &str) {
        self.backend.store().insert_artist(artist_with_id(artist_id, name));
    }

    /// Put a news article with a chosen id straight into the store.
    pub fn insert_news(
        &self,
        news_id: &str,
        title: &str,
        published_at: Timestamp,
    ) {
        self.backend.store().insert_news(responses::NewsArticle {
            news_id: NewsId(news_id.to_string()),
            title: title.to_string(),
            summary: format!("{title} in brief"),
            body: format!("All about {title}."),
            published_at,
            party_id: None,
        });
    }

    pub async fn create_test_venue(
        &self,
        auth: &AuthContext,
    ) -> anyhow::Result<responses::Venue> {
        Ok(self.client.create_venue(auth, &venue_details()).await?)
    }

    /// Create a venue and an artist, then a published party at the venue
    /// featuring the artist, a week from now.
    pub async fn create_published_party(
        &self,
        auth: &AuthContext,
    ) -> anyhow::Result<responses::Party> {
        let venue = self.create_test_venue(auth).await?;
        let artist = self.client.create_artist(auth, &artist_details()).await?;
        let party = self
            .client
            .create_party(
                auth,
                &party_details(&venue.venue_id, vec![artist.artist_id]),
            )
            .await?;
        let published = self
            .client
            .update_party(
                auth,
                &party.party_id,
                &requests::UpdateParty {
                    status: Some(PartyStatus::Published),
                    ..Default::default()
                },
            )
            .await?;
        Ok(published)
    }

    /// Buy tickets of the first ticket type of a party.
    pub async fn buy_tickets(
        &self,
        auth: &AuthContext,
        party_id: &PartyId,
        quantity: u32,
    ) -> anyhow::Result<responses::Purchase> {
        let ticket_types = self.client.list_ticket_types(party_id).await?;
        let ticket_type = ticket_types
            .first()
            .ok_or_else(|| anyhow::anyhow!("party has no ticket types"))?;
        let purchase = self
            .client
            .purchase_tickets(
                auth,
                &requests::PurchaseTickets {
                    party_id: party_id.clone(),
                    ticket_type_id: ticket_type.ticket_type_id.clone(),
                    quantity,
                },
            )
            .await?;
        Ok(purchase)
    }
}

/// Build the fake backend and a client pointed at it.
pub async fn spawn_app_with_timeout(timeout: Duration) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    telemetry::init_subscriber(subscriber);

    // OS-assigned port for parallel testing
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let backend = Arc::new(FakeBackend::default());
    let server = fake_backend::build(listener, backend.clone()).unwrap();
    tokio::spawn(server);

    let inner_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let config = ClientConfig::new(format!("http://127.0.0.1:{port}"))
        .with_timeout(timeout);

    TestApp {
        port,
        backend,
        client: APIClient::with_client(&config, inner_client),
    }
}

/// Build the fake backend with the request timeout from the environment
/// (BACKEND_TIMEOUT_SECS, or a .env file), 30 seconds when unset.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_timeout(ClientConfig::from_env().timeout).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}

pub fn owner_credentials() -> requests::LoginCredentials {
    requests::LoginCredentials {
        email: "olivia@example.com".into(),
        password: "olivias-password".into(),
    }
}

pub fn staff_credentials() -> requests::LoginCredentials {
    requests::LoginCredentials {
        email: "sam@example.com".into(),
        password: "sams-password".into(),
    }
}

pub fn customer_account() -> requests::CreateAccount {
    requests::CreateAccount {
        email: "carla@example.com".into(),
        name: "Carla".into(),
        password: "carlas-password".into(),
    }
}

pub fn customer_credentials() -> requests::LoginCredentials {
    let account = customer_account();
    requests::LoginCredentials {
        email: account.email,
        password: account.password,
    }
}

pub fn artist_with_id(artist_id: &str, name: &str) -> responses::Artist {
    responses::Artist {
        artist_id: ArtistId(artist_id.to_string()),
        name: name.to_string(),
        genre: None,
        bio: None,
        image_url: None,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub fn artist_details() -> requests::CreateArtist {
    requests::CreateArtist {
        name: "Night Shift".into(),
        genre: Some("Techno".into()),
        bio: Some("Resident DJ duo".into()),
        image_url: None,
    }
}

pub fn venue_details() -> requests::CreateVenue {
    requests::CreateVenue {
        name: "The Warehouse".into(),
        address: "1 Dock Road".into(),
        city: "Berlin".into(),
        capacity: 500,
    }
}

pub fn party_details(
    venue_id: &VenueId,
    artist_ids: Vec<ArtistId>,
) -> requests::CreateParty {
    let starts_at = Timestamp::now() + 168.hours();
    requests::CreateParty {
        venue_id: venue_id.clone(),
        title: "Warehouse Rave".into(),
        description: Some("All night long".into()),
        starts_at,
        ends_at: Some(starts_at + 8.hours()),
        artist_ids,
        cover_image_url: None,
        ticket_types: vec![requests::NewTicketType {
            name: "General admission".into(),
            price: Decimal::new(2500, 2),
            currency: "EUR".into(),
            quantity: 100,
        }],
    }
}
