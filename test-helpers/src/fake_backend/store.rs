//! In-memory state of the fake backend.
//!
//! Maps are ordered so listings come back in a stable order. Ids are random
//! UUID strings unless a test inserts a record with a chosen id.

use jiff::Timestamp;
use payloads::{
    ArtistId, NewsId, OwnerId, PartyId, PartyStatus, PurchaseId, Role,
    ScanOutcome, TicketId, TicketStatus, TicketTypeId, UserId, VenueId,
    requests, responses,
};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Invalid or expired session")]
    InvalidSession,
    #[error("An account with this email already exists")]
    EmailTaken,
    #[error("Your account is not allowed to do that")]
    NotPermitted,
    #[error("Artist not found")]
    ArtistNotFound,
    #[error("Party not found")]
    PartyNotFound,
    #[error("Venue not found")]
    VenueNotFound,
    #[error("News article not found")]
    NewsNotFound,
    #[error("Ticket type not found")]
    TicketTypeNotFound,
    #[error("Party is not on sale")]
    NotOnSale,
    #[error("Only {0} tickets left")]
    InsufficientTickets(u32),
    #[error("{0}")]
    Invalid(String),
}

struct UserRecord {
    profile: responses::UserProfile,
    password: String,
}

#[derive(Default)]
pub struct Store {
    users: HashMap<UserId, UserRecord>,
    sessions: HashMap<String, UserId>,
    owners: HashMap<UserId, responses::OwnerProfile>,
    artists: BTreeMap<ArtistId, responses::Artist>,
    parties: BTreeMap<PartyId, responses::Party>,
    venues: BTreeMap<VenueId, responses::Venue>,
    news: BTreeMap<NewsId, responses::NewsArticle>,
    ticket_types: BTreeMap<TicketTypeId, responses::TicketType>,
    tickets: BTreeMap<TicketId, responses::Ticket>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Users, sessions and owner profiles.
impl Store {
    pub fn insert_user(
        &mut self,
        email: &str,
        name: &str,
        password: &str,
        role: Role,
    ) -> responses::UserProfile {
        let profile = responses::UserProfile {
            user_id: UserId(new_id()),
            email: email.to_string(),
            name: name.to_string(),
            role,
        };
        if role == Role::Owner {
            self.owners.insert(
                profile.user_id.clone(),
                responses::OwnerProfile {
                    owner_id: OwnerId(format!("owner-{}", profile.user_id)),
                    display_name: name.to_string(),
                    venue_ids: vec![],
                },
            );
        }
        self.users.insert(
            profile.user_id.clone(),
            UserRecord {
                profile: profile.clone(),
                password: password.to_string(),
            },
        );
        profile
    }

    pub fn register(
        &mut self,
        details: &requests::CreateAccount,
    ) -> Result<responses::UserProfile, StoreError> {
        details.validate().map_err(StoreError::Invalid)?;
        if self.users.values().any(|u| u.profile.email == details.email) {
            return Err(StoreError::EmailTaken);
        }
        Ok(self.insert_user(
            &details.email,
            &details.name,
            &details.password,
            Role::Customer,
        ))
    }

    pub fn login(
        &mut self,
        credentials: &requests::LoginCredentials,
    ) -> Result<responses::LoginSession, StoreError> {
        let user = self
            .users
            .values()
            .find(|u| {
                u.profile.email == credentials.email
                    && u.password == credentials.password
            })
            .ok_or(StoreError::InvalidCredentials)?;
        let token = new_id();
        let profile = user.profile.clone();
        self.sessions.insert(token.clone(), profile.user_id.clone());
        Ok(responses::LoginSession {
            token,
            user: profile,
        })
    }

    pub fn user_for_token(
        &self,
        token: &str,
    ) -> Result<responses::UserProfile, StoreError> {
        self.sessions
            .get(token)
            .and_then(|user_id| self.users.get(user_id))
            .map(|user| user.profile.clone())
            .ok_or(StoreError::InvalidSession)
    }

    pub fn owner_profile(
        &self,
        user: &responses::UserProfile,
    ) -> Result<responses::OwnerProfile, StoreError> {
        self.owners
            .get(&user.user_id)
            .cloned()
            .ok_or(StoreError::NotPermitted)
    }

    fn require_owner(
        &self,
        user: &responses::UserProfile,
    ) -> Result<OwnerId, StoreError> {
        Ok(self.owner_profile(user)?.owner_id)
    }
}

/// Artists
impl Store {
    pub fn insert_artist(&mut self, artist: responses::Artist) {
        self.artists.insert(artist.artist_id.clone(), artist);
    }

    pub fn list_artists(&self) -> Vec<responses::Artist> {
        self.artists.values().cloned().collect()
    }

    pub fn get_artist(
        &self,
        artist_id: &ArtistId,
    ) -> Result<responses::Artist, StoreError> {
        self.artists
            .get(artist_id)
            .cloned()
            .ok_or(StoreError::ArtistNotFound)
    }

    pub fn create_artist(
        &mut self,
        user: &responses::UserProfile,
        details: &requests::CreateArtist,
        now: Timestamp,
    ) -> Result<responses::Artist, StoreError> {
        self.require_owner(user)?;
        details.validate().map_err(StoreError::Invalid)?;
        let artist = responses::Artist {
            artist_id: ArtistId(new_id()),
            name: details.name.trim().to_string(),
            genre: details.genre.clone(),
            bio: details.bio.clone(),
            image_url: details.image_url.clone(),
            created_at: now,
        };
        self.insert_artist(artist.clone());
        Ok(artist)
    }

    pub fn update_artist(
        &mut self,
        user: &responses::UserProfile,
        artist_id: &ArtistId,
        details: &requests::UpdateArtist,
    ) -> Result<responses::Artist, StoreError> {
        self.require_owner(user)?;
        details.validate().map_err(StoreError::Invalid)?;
        let artist = self
            .artists
            .get_mut(artist_id)
            .ok_or(StoreError::ArtistNotFound)?;
        if let Some(name) = &details.name {
            artist.name = name.trim().to_string();
        }
        if let Some(genre) = &details.genre {
            artist.genre = Some(genre.clone());
        }
        if let Some(bio) = &details.bio {
            artist.bio = Some(bio.clone());
        }
        if let Some(image_url) = &details.image_url {
            artist.image_url = Some(image_url.clone());
        }
        Ok(artist.clone())
    }

    pub fn delete_artist(
        &mut self,
        user: &responses::UserProfile,
        artist_id: &ArtistId,
    ) -> Result<(), StoreError> {
        self.require_owner(user)?;
        self.artists
            .remove(artist_id)
            .ok_or(StoreError::ArtistNotFound)?;
        for party in self.parties.values_mut() {
            party.artist_ids.retain(|id| id != artist_id);
        }
        Ok(())
    }
}

/// Venues
impl Store {
    pub fn list_venues(&self) -> Vec<responses::Venue> {
        self.venues.values().cloned().collect()
    }

    pub fn get_venue(
        &self,
        venue_id: &VenueId,
    ) -> Result<responses::Venue, StoreError> {
        self.venues
            .get(venue_id)
            .cloned()
            .ok_or(StoreError::VenueNotFound)
    }

    pub fn create_venue(
        &mut self,
        user: &responses::UserProfile,
        details: &requests::CreateVenue,
    ) -> Result<responses::Venue, StoreError> {
        let owner_id = self.require_owner(user)?;
        details.validate().map_err(StoreError::Invalid)?;
        let venue = responses::Venue {
            venue_id: VenueId(new_id()),
            owner_id,
            name: details.name.clone(),
            address: details.address.clone(),
            city: details.city.clone(),
            capacity: details.capacity,
        };
        if let Some(owner) = self.owners.get_mut(&user.user_id) {
            owner.venue_ids.push(venue.venue_id.clone());
        }
        self.venues.insert(venue.venue_id.clone(), venue.clone());
        Ok(venue)
    }

    pub fn update_venue(
        &mut self,
        user: &responses::UserProfile,
        venue_id: &VenueId,
        details: &requests::UpdateVenue,
    ) -> Result<responses::Venue, StoreError> {
        let owner_id = self.require_owner(user)?;
        details.validate().map_err(StoreError::Invalid)?;
        let venue = self
            .venues
            .get_mut(venue_id)
            .ok_or(StoreError::VenueNotFound)?;
        if venue.owner_id != owner_id {
            return Err(StoreError::NotPermitted);
        }
        if let Some(name) = &details.name {
            venue.name = name.clone();
        }
        if let Some(address) = &details.address {
            venue.address = address.clone();
        }
        if let Some(city) = &details.city {
            venue.city = city.clone();
        }
        if let Some(capacity) = details.capacity {
            venue.capacity = capacity;
        }
        Ok(venue.clone())
    }
}

/// Parties and their ticket types
impl Store {
    pub fn list_parties(
        &self,
        filter: &requests::PartyFilter,
        now: Timestamp,
    ) -> Vec<responses::Party> {
        self.parties
            .values()
            .filter(|party| party.status == PartyStatus::Published)
            .filter(|party| !filter.upcoming_only || party.starts_at > now)
            .filter(|party| {
                filter
                    .artist_id
                    .as_ref()
                    .is_none_or(|id| party.artist_ids.contains(id))
            })
            .filter(|party| {
                filter.venue_id.as_ref().is_none_or(|id| &party.venue_id == id)
            })
            .filter(|party| {
                filter.city.as_ref().is_none_or(|city| {
                    self.venues.get(&party.venue_id).is_some_and(|venue| {
                        venue.city.eq_ignore_ascii_case(city)
                    })
                })
            })
            .cloned()
            .collect()
    }

    pub fn get_party(
        &self,
        party_id: &PartyId,
    ) -> Result<responses::Party, StoreError> {
        self.parties
            .get(party_id)
            .cloned()
            .ok_or(StoreError::PartyNotFound)
    }

    pub fn owner_parties(
        &self,
        user: &responses::UserProfile,
    ) -> Result<Vec<responses::Party>, StoreError> {
        let owner_id = self.require_owner(user)?;
        Ok(self
            .parties
            .values()
            .filter(|party| party.owner_id == owner_id)
            .cloned()
            .collect())
    }

    pub fn create_party(
        &mut self,
        user: &responses::UserProfile,
        details: &requests::CreateParty,
    ) -> Result<responses::Party, StoreError> {
        let owner_id = self.require_owner(user)?;
        details.validate().map_err(StoreError::Invalid)?;
        let venue = self.get_venue(&details.venue_id)?;
        if venue.owner_id != owner_id {
            return Err(StoreError::NotPermitted);
        }
        if let Some(missing) = details
            .artist_ids
            .iter()
            .find(|id| !self.artists.contains_key(*id))
        {
            return Err(StoreError::Invalid(format!(
                "Unknown artist {missing}"
            )));
        }
        let party = responses::Party {
            party_id: PartyId(new_id()),
            venue_id: details.venue_id.clone(),
            owner_id,
            title: details.title.trim().to_string(),
            description: details.description.clone(),
            starts_at: details.starts_at,
            ends_at: details.ends_at,
            artist_ids: details.artist_ids.clone(),
            status: PartyStatus::Draft,
            cover_image_url: details.cover_image_url.clone(),
        };
        for new_type in &details.ticket_types {
            let ticket_type = responses::TicketType {
                ticket_type_id: TicketTypeId(new_id()),
                party_id: party.party_id.clone(),
                name: new_type.name.clone(),
                price: new_type.price,
                currency: new_type.currency.clone(),
                remaining: new_type.quantity,
            };
            self.ticket_types
                .insert(ticket_type.ticket_type_id.clone(), ticket_type);
        }
        self.parties.insert(party.party_id.clone(), party.clone());
        Ok(party)
    }

    pub fn update_party(
        &mut self,
        user: &responses::UserProfile,
        party_id: &PartyId,
        details: &requests::UpdateParty,
    ) -> Result<responses::Party, StoreError> {
        let owner_id = self.require_owner(user)?;
        details.validate().map_err(StoreError::Invalid)?;
        let party = self
            .parties
            .get_mut(party_id)
            .ok_or(StoreError::PartyNotFound)?;
        if party.owner_id != owner_id {
            return Err(StoreError::NotPermitted);
        }
        if let Some(title) = &details.title {
            party.title = title.trim().to_string();
        }
        if let Some(description) = &details.description {
            party.description = Some(description.clone());
        }
        if let Some(starts_at) = details.starts_at {
            party.starts_at = starts_at;
        }
        if let Some(ends_at) = details.ends_at {
            party.ends_at = Some(ends_at);
        }
        if let Some(artist_ids) = &details.artist_ids {
            party.artist_ids = artist_ids.clone();
        }
        if let Some(status) = details.status {
            party.status = status;
        }
        if let Some(cover_image_url) = &details.cover_image_url {
            party.cover_image_url = Some(cover_image_url.clone());
        }
        Ok(party.clone())
    }

    pub fn delete_party(
        &mut self,
        user: &responses::UserProfile,
        party_id: &PartyId,
    ) -> Result<(), StoreError> {
        let owner_id = self.require_owner(user)?;
        let party = self.get_party(party_id)?;
        if party.owner_id != owner_id {
            return Err(StoreError::NotPermitted);
        }
        self.parties.remove(party_id);
        self.ticket_types.retain(|_, t| &t.party_id != party_id);
        Ok(())
    }

    pub fn list_ticket_types(
        &self,
        party_id: &PartyId,
    ) -> Result<Vec<responses::TicketType>, StoreError> {
        self.get_party(party_id)?;
        Ok(self
            .ticket_types
            .values()
            .filter(|t| &t.party_id == party_id)
            .cloned()
            .collect())
    }
}

/// News
impl Store {
    pub fn insert_news(&mut self, article: responses::NewsArticle) {
        self.news.insert(article.news_id.clone(), article);
    }

    /// Newest first.
    pub fn list_news(&self, page: &requests::Page) -> Vec<responses::NewsArticle> {
        let mut articles: Vec<_> = self.news.values().cloned().collect();
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        articles
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect()
    }

    pub fn get_news_article(
        &self,
        news_id: &NewsId,
    ) -> Result<responses::NewsArticle, StoreError> {
        self.news.get(news_id).cloned().ok_or(StoreError::NewsNotFound)
    }
}

/// Tickets
impl Store {
    pub fn purchase_tickets(
        &mut self,
        user: &responses::UserProfile,
        details: &requests::PurchaseTickets,
        now: Timestamp,
    ) -> Result<responses::Purchase, StoreError> {
        details.validate().map_err(StoreError::Invalid)?;
        let party = self.get_party(&details.party_id)?;
        if !party.is_bookable(now) {
            return Err(StoreError::NotOnSale);
        }
        let ticket_type = self
            .ticket_types
            .get_mut(&details.ticket_type_id)
            .filter(|t| t.party_id == details.party_id)
            .ok_or(StoreError::TicketTypeNotFound)?;
        if ticket_type.remaining < details.quantity {
            return Err(StoreError::InsufficientTickets(ticket_type.remaining));
        }
        ticket_type.remaining -= details.quantity;
        let total = ticket_type.price * Decimal::from(details.quantity);
        let currency = ticket_type.currency.clone();

        let tickets: Vec<responses::Ticket> = (0..details.quantity)
            .map(|_| responses::Ticket {
                ticket_id: TicketId(new_id()),
                party_id: details.party_id.clone(),
                ticket_type_id: details.ticket_type_id.clone(),
                holder_id: user.user_id.clone(),
                qr_code: format!("ENC-{}", Uuid::new_v4().simple()),
                status: TicketStatus::Valid,
                scanned_at: None,
            })
            .collect();
        for ticket in &tickets {
            self.tickets.insert(ticket.ticket_id.clone(), ticket.clone());
        }
        Ok(responses::Purchase {
            purchase_id: PurchaseId(new_id()),
            tickets,
            total,
            currency,
        })
    }

    pub fn tickets_for(
        &self,
        user: &responses::UserProfile,
    ) -> Vec<responses::Ticket> {
        self.tickets
            .values()
            .filter(|t| t.holder_id == user.user_id)
            .cloned()
            .collect()
    }

    pub fn scan_ticket(
        &mut self,
        user: &responses::UserProfile,
        details: &requests::ScanTicket,
        now: Timestamp,
    ) -> Result<responses::ScanResult, StoreError> {
        if !user.role.can_scan_tickets() {
            return Err(StoreError::NotPermitted);
        }
        details.validate().map_err(StoreError::Invalid)?;
        self.get_party(&details.party_id)?;
        let Some(ticket) = self
            .tickets
            .values_mut()
            .find(|t| t.qr_code == details.qr_code.trim())
        else {
            return Ok(responses::ScanResult {
                outcome: ScanOutcome::Unknown,
                ticket: None,
            });
        };
        let outcome = if ticket.party_id != details.party_id {
            ScanOutcome::WrongParty
        } else if ticket.status != TicketStatus::Valid {
            ScanOutcome::AlreadyScanned
        } else {
            ticket.status = TicketStatus::Used;
            ticket.scanned_at = Some(now);
            ScanOutcome::Admitted
        };
        Ok(responses::ScanResult {
            outcome,
            ticket: Some(ticket.clone()),
        })
    }
}
