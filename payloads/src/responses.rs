use crate::{
    ArtistId, NewsId, OwnerId, PartyId, PartyStatus, PurchaseId, Role,
    ScanOutcome, TicketId, TicketStatus, TicketTypeId, UserId, VenueId,
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Returned by a successful login. The token authenticates later calls and
/// is wrapped into an [`crate::AuthContext`] by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSession {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub artist_id: ArtistId,
    pub name: String,
    pub genre: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

/// An event held at a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub party_id: PartyId,
    pub venue_id: VenueId,
    pub owner_id: OwnerId,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub artist_ids: Vec<ArtistId>,
    pub status: PartyStatus,
    pub cover_image_url: Option<String>,
}

impl Party {
    pub fn is_bookable(&self, now: Timestamp) -> bool {
        self.status == PartyStatus::Published && self.starts_at > now
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub news_id: NewsId,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub published_at: Timestamp,
    /// Set when the article is about a specific party.
    pub party_id: Option<PartyId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub venue_id: VenueId,
    pub owner_id: OwnerId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerProfile {
    pub owner_id: OwnerId,
    pub display_name: String,
    pub venue_ids: Vec<VenueId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketType {
    pub ticket_type_id: TicketTypeId,
    pub party_id: PartyId,
    pub name: String,
    pub price: Decimal,
    pub currency: String,
    pub remaining: u32,
}

impl TicketType {
    pub fn is_sold_out(&self) -> bool {
        self.remaining == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub ticket_id: TicketId,
    pub party_id: PartyId,
    pub ticket_type_id: TicketTypeId,
    pub holder_id: UserId,
    /// Payload encoded into the QR code shown at the door.
    pub qr_code: String,
    pub status: TicketStatus,
    pub scanned_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub purchase_id: PurchaseId,
    pub tickets: Vec<Ticket>,
    pub total: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub outcome: ScanOutcome,
    /// The ticket the code resolved to, if any.
    pub ticket: Option<Ticket>,
}

/// Error body the backend sends along with a failing status.
///
/// Backends are inconsistent about which field carries the human-readable
/// text, so every known field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    /// The most specific non-empty message in the body.
    pub fn best_message(&self) -> Option<&str> {
        [&self.title, &self.message, &self.error]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_prefers_title() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"title": "Not found", "message": "No artist with id 42"}"#,
        )
        .unwrap();
        assert_eq!(body.best_message(), Some("Not found"));
    }

    #[test]
    fn error_body_skips_blank_fields() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"title": " ", "error": "Forbidden"}"#)
                .unwrap();
        assert_eq!(body.best_message(), Some("Forbidden"));
        assert_eq!(ErrorBody::default().best_message(), None);
    }

    #[test]
    fn bookable_parties_are_published_and_upcoming() {
        let now: Timestamp = "2025-01-01T00:00:00Z".parse().unwrap();
        let mut party = Party {
            party_id: PartyId("p".into()),
            venue_id: VenueId("v".into()),
            owner_id: OwnerId("o".into()),
            title: "Warehouse".into(),
            description: None,
            starts_at: "2025-02-01T22:00:00Z".parse().unwrap(),
            ends_at: None,
            artist_ids: vec![],
            status: PartyStatus::Draft,
            cover_image_url: None,
        };
        assert!(!party.is_bookable(now));
        party.status = PartyStatus::Published;
        assert!(party.is_bookable(now));
        assert!(!party.is_bookable("2025-03-01T00:00:00Z".parse().unwrap()));
    }
}
