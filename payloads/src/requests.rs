use crate::{ArtistId, PartyId, PartyStatus, TicketTypeId, VenueId};
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const NAME_MAX_LEN: usize = 255;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const MAX_TICKETS_PER_PURCHASE: u32 = 10;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Validation result for free-text fields such as names and titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextValidation {
    Valid,
    Empty,
    TooLong,
}

impl TextValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Validate a required, single-line text field.
///
/// Leading and trailing whitespace does not count towards the content.
pub fn validate_required_text(value: &str) -> TextValidation {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return TextValidation::Empty;
    }
    if trimmed.chars().count() > NAME_MAX_LEN {
        return TextValidation::TooLong;
    }
    TextValidation::Valid
}

/// Check a required text field, naming it in the error message.
fn require_text(field: &str, value: &str) -> Result<(), String> {
    match validate_required_text(value) {
        TextValidation::Valid => Ok(()),
        TextValidation::Empty => Err(format!("{field} is required")),
        TextValidation::TooLong => Err(format!(
            "{field} must be at most {NAME_MAX_LEN} characters"
        )),
    }
}

/// Check an optional text field, if present.
fn require_optional_text(
    field: &str,
    value: &Option<String>,
) -> Result<(), String> {
    match value {
        Some(value) => require_text(field, value),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn validate(&self) -> Result<(), String> {
        require_text("Email", &self.email)?;
        if self.password.is_empty() {
            return Err("Password is required".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl CreateAccount {
    pub fn validate(&self) -> Result<(), String> {
        require_text("Email", &self.email)?;
        if !self.email.contains('@') {
            return Err("Email address is not valid".into());
        }
        require_text("Name", &self.name)?;
        if self.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(format!(
                "Password must be at least {PASSWORD_MIN_LEN} characters"
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateArtist {
    pub name: String,
    pub genre: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

impl CreateArtist {
    pub fn validate(&self) -> Result<(), String> {
        require_text("Artist name", &self.name)
    }
}

/// Partial update; fields left as `None` are unchanged by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateArtist {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl UpdateArtist {
    pub fn validate(&self) -> Result<(), String> {
        require_optional_text("Artist name", &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateParty {
    pub venue_id: VenueId,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub artist_ids: Vec<ArtistId>,
    pub cover_image_url: Option<String>,
    pub ticket_types: Vec<NewTicketType>,
}

impl CreateParty {
    pub fn validate(&self) -> Result<(), String> {
        require_text("Party title", &self.title)?;
        validate_schedule(self.starts_at, self.ends_at)?;
        for ticket_type in &self.ticket_types {
            ticket_type.validate()?;
        }
        Ok(())
    }
}

/// A ticket tier created together with its party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTicketType {
    pub name: String,
    pub price: Decimal,
    pub currency: String,
    pub quantity: u32,
}

impl NewTicketType {
    pub fn validate(&self) -> Result<(), String> {
        require_text("Ticket type name", &self.name)?;
        if self.price.is_sign_negative() {
            return Err("Ticket price cannot be negative".into());
        }
        if self.currency.len() != 3 {
            return Err("Currency must be a three-letter code".into());
        }
        Ok(())
    }
}

/// Partial update; fields left as `None` are unchanged by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateParty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_ids: Option<Vec<ArtistId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PartyStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

impl UpdateParty {
    pub fn validate(&self) -> Result<(), String> {
        require_optional_text("Party title", &self.title)?;
        if let Some(starts_at) = self.starts_at {
            validate_schedule(starts_at, self.ends_at)?;
        }
        Ok(())
    }
}

fn validate_schedule(
    starts_at: Timestamp,
    ends_at: Option<Timestamp>,
) -> Result<(), String> {
    match ends_at {
        Some(ends_at) if ends_at <= starts_at => {
            Err("A party must end after it starts".into())
        }
        _ => Ok(()),
    }
}

/// Query parameters for listing parties. Unset fields don't filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartyFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<ArtistId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<VenueId>,
    #[serde(default)]
    pub upcoming_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl Page {
    pub fn next(&self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset.saturating_add(self.limit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateVenue {
    pub name: String,
    pub address: String,
    pub city: String,
    pub capacity: u32,
}

impl CreateVenue {
    pub fn validate(&self) -> Result<(), String> {
        require_text("Venue name", &self.name)?;
        require_text("Address", &self.address)?;
        require_text("City", &self.city)?;
        if self.capacity == 0 {
            return Err("Capacity must be at least 1".into());
        }
        Ok(())
    }
}

/// Partial update; fields left as `None` are unchanged by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateVenue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl UpdateVenue {
    pub fn validate(&self) -> Result<(), String> {
        require_optional_text("Venue name", &self.name)?;
        require_optional_text("Address", &self.address)?;
        require_optional_text("City", &self.city)?;
        if self.capacity == Some(0) {
            return Err("Capacity must be at least 1".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseTickets {
    pub party_id: PartyId,
    pub ticket_type_id: TicketTypeId,
    pub quantity: u32,
}

impl PurchaseTickets {
    pub fn validate(&self) -> Result<(), String> {
        if self.quantity == 0 {
            return Err("Select at least one ticket".into());
        }
        if self.quantity > MAX_TICKETS_PER_PURCHASE {
            return Err(format!(
                "At most {MAX_TICKETS_PER_PURCHASE} tickets can be bought at once"
            ));
        }
        Ok(())
    }
}

/// A QR code read at the door of a party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTicket {
    pub party_id: PartyId,
    pub qr_code: String,
}

impl ScanTicket {
    pub fn validate(&self) -> Result<(), String> {
        if self.qr_code.trim().is_empty() {
            return Err("The scanned code is empty".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text() {
        assert_eq!(validate_required_text("  "), TextValidation::Empty);
        assert_eq!(
            validate_required_text(&"x".repeat(NAME_MAX_LEN + 1)),
            TextValidation::TooLong
        );
        assert!(validate_required_text(" Foo ").is_valid());
    }

    #[test]
    fn purchase_quantity_bounds() {
        let mut purchase = PurchaseTickets {
            party_id: PartyId("p".into()),
            ticket_type_id: TicketTypeId("t".into()),
            quantity: 0,
        };
        assert!(purchase.validate().is_err());
        purchase.quantity = MAX_TICKETS_PER_PURCHASE;
        assert!(purchase.validate().is_ok());
        purchase.quantity = MAX_TICKETS_PER_PURCHASE + 1;
        assert!(purchase.validate().is_err());
    }

    #[test]
    fn party_must_end_after_start() {
        let starts_at: Timestamp = "2025-06-01T20:00:00Z".parse().unwrap();
        let update = UpdateParty {
            starts_at: Some(starts_at),
            ends_at: Some(starts_at),
            ..Default::default()
        };
        assert_eq!(
            update.validate(),
            Err("A party must end after it starts".to_string())
        );
    }

    #[test]
    fn partial_update_skips_unset_fields() {
        let update = UpdateArtist {
            genre: Some("Techno".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "genre": "Techno" })
        );
    }

    #[test]
    fn page_advances_by_limit() {
        let page = Page::default().next();
        assert_eq!(page.offset, DEFAULT_PAGE_SIZE);
        assert_eq!(page.limit, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_offset_saturates() {
        let last = Page {
            limit: 50,
            offset: u32::MAX - 10,
        };
        assert_eq!(last.next().offset, u32::MAX);
    }

    #[test]
    fn empty_qr_code_is_rejected() {
        let scan = ScanTicket {
            party_id: PartyId("p".into()),
            qr_code: " ".into(),
        };
        assert!(scan.validate().is_err());
    }
}
