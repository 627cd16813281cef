pub mod use_artists;
pub mod use_fetch;
pub mod use_news;
pub mod use_parties;
pub mod use_session;
pub mod use_tickets;
pub mod use_venues;

pub use request_state::FetchState;
pub use use_artists::{
    use_artist, use_artists, use_create_artist, use_delete_artist,
    use_update_artist,
};
pub use use_fetch::{
    FetchHookReturn, MutationHookReturn, use_fetch, use_fetch_required,
    use_mutation, use_mutation_with,
};
pub use use_news::{use_news, use_news_article};
pub use use_parties::{
    use_create_party, use_delete_party, use_owner_parties, use_parties,
    use_party, use_update_party,
};
pub use use_session::{use_login, use_logout, use_register};
pub use use_tickets::{
    use_my_tickets, use_purchase_tickets, use_scan_ticket, use_ticket_types,
};
pub use use_venues::{
    use_create_venue, use_owner_profile, use_update_venue, use_venue,
    use_venues,
};

use payloads::{AuthContext, ClientError};

/// Credentials for a protected call, or the error shown when logged out.
fn require_auth(auth: Option<AuthContext>) -> Result<AuthContext, ClientError> {
    auth.ok_or_else(|| {
        ClientError::Validation("You need to log in first".into())
    })
}
