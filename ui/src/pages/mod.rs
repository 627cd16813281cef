pub mod artist;
pub mod home;
pub mod login;
pub mod not_found;
pub mod scan;

pub use artist::ArtistPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use scan::ScanPage;

use jiff::Timestamp;
use yew::prelude::*;

/// Short UTC date for listings, e.g. "Sat 14 Jun 22:00".
pub(crate) fn format_start(at: Timestamp) -> String {
    at.strftime("%a %d %b %H:%M").to_string()
}

/// Red notice for a request error.
pub(crate) fn error_notice(error: Option<&String>) -> Html {
    match error {
        Some(error) => html! {
            <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
        },
        None => html! {},
    }
}
