use payloads::{APIClient, ArtistId, ClientConfig, PartyId};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

pub mod hooks;
mod logs;
mod pages;
pub mod state;

pub use state::{SessionState, State};

/// API client for the backend set at build time via `BACKEND_URL`, falling
/// back to the page's own origin.
pub fn get_api_client() -> APIClient {
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .or_else(|| {
            web_sys::window().and_then(|window| window.location().origin().ok())
        })
        .unwrap_or_else(|| ClientConfig::default().address);

    APIClient::new(&ClientConfig::new(address))
}

#[function_component]
pub fn App() -> Html {
    use_effect_with((), |_| logs::init_logging());

    html! {
        <BrowserRouter>
            <div class="min-h-screen bg-white dark:bg-neutral-900 text-neutral-900 dark:text-neutral-100">
                <Header />
                <main class="max-w-5xl mx-auto px-4 py-8">
                    <Switch<Route> render={switch} />
                </main>
            </div>
        </BrowserRouter>
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/artists/:artist_id")]
    Artist { artist_id: String },
    #[at("/parties/:party_id/scan")]
    Scan { party_id: String },
    #[at("/login")]
    Login,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <pages::HomePage /> },
        Route::Artist { artist_id } => html! {
            <pages::ArtistPage artist_id={ArtistId(artist_id)} />
        },
        Route::Scan { party_id } => html! {
            <pages::ScanPage party_id={PartyId(party_id)} />
        },
        Route::Login => html! { <pages::LoginPage /> },
        Route::NotFound => html! { <pages::NotFoundPage /> },
    }
}

#[function_component]
fn Header() -> Html {
    let (state, _) = use_store::<State>();
    let account = match state.profile() {
        Some(profile) => profile.name.clone(),
        None => "Log in".to_string(),
    };

    html! {
        <header class="border-b border-neutral-200 dark:border-neutral-700">
            <nav class="max-w-5xl mx-auto px-4 py-4 flex justify-between">
                <Link<Route> to={Route::Home} classes="font-bold">
                    {"Parties"}
                </Link<Route>>
                <Link<Route> to={Route::Login}>{account}</Link<Route>>
            </nav>
        </header>
    }
}
