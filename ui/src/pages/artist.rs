use payloads::{ArtistId, requests::PartyFilter};
use yew::prelude::*;

use super::{error_notice, format_start};
use crate::hooks::{use_artist, use_parties};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub artist_id: ArtistId,
}

#[function_component]
pub fn ArtistPage(props: &Props) -> Html {
    let artist_hook = use_artist(Some(props.artist_id.clone()));
    let parties_hook = use_parties(PartyFilter {
        artist_id: Some(props.artist_id.clone()),
        upcoming_only: true,
        ..Default::default()
    });

    let parties = parties_hook.render("parties", |parties, _, error| {
        html! {
            <>
                {error_notice(error)}
                <ul class="space-y-2">
                    {for parties.iter().map(|party| html! {
                        <li>
                            {format!(
                                "{} · {}",
                                format_start(party.starts_at),
                                party.title
                            )}
                        </li>
                    })}
                </ul>
            </>
        }
    });

    artist_hook.render("artist", |artist, _, error| {
        html! {
            <article class="space-y-4">
                {error_notice(error)}
                <h1 class="text-3xl font-bold">{&artist.name}</h1>
                if let Some(genre) = &artist.genre {
                    <p class="text-sm uppercase">{genre}</p>
                }
                if let Some(bio) = &artist.bio {
                    <p>{bio}</p>
                }
                <h2 class="text-xl font-semibold">{"Playing at"}</h2>
                {parties.clone()}
            </article>
        }
    })
}
