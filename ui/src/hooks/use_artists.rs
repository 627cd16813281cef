use payloads::{ArtistId, requests, responses::Artist};
use yew::prelude::*;
use yewdux::prelude::*;

use super::{
    FetchHookReturn, MutationHookReturn, require_auth, use_fetch,
    use_fetch_required, use_mutation,
};
use crate::{State, get_api_client};

#[hook]
pub fn use_artists() -> FetchHookReturn<Vec<Artist>> {
    use_fetch((), || async { get_api_client().list_artists().await })
}

/// Artist by id; nothing is fetched until the id is known.
#[hook]
pub fn use_artist(artist_id: Option<ArtistId>) -> FetchHookReturn<Artist> {
    use_fetch_required(artist_id, |artist_id| async move {
        get_api_client().get_artist(&artist_id).await
    })
}

#[hook]
pub fn use_create_artist() -> MutationHookReturn<requests::CreateArtist, Artist>
{
    let (state, _) = use_store::<State>();
    let auth = state.auth().cloned();

    use_mutation(move |details: requests::CreateArtist| {
        let auth = auth.clone();
        async move {
            let auth = require_auth(auth)?;
            get_api_client().create_artist(&auth, &details).await
        }
    })
}

#[hook]
pub fn use_update_artist()
-> MutationHookReturn<(ArtistId, requests::UpdateArtist), Artist> {
    let (state, _) = use_store::<State>();
    let auth = state.auth().cloned();

    use_mutation(
        move |(artist_id, details): (ArtistId, requests::UpdateArtist)| {
            let auth = auth.clone();
            async move {
                let auth = require_auth(auth)?;
                get_api_client()
                    .update_artist(&auth, &artist_id, &details)
                    .await
            }
        },
    )
}

#[hook]
pub fn use_delete_artist() -> MutationHookReturn<ArtistId, ()> {
    let (state, _) = use_store::<State>();
    let auth = state.auth().cloned();

    use_mutation(move |artist_id: ArtistId| {
        let auth = auth.clone();
        async move {
            let auth = require_auth(auth)?;
            get_api_client().delete_artist(&auth, &artist_id).await
        }
    })
}
