use payloads::{
    VenueId, requests,
    responses::{OwnerProfile, Venue},
};
use yew::prelude::*;
use yewdux::prelude::*;

use super::{
    FetchHookReturn, MutationHookReturn, require_auth, use_fetch,
    use_fetch_required, use_mutation,
};
use crate::{State, get_api_client};

#[hook]
pub fn use_venues() -> FetchHookReturn<Vec<Venue>> {
    use_fetch((), || async { get_api_client().list_venues().await })
}

#[hook]
pub fn use_venue(venue_id: Option<VenueId>) -> FetchHookReturn<Venue> {
    use_fetch_required(venue_id, |venue_id| async move {
        get_api_client().get_venue(&venue_id).await
    })
}

#[hook]
pub fn use_owner_profile() -> FetchHookReturn<OwnerProfile> {
    let (state, _) = use_store::<State>();

    use_fetch_required(state.auth().cloned(), |auth| async move {
        get_api_client().owner_profile(&auth).await
    })
}

#[hook]
pub fn use_create_venue() -> MutationHookReturn<requests::CreateVenue, Venue> {
    let (state, _) = use_store::<State>();
    let auth = state.auth().cloned();

    use_mutation(move |details: requests::CreateVenue| {
        let auth = auth.clone();
        async move {
            let auth = require_auth(auth)?;
            get_api_client().create_venue(&auth, &details).await
        }
    })
}

#[hook]
pub fn use_update_venue()
-> MutationHookReturn<(VenueId, requests::UpdateVenue), Venue> {
    let (state, _) = use_store::<State>();
    let auth = state.auth().cloned();

    use_mutation(
        move |(venue_id, details): (VenueId, requests::UpdateVenue)| {
            let auth = auth.clone();
            async move {
                let auth = require_auth(auth)?;
                get_api_client()
                    .update_venue(&auth, &venue_id, &details)
                    .await
            }
        },
    )
}
