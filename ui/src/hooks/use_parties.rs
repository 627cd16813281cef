use payloads::{PartyId, requests, responses::Party};
use yew::prelude::*;
use yewdux::prelude::*;

use super::{
    FetchHookReturn, MutationHookReturn, require_auth, use_fetch,
    use_fetch_required, use_mutation,
};
use crate::{State, get_api_client};

/// Published parties matching `filter`, refetched when the filter changes.
#[hook]
pub fn use_parties(
    filter: requests::PartyFilter,
) -> FetchHookReturn<Vec<Party>> {
    use_fetch(filter.clone(), move || {
        let filter = filter.clone();
        async move { get_api_client().list_parties(&filter).await }
    })
}

#[hook]
pub fn use_party(party_id: Option<PartyId>) -> FetchHookReturn<Party> {
    use_fetch_required(party_id, |party_id| async move {
        get_api_client().get_party(&party_id).await
    })
}

/// Parties of the logged in owner, drafts included.
#[hook]
pub fn use_owner_parties() -> FetchHookReturn<Vec<Party>> {
    let (state, _) = use_store::<State>();

    use_fetch_required(state.auth().cloned(), |auth| async move {
        get_api_client().owner_parties(&auth).await
    })
}

#[hook]
pub fn use_create_party() -> MutationHookReturn<requests::CreateParty, Party> {
    let (state, _) = use_store::<State>();
    let auth = state.auth().cloned();

    use_mutation(move |details: requests::CreateParty| {
        let auth = auth.clone();
        async move {
            let auth = require_auth(auth)?;
            get_api_client().create_party(&auth, &details).await
        }
    })
}

#[hook]
pub fn use_update_party()
-> MutationHookReturn<(PartyId, requests::UpdateParty), Party> {
    let (state, _) = use_store::<State>();
    let auth = state.auth().cloned();

    use_mutation(
        move |(party_id, details): (PartyId, requests::UpdateParty)| {
            let auth = auth.clone();
            async move {
                let auth = require_auth(auth)?;
                get_api_client()
                    .update_party(&auth, &party_id, &details)
                    .await
            }
        },
    )
}

#[hook]
pub fn use_delete_party() -> MutationHookReturn<PartyId, ()> {
    let (state, _) = use_store::<State>();
    let auth = state.auth().cloned();

    use_mutation(move |party_id: PartyId| {
        let auth = auth.clone();
        async move {
            let auth = require_auth(auth)?;
            get_api_client().delete_party(&auth, &party_id).await
        }
    })
}
