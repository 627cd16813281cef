use payloads::{requests, responses::UserProfile};
use yew::prelude::*;
use yewdux::prelude::*;

use super::{MutationHookReturn, use_mutation};
use crate::{State, get_api_client};

/// Log in and keep the returned credentials in the session store.
#[hook]
pub fn use_login() -> MutationHookReturn<requests::LoginCredentials, UserProfile>
{
    let (_, dispatch) = use_store::<State>();

    use_mutation(move |credentials: requests::LoginCredentials| {
        let dispatch = dispatch.clone();
        async move {
            let (auth, profile) = get_api_client().login(&credentials).await?;
            tracing::info!(user_id = %profile.user_id, "Logged in");
            dispatch.reduce_mut(|state| state.login(auth, profile.clone()));
            Ok::<_, payloads::ClientError>(profile)
        }
    })
}

#[hook]
pub fn use_register()
-> MutationHookReturn<requests::CreateAccount, UserProfile> {
    use_mutation(|details: requests::CreateAccount| async move {
        get_api_client().create_account(&details).await
    })
}

/// Forget the session. Tokens are not revoked server side.
#[hook]
pub fn use_logout() -> Callback<()> {
    let (_, dispatch) = use_store::<State>();

    Callback::from(move |_| {
        dispatch.reduce_mut(|state| state.logout());
    })
}
