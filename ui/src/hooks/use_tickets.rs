use payloads::{
    PartyId, requests,
    responses::{Purchase, ScanResult, Ticket, TicketType},
};
use yew::prelude::*;
use yewdux::prelude::*;

use super::{
    FetchHookReturn, MutationHookReturn, require_auth, use_fetch_required,
    use_mutation,
};
use crate::{State, get_api_client};

#[hook]
pub fn use_ticket_types(
    party_id: Option<PartyId>,
) -> FetchHookReturn<Vec<TicketType>> {
    use_fetch_required(party_id, |party_id| async move {
        get_api_client().list_ticket_types(&party_id).await
    })
}

/// Tickets held by the logged in user.
#[hook]
pub fn use_my_tickets() -> FetchHookReturn<Vec<Ticket>> {
    let (state, _) = use_store::<State>();

    use_fetch_required(state.auth().cloned(), |auth| async move {
        get_api_client().my_tickets(&auth).await
    })
}

#[hook]
pub fn use_purchase_tickets()
-> MutationHookReturn<requests::PurchaseTickets, Purchase> {
    let (state, _) = use_store::<State>();
    let auth = state.auth().cloned();

    use_mutation(move |details: requests::PurchaseTickets| {
        let auth = auth.clone();
        async move {
            let auth = require_auth(auth)?;
            get_api_client().purchase_tickets(&auth, &details).await
        }
    })
}

/// Check a QR code at the door. Each scan is its own invocation, so the
/// result shown always belongs to the latest code read.
#[hook]
pub fn use_scan_ticket() -> MutationHookReturn<requests::ScanTicket, ScanResult>
{
    let (state, _) = use_store::<State>();
    let auth = state.auth().cloned();

    use_mutation(move |details: requests::ScanTicket| {
        let auth = auth.clone();
        async move {
            let auth = require_auth(auth)?;
            get_api_client().scan_ticket(&auth, &details).await
        }
    })
}
