use payloads::{PartyId, ScanOutcome, requests::ScanTicket};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::error_notice;
use crate::hooks::{use_party, use_scan_ticket};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub party_id: PartyId,
}

fn outcome_label(outcome: ScanOutcome) -> &'static str {
    match outcome {
        ScanOutcome::Admitted => "Admitted",
        ScanOutcome::AlreadyScanned => "Already scanned",
        ScanOutcome::WrongParty => "Ticket is for another party",
        ScanOutcome::Unknown => "Unknown ticket",
    }
}

/// Door check: each submitted code is scanned against the party.
#[function_component]
pub fn ScanPage(props: &Props) -> Html {
    let party_hook = use_party(Some(props.party_id.clone()));
    let scan = use_scan_ticket();
    let code = use_state(String::new);

    let oninput = {
        let code = code.clone();
        Callback::from(move |e: InputEvent| {
            code.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let onsubmit = {
        let invoke = scan.invoke.clone();
        let code = code.clone();
        let party_id = props.party_id.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            invoke.emit(ScanTicket {
                party_id: party_id.clone(),
                qr_code: (*code).clone(),
            });
            code.set(String::new());
        })
    };

    let title = party_hook
        .data
        .as_ref()
        .map(|party| party.title.clone())
        .unwrap_or_default();
    let result = match scan.data.as_ref() {
        Some(result) if !scan.is_loading => {
            let tone = if result.outcome.is_admitted() {
                "text-green-700"
            } else {
                "text-red-700"
            };
            html! {
                <p class={classes!("text-2xl", "font-bold", tone)}>
                    {outcome_label(result.outcome)}
                </p>
            }
        }
        _ => html! {},
    };

    html! {
        <div class="space-y-4">
            <h1 class="text-2xl font-semibold">{format!("Door: {title}")}</h1>
            <form {onsubmit}>
                <input
                    placeholder="Scan or type a ticket code"
                    value={(*code).clone()}
                    {oninput}
                />
            </form>
            {error_notice(scan.error.as_ref())}
            {result}
        </div>
    }
}
