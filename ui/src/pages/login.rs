use payloads::requests::LoginCredentials;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::*;

use super::error_notice;
use crate::State;
use crate::hooks::{use_login, use_logout};

#[function_component]
pub fn LoginPage() -> Html {
    let (state, _) = use_store::<State>();
    let login = use_login();
    let logout = use_logout();
    let email = use_state(String::new);
    let password = use_state(String::new);

    if let Some(profile) = state.profile() {
        let onclick = logout.reform(|_: MouseEvent| ());
        return html! {
            <div class="space-y-4">
                <p>{format!("Logged in as {}", profile.name)}</p>
                <button class="underline" {onclick}>{"Log out"}</button>
            </div>
        };
    }

    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            email.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            password.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let onsubmit = {
        let invoke = login.invoke.clone();
        let email = email.clone();
        let password = password.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            invoke.emit(LoginCredentials {
                email: (*email).clone(),
                password: (*password).clone(),
            });
        })
    };

    html! {
        <form class="max-w-sm space-y-4" {onsubmit}>
            <input
                type="email"
                placeholder="Email"
                value={(*email).clone()}
                oninput={on_email}
            />
            <input
                type="password"
                placeholder="Password"
                value={(*password).clone()}
                oninput={on_password}
            />
            {error_notice(login.error.as_ref())}
            <button type="submit" disabled={login.is_loading}>
                {if login.is_loading { "Signing in..." } else { "Sign in" }}
            </button>
        </form>
    }
}
