use jiff::Timestamp;
use payloads::requests::{Page, PartyFilter};
use yew::prelude::*;

use super::{error_notice, format_start};
use crate::hooks::{use_news, use_parties};

#[function_component]
pub fn HomePage() -> Html {
    html! {
        <div class="grid gap-8 md:grid-cols-3">
            <section class="md:col-span-2">
                <h2 class="text-xl font-semibold mb-4">{"Upcoming parties"}</h2>
                <UpcomingParties />
            </section>
            <section>
                <h2 class="text-xl font-semibold mb-4">{"News"}</h2>
                <Headlines />
            </section>
        </div>
    }
}

#[function_component]
fn UpcomingParties() -> Html {
    let parties_hook = use_parties(PartyFilter {
        upcoming_only: true,
        ..Default::default()
    });
    let now = Timestamp::now();

    parties_hook.render("parties", |parties, is_loading, error| {
        if parties.is_empty() {
            return html! {
                <p class="text-neutral-600 dark:text-neutral-400">
                    {"Nothing planned yet."}
                </p>
            };
        }
        html! {
            <div class={classes!(is_loading.then_some("opacity-60"))}>
                {error_notice(error)}
                <ul class="divide-y divide-neutral-200 dark:divide-neutral-700">
                    {for parties.iter().map(|party| html! {
                        <li class="py-3 flex justify-between">
                            <div>
                                <p class="font-medium">{&party.title}</p>
                                <p class="text-sm text-neutral-600 \
                                          dark:text-neutral-400">
                                    {format_start(party.starts_at)}
                                </p>
                            </div>
                            if party.is_bookable(now) {
                                <span class="text-xs uppercase">
                                    {"On sale"}
                                </span>
                            }
                        </li>
                    })}
                </ul>
            </div>
        }
    })
}

#[function_component]
fn Headlines() -> Html {
    let news_hook = use_news(Page::default());

    news_hook.render("news", |articles, _, error| {
        html! {
            <>
                {error_notice(error)}
                <ul class="space-y-3">
                    {for articles.iter().map(|article| html! {
                        <li>
                            <p class="font-medium">{&article.title}</p>
                            <p class="text-sm text-neutral-600 \
                                      dark:text-neutral-400">
                                {&article.summary}
                            </p>
                        </li>
                    })}
                </ul>
            </>
        }
    })
}
