//! The `#results` container.

use dioxus::prelude::*;

use nonprofit_search_core::render::*;

use crate::state::RESULTS;

#[component]
pub fn ResultsView() -> Element {
    let content = RESULTS.read().clone();

    rsx! {
        div {
            id: "results",
            match content {
                ResultsContent::Idle => rsx! {},
                ResultsContent::EmptyQuery => rsx! {
                    div { class: "alert alert-info", "{EMPTY_QUERY_NOTICE}" }
                },
                ResultsContent::Loading { term } => rsx! {
                    div {
                        class: "loading text-center py-4",
                        div { class: "spinner-border text-primary", role: "status" }
                        p { class: "mt-2", {ResultsContent::loading_message(&term)} }
                    }
                },
                ResultsContent::Cards(cards) => rsx! {
                    for (i, card) in cards.into_iter().enumerate() {
                        ResultCardView { key: "{i}", card }
                    }
                },
                ResultsContent::NoResults(none) => rsx! {
                    div {
                        class: "no-results text-center py-4",
                        h5 { {none.message()} }
                        p { "{SUGGESTIONS_HEADING}" }
                        ul {
                            class: "list-unstyled",
                            for hint in none.suggestions() {
                                li { "{hint}" }
                            }
                        }
                    }
                },
                ResultsContent::Error => rsx! {
                    div {
                        class: "alert alert-danger",
                        h5 { "{ERROR_TITLE}" }
                        p { "{ERROR_MESSAGE}" }
                        small { "{ERROR_HINT}" }
                    }
                },
            }
        }
    }
}

#[component]
fn ResultCardView(card: ResultCard) -> Element {
    rsx! {
        div {
            class: "card mb-3 result-card",
            div {
                class: "card-body",
                h5 { class: "card-title", "{card.title}" }
                if let Some(ein) = &card.ein {
                    p { class: "card-text mb-1", strong { "EIN: " } "{ein}" }
                }
                if let Some(location) = &card.location {
                    p { class: "card-text mb-1", strong { "Location: " } "{location}" }
                }
                if let Some(website) = &card.website {
                    p {
                        class: "card-text mb-1",
                        strong { "Website: " }
                        a { href: "{website}", target: "_blank", rel: "noopener", "{website}" }
                    }
                }
            }
        }
    }
}
