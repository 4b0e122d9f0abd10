//! Search form, advanced filter panel, and results container.

mod advanced;
mod results;

use dioxus::prelude::*;

use nonprofit_search_core::controller::{perform_search, SearchInput};

use crate::state::*;
use advanced::{AdvancedFilters, AdvancedToggle};
pub use results::ResultsView;

/// The `#searchForm` form. Submitting runs one search through the controller.
#[component]
pub fn SearchForm() -> Element {
    let mut term = use_signal(String::new);
    let state = use_signal(String::new);
    let international_only = use_signal(|| false);
    let submit = SUBMIT.read().clone();

    rsx! {
        form {
            id: "searchForm",
            class: "mb-4",
            onsubmit: move |e: FormEvent| {
                e.prevent_default();
                let input = SearchInput {
                    term: term(),
                    state: state(),
                    international_only: international_only(),
                };
                // Copy the handles out so no signal borrow spans the request.
                let (mut pane, mut submit) = {
                    let ui = UI.read();
                    (ui.results, ui.submit)
                };
                spawn(async move {
                    perform_search(&transport(), &mut pane, &mut submit, &input).await;
                });
            },

            div {
                class: "input-group mb-2",
                input {
                    id: "searchQuery",
                    class: "form-control",
                    r#type: "text",
                    placeholder: "Organization name, city, country, or EIN",
                    value: "{term}",
                    autofocus: true,
                    oninput: move |e: Event<FormData>| term.set(e.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: !submit.enabled,
                    "{submit.label}"
                }
            }

            AdvancedToggle {}
            AdvancedFilters { state, international_only }
        }
    }
}
