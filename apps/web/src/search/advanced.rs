//! Collapsible advanced filters: state select and international-only box.

use dioxus::prelude::*;

use nonprofit_search_core::types::INTERNATIONAL_CODE;

use crate::state::{transport, UI};

#[component]
pub fn AdvancedToggle() -> Element {
    let panel = UI.read().panel;

    rsx! {
        button {
            id: "advancedSearchToggle",
            class: "btn btn-link px-0",
            r#type: "button",
            onclick: move |_| {
                UI.write().toggle_panel();
            },
            "{panel.toggle_label()}"
        }
    }
}

#[component]
pub fn AdvancedFilters(mut state: Signal<String>, mut international_only: Signal<bool>) -> Element {
    let visible = UI.read().panel.is_visible();

    // Filter options come from the server; an unreachable server leaves only "All".
    let codes = use_resource(|| async move {
        transport().fetch_states().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not load state list");
            Vec::new()
        })
    });
    let codes = codes.read().clone().unwrap_or_default();

    rsx! {
        div {
            id: "advancedSearch",
            class: "card card-body mt-2",
            style: if visible { "display: block;" } else { "display: none;" },

            div {
                class: "row g-3 align-items-center",
                div {
                    class: "col-md-6",
                    label { class: "form-label", r#for: "stateSelect", "State / Territory" }
                    select {
                        id: "stateSelect",
                        class: "form-select",
                        value: "{state}",
                        onchange: move |e: Event<FormData>| state.set(e.value()),
                        option { value: "", "All" }
                        option { value: INTERNATIONAL_CODE, "International" }
                        for code in codes {
                            option { key: "{code}", value: "{code}", "{code}" }
                        }
                    }
                }
                div {
                    class: "col-md-6 form-check mt-4",
                    input {
                        id: "internationalOnly",
                        class: "form-check-input",
                        r#type: "checkbox",
                        checked: international_only(),
                        onchange: move |e: Event<FormData>| international_only.set(e.checked()),
                    }
                    label { class: "form-check-label", r#for: "internationalOnly", "International organizations only" }
                }
            }
        }
    }
}
