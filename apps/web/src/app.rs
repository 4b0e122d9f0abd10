//! Root component: page header with the theme toggle, the search form, and
//! the results container.

use dioxus::prelude::*;

use crate::search::{ResultsView, SearchForm};
use crate::theme::ThemeToggle;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const BOOTSTRAP_ICONS_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.3/font/bootstrap-icons.min.css";
static APP_CSS: Asset = asset!("/assets/styles/app.css");

#[component]
pub fn App() -> Element {
    rsx! {
        document::Title { "Nonprofit Search" }
        document::Stylesheet { href: BOOTSTRAP_CSS }
        document::Stylesheet { href: BOOTSTRAP_ICONS_CSS }
        document::Stylesheet { href: APP_CSS }

        div {
            class: "container py-4",

            header {
                class: "d-flex justify-content-between align-items-center mb-4",
                h1 { class: "h3 mb-0", "Nonprofit Search" }
                ThemeToggle {}
            }

            SearchForm {}
            ResultsView {}
        }
    }
}
