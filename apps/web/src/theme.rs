//! Light/dark theme button.

use dioxus::prelude::*;

use nonprofit_search_core::theme::{Theme, THEME_ATTRIBUTE};

use crate::state::UI;

/// Set the theme attribute on the document root element.
fn apply_theme(theme: Theme) {
    let script = format!("document.documentElement.setAttribute('{THEME_ATTRIBUTE}', '{}');", theme.as_str());
    spawn(async move {
        if let Err(e) = document::eval(&script).await {
            tracing::warn!(theme = theme.as_str(), error = ?e, "Could not apply theme to the page");
        }
    });
}

#[component]
pub fn ThemeToggle() -> Element {
    let theme = UI.read().theme.current();

    // Stored theme is applied once the page is mounted, then after every toggle.
    use_effect(move || apply_theme(UI.read().theme.current()));

    rsx! {
        button {
            id: "themeToggle",
            class: "btn btn-outline-secondary",
            r#type: "button",
            onclick: move |_| {
                UI.write().toggle_theme();
            },
            i { class: theme.icon_class() }
            " {theme.button_label()}"
        }
    }
}
