//! Nonprofit Search page — Dioxus front end for the `/search` API.

use dioxus::prelude::*;

mod app;
mod search;
mod state;
mod storage;
mod theme;

use app::App;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nonprofit_search=info".parse().expect("static directive")),
        )
        .with_target(false)
        .init();

    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

        LaunchBuilder::new()
            .with_cfg(
                Config::default().with_menu(None).with_window(
                    WindowBuilder::new()
                        .with_title("Nonprofit Search")
                        .with_inner_size(LogicalSize::new(1100.0, 800.0))
                        .with_resizable(true),
                ),
            )
            .launch(App);
    }

    #[cfg(not(feature = "desktop"))]
    {
        dioxus::launch(App);
    }
}
