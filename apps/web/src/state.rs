//! Page state held in Dioxus global signals, plus the adapters that let the
//! search controller write into them.

use dioxus::prelude::*;

use nonprofit_search_core::client::HttpTransport;
use nonprofit_search_core::controller::{ResultsPane, SubmitControl, SubmitState, UiContext};
use nonprofit_search_core::render::ResultsContent;

use crate::storage::BrowserStore;

// ---------------------------------------------------------------------------
// Global signals
// ---------------------------------------------------------------------------

/// Content of the `#results` container
pub static RESULTS: GlobalSignal<ResultsContent> = Signal::global(ResultsContent::default);

/// Enabled flag and label of the search form's submit button
pub static SUBMIT: GlobalSignal<SubmitState> = Signal::global(SubmitState::ready);

/// Handles the page's event handlers work on. The stored theme is read on
/// first access.
pub type PageContext = UiContext<SignalPane, SignalSubmit, BrowserStore>;

pub static UI: GlobalSignal<PageContext> = Signal::global(|| UiContext::new(SignalPane, SignalSubmit, BrowserStore));

// ---------------------------------------------------------------------------
// Controller adapters
// ---------------------------------------------------------------------------

/// Renders into [`RESULTS`].
#[derive(Debug, Clone, Copy)]
pub struct SignalPane;

impl ResultsPane for SignalPane {
    fn render(&mut self, content: ResultsContent) {
        *RESULTS.write() = content;
    }
}

/// Reads and writes [`SUBMIT`].
#[derive(Debug, Clone, Copy)]
pub struct SignalSubmit;

impl SubmitControl for SignalSubmit {
    fn state(&self) -> SubmitState {
        SUBMIT.read().clone()
    }

    fn set_state(&mut self, state: SubmitState) {
        *SUBMIT.write() = state;
    }
}

/// Transport rooted at the page's own origin (the server that served it).
pub fn transport() -> HttpTransport {
    HttpTransport::new(server_origin())
}

#[cfg(target_arch = "wasm32")]
fn server_origin() -> String {
    web_sys::window().and_then(|w| w.location().origin().ok()).unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn server_origin() -> String {
    std::env::var("NONPROFIT_SEARCH_URL").unwrap_or_else(|_| "http://127.0.0.1:8432".to_string())
}
