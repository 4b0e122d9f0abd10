//! Search controller: validates the form, issues the single `/search` request,
//! and routes the outcome to the results container.
//!
//! The controller never touches a concrete UI. It talks to three seams:
//! [`SearchTransport`] for the request, [`ResultsPane`] for what the results
//! container shows, and [`SubmitControl`] for the submit button. The button is
//! held through a [`SubmitGuard`] for the duration of the request and restored
//! when the guard drops, whichever way the request ends.

use std::future::Future;

use tracing::{debug, error};

use crate::panel::AdvancedPanel;
use crate::query::SearchQuery;
use crate::render::ResultsContent;
use crate::theme::{Theme, ThemeState, ThemeStore};
use crate::types::SearchResult;

/// Label shown on the submit button while a request is in flight.
pub const BUSY_LABEL: &str = "Searching...";

/// Label of the submit button at rest.
pub const SUBMIT_LABEL: &str = "Search";

// ---------------------------------------------------------------------------
// Seams
// ---------------------------------------------------------------------------

/// Why a search request failed. Logged, never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// Issues one GET for a request path (e.g. `/search?q=..`) and decodes the
/// JSON array it returns.
pub trait SearchTransport {
    fn get_results(&self, path: &str) -> impl Future<Output = Result<Vec<SearchResult>, FetchError>>;
}

/// The results container.
pub trait ResultsPane {
    fn render(&mut self, content: ResultsContent);
}

/// Enabled flag and label of the submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitState {
    pub enabled: bool,
    pub label: String,
}

impl SubmitState {
    pub fn ready() -> Self {
        Self { enabled: true, label: SUBMIT_LABEL.to_string() }
    }

    pub fn busy() -> Self {
        Self { enabled: false, label: BUSY_LABEL.to_string() }
    }
}

impl Default for SubmitState {
    fn default() -> Self {
        Self::ready()
    }
}

/// The submit button.
pub trait SubmitControl {
    fn state(&self) -> SubmitState;
    fn set_state(&mut self, state: SubmitState);
}

// ---------------------------------------------------------------------------
// Scoped release of the submit control
// ---------------------------------------------------------------------------

/// Disables the submit control on acquire and re-enables it on drop.
///
/// Overlapping searches share one control. Only the guard that found it
/// enabled restores it, so a later search never saves and puts back the
/// busy state of an earlier one.
pub struct SubmitGuard<'a, C: SubmitControl> {
    control: &'a mut C,
    restore: Option<SubmitState>,
}

impl<'a, C: SubmitControl> SubmitGuard<'a, C> {
    pub fn acquire(control: &'a mut C) -> Self {
        let current = control.state();
        control.set_state(SubmitState::busy());
        let restore = current.enabled.then_some(current);
        Self { control, restore }
    }
}

impl<C: SubmitControl> Drop for SubmitGuard<'_, C> {
    fn drop(&mut self) {
        if let Some(state) = self.restore.take() {
            self.control.set_state(state);
        }
    }
}

// ---------------------------------------------------------------------------
// Search flow
// ---------------------------------------------------------------------------

/// Raw values of the search form at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    pub term: String,
    pub state: String,
    pub international_only: bool,
}

/// Which path a submission took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Empty term; no request was made.
    Rejected,
    /// Request succeeded with this many results.
    Results(usize),
    /// Request succeeded with an empty array.
    Empty,
    /// Transport failure, non-2xx status, or undecodable body.
    Failed,
}

/// Run one submission of the search form.
///
/// Concurrent calls are not serialized and responses are not matched to
/// requests; whichever finishes last owns the results container.
pub async fn perform_search<T, P, C>(
    transport: &T,
    pane: &mut P,
    submit: &mut C,
    input: &SearchInput,
) -> SearchOutcome
where
    T: SearchTransport,
    P: ResultsPane,
    C: SubmitControl,
{
    let Some(query) = SearchQuery::from_form(&input.term, &input.state, input.international_only) else {
        debug!("Empty search term, no request issued");
        pane.render(ResultsContent::EmptyQuery);
        return SearchOutcome::Rejected;
    };

    pane.render(ResultsContent::Loading { term: query.term.clone() });
    let _guard = SubmitGuard::acquire(submit);

    let path = query.request_path();
    debug!(path = path.as_str(), "Issuing search request");

    match transport.get_results(&path).await {
        Ok(results) => {
            let count = results.len();
            pane.render(ResultsContent::from_results(&results, &query.term, query.international_only));
            debug!(results = count, "Search complete");
            if count == 0 {
                SearchOutcome::Empty
            } else {
                SearchOutcome::Results(count)
            }
        }
        Err(e) => {
            error!(error = %e, "Search request failed");
            pane.render(ResultsContent::Error);
            SearchOutcome::Failed
        }
    }
}

// ---------------------------------------------------------------------------
// UI context
// ---------------------------------------------------------------------------

/// Everything the page handlers operate on, passed explicitly to each handler.
#[derive(Debug, Clone)]
pub struct UiContext<P, C, S> {
    pub results: P,
    pub submit: C,
    pub theme: ThemeState<S>,
    pub panel: AdvancedPanel,
}

impl<P, C, S> UiContext<P, C, S>
where
    P: ResultsPane,
    C: SubmitControl,
    S: ThemeStore,
{
    pub fn new(results: P, submit: C, store: S) -> Self {
        Self { results, submit, theme: ThemeState::load(store), panel: AdvancedPanel::default() }
    }

    pub async fn submit_search<T: SearchTransport>(&mut self, transport: &T, input: &SearchInput) -> SearchOutcome {
        perform_search(transport, &mut self.results, &mut self.submit, input).await
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle()
    }

    pub fn toggle_panel(&mut self) -> bool {
        self.panel.toggle()
    }
}
