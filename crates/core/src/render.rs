//! What the results container shows, independent of how it is drawn.
//!
//! The web app turns [`ResultsContent`] into markup, the CLI into plain text.

use crate::types::SearchResult;

pub const EMPTY_QUERY_NOTICE: &str = "Please enter a search term";
pub const UNKNOWN_ORGANIZATION: &str = "Unknown Organization";
pub const ERROR_TITLE: &str = "Search Error";
pub const ERROR_MESSAGE: &str = "An error occurred while searching. Please try again.";
pub const ERROR_HINT: &str = "If the problem persists, try refreshing the page.";
pub const SUGGESTIONS_HEADING: &str = "Try these suggestions:";

const BASE_SUGGESTIONS: [&str; 3] = [
    "Check your spelling",
    "Try different keywords",
    "Use the Advanced Search to filter by location",
];
const INTERNATIONAL_SUGGESTION: &str = "Try searching without the \"International Only\" filter";

/// Current content of the results container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultsContent {
    #[default]
    Idle,
    /// Inline info notice for an empty search term.
    EmptyQuery,
    Loading { term: String },
    Cards(Vec<ResultCard>),
    NoResults(NoResults),
    /// Generic failure block; error details only go to the log.
    Error,
}

impl ResultsContent {
    /// Content for a decoded response.
    pub fn from_results(results: &[SearchResult], term: &str, international_only: bool) -> Self {
        if results.is_empty() {
            ResultsContent::NoResults(NoResults { term: term.to_string(), international_only })
        } else {
            ResultsContent::Cards(results.iter().map(ResultCard::from).collect())
        }
    }

    pub fn loading_message(term: &str) -> String {
        format!("Searching for \"{term}\"...")
    }
}

/// The "no results" block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoResults {
    pub term: String,
    pub international_only: bool,
}

impl NoResults {
    pub fn message(&self) -> String {
        format!("No results found for \"{}\"", self.term)
    }

    /// Suggestions in display order. The international hint only appears when
    /// that filter was active.
    pub fn suggestions(&self) -> Vec<&'static str> {
        let mut out = BASE_SUGGESTIONS.to_vec();
        if self.international_only {
            out.push(INTERNATIONAL_SUGGESTION);
        }
        out
    }
}

/// One rendered organization card. `None` lines are omitted entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub title: String,
    pub ein: Option<String>,
    pub location: Option<String>,
    /// Link target and text; opened in a new browsing context.
    pub website: Option<String>,
}

impl From<&SearchResult> for ResultCard {
    fn from(r: &SearchResult) -> Self {
        let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        ResultCard {
            title: present(&r.organization_name).unwrap_or_else(|| UNKNOWN_ORGANIZATION.to_string()),
            ein: present(&r.ein),
            location: location_line(
                r.city.as_deref(),
                r.state.as_deref(),
                r.country.as_deref(),
            ),
            website: present(&r.website),
        }
    }
}

/// Join the non-empty parts of city, state, country with ", " in that order.
pub fn location_line(city: Option<&str>, state: Option<&str>, country: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [city, state, country]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Plain-text rendering for terminals and logs.
pub fn to_plain_text(content: &ResultsContent) -> String {
    match content {
        ResultsContent::Idle => String::new(),
        ResultsContent::EmptyQuery => EMPTY_QUERY_NOTICE.to_string(),
        ResultsContent::Loading { term } => ResultsContent::loading_message(term),
        ResultsContent::Cards(cards) => {
            let mut out = String::new();
            for card in cards {
                out.push_str(&card.title);
                out.push('\n');
                if let Some(ein) = &card.ein {
                    out.push_str(&format!("  EIN: {ein}\n"));
                }
                if let Some(location) = &card.location {
                    out.push_str(&format!("  Location: {location}\n"));
                }
                if let Some(website) = &card.website {
                    out.push_str(&format!("  Website: {website}\n"));
                }
            }
            out
        }
        ResultsContent::NoResults(block) => {
            let mut out = format!("{}\n{SUGGESTIONS_HEADING}\n", block.message());
            for s in block.suggestions() {
                out.push_str(&format!("  - {s}\n"));
            }
            out
        }
        ResultsContent::Error => format!("{ERROR_TITLE}\n{ERROR_MESSAGE}\n{ERROR_HINT}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_city_only_card() {
        let r = SearchResult {
            organization_name: Some("Harbor House".into()),
            city: Some("Duluth".into()),
            ..Default::default()
        };
        let card = ResultCard::from(&r);
        assert_eq!(card.title, "Harbor House");
        assert_eq!(card.location.as_deref(), Some("Duluth"));
        assert_eq!(card.ein, None);
        assert_eq!(card.website, None);
    }

    #[test]
    fn location_skips_missing_parts_in_order() {
        assert_eq!(location_line(Some("Austin"), None, Some("United States")).as_deref(), Some("Austin, United States"));
        assert_eq!(location_line(None, Some(" "), None), None);
        assert_eq!(location_line(Some("A"), Some("B"), Some("C")).as_deref(), Some("A, B, C"));
    }

    #[test]
    fn missing_name_falls_back() {
        let card = ResultCard::from(&SearchResult::default());
        assert_eq!(card.title, UNKNOWN_ORGANIZATION);
        assert_eq!(card.location, None);
    }

    #[test]
    fn international_suggestion_only_when_filtered() {
        let plain = NoResults { term: "x".into(), international_only: false };
        let intl = NoResults { term: "x".into(), international_only: true };
        assert_eq!(plain.suggestions().len(), 3);
        assert_eq!(intl.suggestions().len(), 4);
        assert!(intl.suggestions().last().unwrap().contains("International Only"));
        assert!(!plain.suggestions().iter().any(|s| s.contains("International Only")));
    }

    #[test]
    fn empty_response_renders_no_results() {
        let content = ResultsContent::from_results(&[], "zzz", false);
        match content {
            ResultsContent::NoResults(block) => assert_eq!(block.message(), "No results found for \"zzz\""),
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn plain_text_card_omits_absent_lines() {
        let r = SearchResult {
            organization_name: Some("Harbor House".into()),
            city: Some("Duluth".into()),
            ..Default::default()
        };
        let text = to_plain_text(&ResultsContent::from_results(&[r], "harbor", false));
        assert_eq!(text, "Harbor House\n  Location: Duluth\n");
    }
}
