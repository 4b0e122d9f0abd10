//! Substring matching and relevance ranking over the loaded datasets.
//!
//! A record matches when the term occurs in any of its values. Matches are
//! ordered by a weighted count of query words found per column, with higher
//! weights for international organizations, and returned title-cased.

use std::cmp::Ordering;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::query::{BackendQuery, SearchScope};
use crate::types::*;

// ---------------------------------------------------------------------------
// Column weights: (international, domestic)
// ---------------------------------------------------------------------------

const WEIGHT_NAME: (f64, f64) = (4.0, 3.0);
const WEIGHT_COUNTRY: (f64, f64) = (3.0, 2.0);
const WEIGHT_CITY: (f64, f64) = (2.0, 1.0);
const WEIGHT_STATE: (f64, f64) = (1.0, 1.0);
const WEIGHT_OTHER: (f64, f64) = (1.0, 0.5);

/// Country value of domestic organizations (stored lowercased).
const DOMESTIC_COUNTRY: &str = "united states";

fn weight(w: (f64, f64), international: bool) -> f64 {
    if international {
        w.0
    } else {
        w.1
    }
}

fn word_hits(text: &str, words: &[&str]) -> usize {
    words.iter().filter(|w| text.contains(*w)).count()
}

/// Relevance of a (normalized) record for the given query words.
pub fn relevance_score(record: &OrgRecord, words: &[&str]) -> f64 {
    let international = record.get(COL_COUNTRY).unwrap_or("") != DOMESTIC_COUNTRY;

    record
        .iter()
        .map(|(column, value)| {
            let w = match column {
                COL_NAME => WEIGHT_NAME,
                COL_COUNTRY => WEIGHT_COUNTRY,
                COL_CITY => WEIGHT_CITY,
                COL_STATE => WEIGHT_STATE,
                _ => WEIGHT_OTHER,
            };
            word_hits(value, words) as f64 * weight(w, international)
        })
        .sum()
}

fn datasets_in_scope<'a>(index: &'a NonprofitIndex, scope: &SearchScope) -> Vec<&'a Dataset> {
    match scope {
        SearchScope::International => match index.get(INTERNATIONAL_CODE) {
            Some(d) => vec![d],
            None => {
                warn!("No international data available");
                vec![]
            }
        },
        SearchScope::State(code) => match index.get(code) {
            Some(d) => vec![d],
            None => {
                warn!(state = code.as_str(), "State not found in data");
                vec![]
            }
        },
        // International first, then location codes alphabetically.
        SearchScope::All => index
            .get(INTERNATIONAL_CODE)
            .into_iter()
            .chain(index.datasets.values().filter(|d| d.code != INTERNATIONAL_CODE))
            .collect(),
    }
}

/// Run a backend query. An empty term returns no results.
///
/// Results keep dataset order among equal scores.
pub fn run_search(index: &NonprofitIndex, query: &BackendQuery) -> Vec<OrgRecord> {
    if query.term.is_empty() {
        debug!("Empty query received, returning empty results");
        return Vec::new();
    }

    let start = Instant::now();
    let term = query.term.as_str();

    let mut matches: Vec<&OrgRecord> = Vec::new();
    for dataset in datasets_in_scope(index, &query.scope) {
        let found: Vec<&OrgRecord> = dataset.records.par_iter().filter(|r| r.contains(term)).collect();
        debug!(code = dataset.code.as_str(), results = found.len(), "Searched dataset");
        matches.extend(found);
    }

    let words: Vec<&str> = term.split_whitespace().collect();
    let mut scored: Vec<(f64, &OrgRecord)> =
        matches.par_iter().map(|r| (relevance_score(r, &words), *r)).collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let results: Vec<OrgRecord> = scored.into_iter().map(|(_, r)| r.to_display()).collect();

    info!(
        term = term,
        scope = ?query.scope,
        results = results.len(),
        time_ms = start.elapsed().as_millis() as u64,
        "Search complete"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> OrgRecord {
        let mut r = OrgRecord::new();
        for (c, v) in pairs {
            r.set(c, v);
        }
        r
    }

    fn index() -> NonprofitIndex {
        let mut index = NonprofitIndex::default();
        let mut add = |code: &str, records: Vec<OrgRecord>| {
            index.datasets.insert(code.to_string(), Dataset { code: code.to_string(), records, ..Default::default() });
        };
        add(
            "CA",
            vec![
                record(&[(COL_NAME, "Ocean Friends"), (COL_CITY, "Monterey"), (COL_STATE, "CA"), (COL_COUNTRY, "United States")]),
                record(&[(COL_NAME, "Bay Food Bank"), (COL_CITY, "Oakland"), (COL_STATE, "CA"), (COL_COUNTRY, "United States")]),
            ],
        );
        add(
            "TX",
            vec![record(&[(COL_NAME, "Lone Star Food Bank"), (COL_CITY, "Austin"), (COL_STATE, "TX"), (COL_COUNTRY, "United States")])],
        );
        add(
            INTERNATIONAL_CODE,
            vec![record(&[(COL_NAME, "Food For All"), (COL_COUNTRY, "Kenya"), (COL_PC, "FORGN")])],
        );
        index
    }

    fn query(term: &str, scope: SearchScope) -> BackendQuery {
        BackendQuery { term: term.to_string(), scope }
    }

    fn names(results: &[OrgRecord]) -> Vec<&str> {
        results.iter().map(|r| r.get(COL_NAME).unwrap()).collect()
    }

    #[test]
    fn empty_term_returns_nothing() {
        assert!(run_search(&index(), &query("", SearchScope::All)).is_empty());
    }

    #[test]
    fn all_scope_searches_every_dataset() {
        let results = run_search(&index(), &query("food", SearchScope::All));
        assert_eq!(results.len(), 3);
        // International name hit weighs 4, domestic 3.
        assert_eq!(names(&results)[0], "Food For All");
    }

    #[test]
    fn state_scope_limits_to_one_dataset() {
        let results = run_search(&index(), &query("food", SearchScope::State("TX".into())));
        assert_eq!(names(&results), vec!["Lone Star Food Bank"]);
    }

    #[test]
    fn unknown_state_is_empty() {
        assert!(run_search(&index(), &query("food", SearchScope::State("ZZ".into()))).is_empty());
    }

    #[test]
    fn international_scope_only_searches_int() {
        let results = run_search(&index(), &query("food", SearchScope::International));
        assert_eq!(names(&results), vec!["Food For All"]);
    }

    #[test]
    fn match_can_come_from_any_column() {
        let results = run_search(&index(), &query("monterey", SearchScope::All));
        assert_eq!(names(&results), vec!["Ocean Friends"]);
    }

    #[test]
    fn results_are_title_cased() {
        let results = run_search(&index(), &query("oakland", SearchScope::All));
        assert_eq!(results[0].get(COL_CITY), Some("Oakland"));
        assert_eq!(results[0].get(COL_STATE), Some("Ca"));
    }

    #[test]
    fn score_weights_columns() {
        let domestic = record(&[(COL_NAME, "river trust"), (COL_CITY, "river city"), (COL_COUNTRY, "united states"), (COL_WEBSITE, "river.org")]);
        // name 3 + city 1 + other 0.5
        assert_eq!(relevance_score(&domestic, &["river"]), 4.5);

        let foreign = record(&[(COL_NAME, "river trust"), (COL_CITY, "river city"), (COL_WEBSITE, "river.org")]);
        // name 4 + city 2 + other 1
        assert_eq!(relevance_score(&foreign, &["river"]), 7.0);
    }

    #[test]
    fn international_wins_ties_across_all_datasets() {
        let mut index = NonprofitIndex::default();
        for (code, name, state) in [("CA", "domestic", "ks"), ("IL", "midwest", "ks"), (INTERNATIONAL_CODE, "intl", "ks")] {
            let records = vec![record(&[(COL_NAME, name), (COL_STATE, state), (COL_COUNTRY, "united states")])];
            index.datasets.insert(code.to_string(), Dataset { code: code.to_string(), records, ..Default::default() });
        }
        // Every record only matches in State, all scoring 1.
        let results = run_search(&index, &query("ks", SearchScope::All));
        assert_eq!(names(&results), vec!["Intl", "Domestic", "Midwest"]);
    }

    #[test]
    fn equal_scores_keep_dataset_order() {
        let results = run_search(&index(), &query("bank", SearchScope::All));
        assert_eq!(names(&results), vec!["Bay Food Bank", "Lone Star Food Bank"]);
    }
}
