//! Nonprofit Search CLI — organization lookups from the terminal.
//!
//! `search` and `states` load a data directory directly with no server.
//! `remote` drives the same search controller the web page uses against a
//! running server.

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use nonprofit_search_core::client::HttpTransport;
use nonprofit_search_core::controller::{
    ResultsPane, SearchInput, SearchOutcome, SubmitControl, SubmitState, UiContext,
};
use nonprofit_search_core::query::{BackendQuery, SearchQuery};
use nonprofit_search_core::render::{to_plain_text, ResultsContent, EMPTY_QUERY_NOTICE};
use nonprofit_search_core::theme::MemoryStore;
use nonprofit_search_core::types::SearchResult;
use nonprofit_search_core::{load_dir, run_search};

/// Nonprofit Search CLI — find organizations by name, place, or EIN.
#[derive(Parser)]
#[command(name = "nps", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable text (search, states)
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a local data directory
    Search {
        /// Search term
        query: String,

        /// Data directory (default: current directory)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Restrict to one state or territory code (INT = international)
        #[arg(long, default_value = "")]
        state: String,

        /// Only search international organizations
        #[arg(long)]
        international_only: bool,

        /// Maximum number of results
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Search through a running server, exactly as the web page does
    Remote {
        /// Search term
        query: String,

        /// Server base URL
        #[arg(long, default_value = "http://127.0.0.1:8432", env = "NONPROFIT_SEARCH_URL")]
        server: String,

        /// Restrict to one state or territory code
        #[arg(long, default_value = "")]
        state: String,

        /// Only search international organizations
        #[arg(long)]
        international_only: bool,
    },
    /// List state and territory codes found in a data directory
    States {
        /// Data directory (default: current directory)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

fn resolve_data_dir(dir: Option<PathBuf>) -> PathBuf {
    let dir = dir.unwrap_or_else(|| PathBuf::from("."));
    if !dir.is_dir() {
        eprintln!("Error: data directory '{}' not found", dir.display());
        std::process::exit(1);
    }
    dir
}

// ---------------------------------------------------------------------------
// Terminal UI for the remote controller
// ---------------------------------------------------------------------------

/// Results container: progress goes to stderr, final content to stdout.
struct TerminalPane;

impl ResultsPane for TerminalPane {
    fn render(&mut self, content: ResultsContent) {
        match &content {
            ResultsContent::Loading { .. } => eprintln!("{}", to_plain_text(&content)),
            _ => {
                let mut out = std::io::stdout().lock();
                let _ = write!(out, "{}", to_plain_text(&content));
                let _ = out.flush();
            }
        }
    }
}

/// No button in a terminal; keeps the state so the controller can restore it.
#[derive(Default)]
struct TerminalSubmit {
    state: SubmitState,
}

impl SubmitControl for TerminalSubmit {
    fn state(&self) -> SubmitState {
        self.state.clone()
    }

    fn set_state(&mut self, state: SubmitState) {
        tracing::debug!(enabled = state.enabled, label = state.label.as_str(), "Submit control");
        self.state = state;
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nonprofit_search=warn".parse().expect("static directive")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search { query, data_dir, state, international_only, limit } => {
            let Some(search) = SearchQuery::from_form(&query, &state, international_only) else {
                eprintln!("{EMPTY_QUERY_NOTICE}");
                std::process::exit(2);
            };
            let index = load_dir(&resolve_data_dir(data_dir));
            let mut results = run_search(&index, &BackendQuery::from(&search));
            results.truncate(limit);

            if cli.json {
                match serde_json::to_string_pretty(&results) {
                    Ok(s) => println!("{s}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        std::process::exit(1);
                    }
                }
                return;
            }

            if results.is_empty() {
                eprintln!("No results for '{query}'");
                std::process::exit(1);
            }
            let cards: Vec<SearchResult> = results.iter().map(SearchResult::from).collect();
            let content = ResultsContent::from_results(&cards, &search.term, international_only);
            print!("{}", to_plain_text(&content));
            eprintln!("\n{} results", results.len());
        }
        Commands::Remote { query, server, state, international_only } => {
            let transport = HttpTransport::new(server);
            let mut ui = UiContext::new(TerminalPane, TerminalSubmit::default(), MemoryStore::default());
            let input = SearchInput { term: query, state, international_only };

            match ui.submit_search(&transport, &input).await {
                SearchOutcome::Results(_) => {}
                SearchOutcome::Rejected => std::process::exit(2),
                SearchOutcome::Empty | SearchOutcome::Failed => std::process::exit(1),
            }
        }
        Commands::States { data_dir } => {
            let index = load_dir(&resolve_data_dir(data_dir));
            let codes = index.state_codes();
            if cli.json {
                println!("{}", serde_json::Value::from(codes));
            } else {
                for code in &codes {
                    println!("{code}");
                }
                if index.has_international() {
                    eprintln!("(international data loaded: use --state INT)");
                }
            }
        }
    }
}
