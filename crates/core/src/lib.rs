//! Nonprofit Search — core library.
//!
//! Shared by the HTTP API, the CLI, and the web page.
//!
//! # Modules
//!
//! - [`types`] — Search results, loaded records, datasets, configuration
//! - [`query`] — Search form validation and `/search` parameter encoding
//! - [`render`] — Results container content: cards, no-results block, errors
//! - [`controller`] — Search submission flow and the page's UI context
//! - [`theme`] — Light/dark preference and its persistence
//! - [`panel`] — Advanced search panel visibility
//! - [`client`] — HTTP transport for the controller (feature `client`)
//! - [`dataset`] — Data file discovery and loading (feature `backend`)
//! - [`search`] — Matching and relevance ranking (feature `backend`)
//! - [`config`] — `nonprofit-search.toml` loading (feature `backend`)

pub mod controller;
pub mod panel;
pub mod query;
pub mod render;
pub mod theme;
pub mod types;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "backend")]
pub mod config;
#[cfg(feature = "backend")]
pub mod dataset;
#[cfg(feature = "backend")]
pub mod search;

#[cfg(feature = "backend")]
pub use dataset::load_dir;
#[cfg(feature = "backend")]
pub use search::run_search;
