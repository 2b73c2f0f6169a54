// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Observable provider registries and search result aggregation.
//!
//! - [`FeatureProviderRegistry`]: ordered, observable set of registered providers
//! - [`SearchResultProvider`]: the `query -> result stream` capability
//! - [`SearchResultProviderRegistry`]: registry of search providers with a query entry point
//! - [`provide_search_result`]: switch-to-latest aggregation over provider-set snapshots
//!
//! Only the first registered provider answers a query. Later providers are kept
//! in order and take over when the ones before them are unregistered.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[cfg(feature = "tracing")]
#[macro_use]
extern crate tracing;

#[macro_use]
mod logging;
pub mod feature_provider_registry;
pub mod provider;
pub mod search_result;
pub mod search_results;

pub use feature_provider_registry::{Entry, FeatureProviderRegistry, Registration};
pub use provider::{
    SearchResultProvider, SearchResultStream, SearchResults, SharedSearchResultProvider,
};
pub use search_result::SearchResult;
pub use search_results::{
    provide_search_result, SearchResultProviderRegistry, SearchResultRegistration,
};
