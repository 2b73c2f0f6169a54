// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Quarry
//!
//! Pluggable search result providers, collected in observable registries and
//! aggregated into a single reactive result stream.
//!
//! ## Overview
//!
//! - Providers implement [`SearchResultProvider`]: a query goes in, a stream of
//!   answers comes out.
//! - A [`SearchResultProviderRegistry`] keeps the registered providers in order and
//!   publishes the full set every time it changes.
//! - [`SearchResultProviderRegistry::provide_search_result`] follows those changes
//!   with switch-to-latest semantics: the first registered provider answers, and a
//!   change of the set replaces the answering stream.
//!
//! ## Quick Start
//!
//! ```rust
//! use quarry::prelude::*;
//! use futures::{stream, StreamExt};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let registry = SearchResultProviderRegistry::new();
//! let _registration = registry.register(|query: &str| {
//!     stream::iter(vec![StreamItem::Value(Some(vec![SearchResult::new(query)]))])
//! });
//!
//! let mut results = registry.provide_search_result("needle");
//! let answer = results.next().await.unwrap().unwrap();
//! assert_eq!(answer, Some(vec![SearchResult::new("needle")]));
//! # }
//! ```

pub use quarry_core::{BehaviorSubject, QuarryError, Result, StreamItem, SubjectError};
pub use quarry_registry::{
    provide_search_result, Entry, FeatureProviderRegistry, Registration, SearchResult,
    SearchResultProvider, SearchResultProviderRegistry, SearchResultRegistration,
    SearchResultStream, SearchResults, SharedSearchResultProvider,
};
pub use quarry_stream::{SwitchMap, SwitchMapExt};

/// Prelude module for convenient imports
pub mod prelude {
    pub use quarry_core::{QuarryError, StreamItem};
    pub use quarry_registry::{
        SearchResult, SearchResultProvider, SearchResultProviderRegistry, SearchResults,
    };
    pub use quarry_stream::SwitchMapExt;
}
