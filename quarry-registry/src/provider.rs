// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The search result provider capability.
//!
//! A provider turns a query into a stream of answers. Each answer is either a
//! list of results or `None`, meaning "no answer yet" or "no results". Errors
//! travel as [`StreamItem::Error`] and end the provider's stream.
//!
//! Any `Fn(&str) -> S` closure returning a suitable stream is a provider:
//!
//! ```rust
//! use quarry_core::StreamItem;
//! use quarry_registry::{SearchResult, SearchResultProvider};
//! use futures::{stream, StreamExt};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let provider = |query: &str| {
//!     let hit = SearchResult::new(format!("match for {query}"));
//!     stream::iter(vec![StreamItem::Value(Some(vec![hit]))])
//! };
//!
//! let mut results = provider.provide_search_result("foo");
//! let first = results.next().await.unwrap().unwrap().unwrap();
//! assert_eq!(first[0].title, "match for foo");
//! # }
//! ```

use crate::search_result::SearchResult;
use futures::stream::{BoxStream, Stream, StreamExt};
use quarry_core::StreamItem;
use std::sync::Arc;

/// One answer from a provider: the results, or `None` when there is nothing to show.
pub type SearchResults = Option<Vec<SearchResult>>;

/// The stream a provider returns for a query.
pub type SearchResultStream = BoxStream<'static, StreamItem<SearchResults>>;

/// A registered provider, shared between the registry and every snapshot of it.
pub type SharedSearchResultProvider = Arc<dyn SearchResultProvider>;

/// Capability to answer a search query with a stream of results.
pub trait SearchResultProvider: Send + Sync {
    /// Starts answering `query`. Dropping the returned stream cancels the work.
    fn provide_search_result(&self, query: &str) -> SearchResultStream;
}

impl<F, S> SearchResultProvider for F
where
    F: Fn(&str) -> S + Send + Sync,
    S: Stream<Item = StreamItem<SearchResults>> + Send + 'static,
{
    fn provide_search_result(&self, query: &str) -> SearchResultStream {
        self(query).boxed()
    }
}
