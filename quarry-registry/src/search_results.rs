// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Search result aggregation over a live provider set.
//!
//! [`provide_search_result`] turns a stream of provider-set snapshots into one
//! stream of answers for a query:
//!
//! - An empty snapshot yields a single `None` and subscribes to nothing.
//! - A non-empty snapshot consults only the provider at index 0 and forwards
//!   everything it emits. Providers at index 1 and later are never invoked.
//! - A new snapshot drops the previously selected provider stream before the
//!   next provider is asked, so stale answers are never forwarded.
//! - A provider error is forwarded as-is and ends the output. There is no retry
//!   and no fallback to the next provider.
//!
//! # Examples
//!
//! ```rust
//! use quarry_core::StreamItem;
//! use quarry_registry::{SearchResult, SearchResultProviderRegistry};
//! use futures::{stream, StreamExt};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let registry = SearchResultProviderRegistry::new();
//!
//! let mut before = registry.provide_search_result("foo");
//! assert_eq!(before.next().await, Some(StreamItem::Value(None)));
//!
//! let _registration = registry.register(|_query: &str| {
//!     stream::iter(vec![
//!         StreamItem::Value(Some(vec![SearchResult::new("r1")])),
//!         StreamItem::Value(Some(vec![SearchResult::new("r1"), SearchResult::new("r2")])),
//!     ])
//! });
//!
//! let mut after = registry.provide_search_result("foo");
//! assert_eq!(
//!     after.next().await,
//!     Some(StreamItem::Value(Some(vec![SearchResult::new("r1")])))
//! );
//! assert_eq!(
//!     after.next().await,
//!     Some(StreamItem::Value(Some(vec![SearchResult::new("r1"), SearchResult::new("r2")])))
//! );
//! # }
//! ```

use crate::feature_provider_registry::{FeatureProviderRegistry, Registration};
use crate::provider::{
    SearchResultProvider, SearchResultStream, SearchResults, SharedSearchResultProvider,
};
use futures::future::ready;
use futures::stream::{self, Stream, StreamExt};
use quarry_core::StreamItem;
use quarry_stream::SwitchMapExt;
use std::ops::Deref;
use std::sync::Arc;

/// Handle returned when a search result provider is registered.
pub type SearchResultRegistration = Registration<(), SharedSearchResultProvider>;

/// Registry of [`SearchResultProvider`]s with a query entry point.
///
/// Dereferences to the underlying [`FeatureProviderRegistry`] for snapshots,
/// bulk registration and entry streams.
#[derive(Clone, Default)]
pub struct SearchResultProviderRegistry {
    registry: FeatureProviderRegistry<(), SharedSearchResultProvider>,
}

impl SearchResultProviderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with `providers`, in order.
    #[must_use]
    pub fn with_providers(providers: Vec<SharedSearchResultProvider>) -> Self {
        let entries = providers
            .into_iter()
            .map(|provider| crate::Entry::new((), provider))
            .collect();

        Self {
            registry: FeatureProviderRegistry::with_entries(entries),
        }
    }

    /// Registers a provider. Subscribers of [`providers`](FeatureProviderRegistry::providers)
    /// and outstanding searches see the new set immediately.
    pub fn register<P>(&self, provider: P) -> SearchResultRegistration
    where
        P: SearchResultProvider + 'static,
    {
        self.registry.register_provider((), Arc::new(provider))
    }

    /// Registers an already shared provider.
    pub fn register_shared(&self, provider: SharedSearchResultProvider) -> SearchResultRegistration {
        self.registry.register_provider((), provider)
    }

    /// Answers `query` from the live provider set.
    ///
    /// The output follows every later change of the registry until it is dropped.
    pub fn provide_search_result(
        &self,
        query: &str,
    ) -> impl Stream<Item = StreamItem<SearchResults>> + Send + 'static {
        provide_search_result(self.registry.providers(), query)
    }
}

impl Deref for SearchResultProviderRegistry {
    type Target = FeatureProviderRegistry<(), SharedSearchResultProvider>;

    fn deref(&self) -> &Self::Target {
        &self.registry
    }
}

/// Answers `query` from whichever provider is first in the latest snapshot.
///
/// See the [module-level documentation](crate::search_results) for the selection
/// and switching rules.
pub fn provide_search_result<S>(
    providers: S,
    query: &str,
) -> impl Stream<Item = StreamItem<SearchResults>> + Send
where
    S: Stream<Item = StreamItem<Vec<SharedSearchResultProvider>>> + Send,
{
    let query = query.to_owned();

    providers
        .switch_map(move |providers: Vec<SharedSearchResultProvider>| -> SearchResultStream {
            match providers.first() {
                None => {
                    trace!("provide_search_result: no providers registered");
                    stream::once(ready(StreamItem::Value(None))).boxed()
                }
                Some(provider) => {
                    trace!(
                        "provide_search_result: consulting first of {} provider(s)",
                        providers.len()
                    );
                    provider.provide_search_result(&query)
                }
            }
        })
        .inspect(|item| {
            if let StreamItem::Error(err) = item {
                warn!("provide_search_result: search ended with error: {}", err);
            }
        })
}
