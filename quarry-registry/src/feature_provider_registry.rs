// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A generic, observable registry of feature providers.
//!
//! [`FeatureProviderRegistry`] holds an ordered list of [`Entry`] values, each pairing
//! a provider with the options it was registered with. The list lives in a
//! [`BehaviorSubject`], so every subscriber to [`entries`](FeatureProviderRegistry::entries)
//! or [`providers`](FeatureProviderRegistry::providers) first receives the set as it
//! stands at subscribe time and then a fresh snapshot after every change.
//!
//! Registration order is preserved and duplicates are allowed. Each call to
//! [`register_provider`](FeatureProviderRegistry::register_provider) or
//! [`register_providers`](FeatureProviderRegistry::register_providers) returns a
//! [`Registration`] that removes exactly the entries added by that call.
//!
//! # Examples
//!
//! ```rust
//! use quarry_core::StreamItem;
//! use quarry_registry::FeatureProviderRegistry;
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let registry = FeatureProviderRegistry::<&'static str, u32>::new();
//! let mut providers = registry.providers();
//!
//! let registration = registry.register_provider("first", 1);
//! registration.unregister();
//!
//! assert_eq!(providers.next().await, Some(StreamItem::Value(vec![])));
//! assert_eq!(providers.next().await, Some(StreamItem::Value(vec![1])));
//! assert_eq!(providers.next().await, Some(StreamItem::Value(vec![])));
//! # }
//! ```

use futures::future::ready;
use futures::stream::{self, BoxStream, StreamExt};
use quarry_core::{BehaviorSubject, StreamItem};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A provider together with the options it was registered with.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<O, P> {
    pub registration_options: O,
    pub provider: P,
}

impl<O, P> Entry<O, P> {
    pub fn new(registration_options: O, provider: P) -> Self {
        Self {
            registration_options,
            provider,
        }
    }
}

#[derive(Clone)]
pub(crate) struct Registered<O, P> {
    id: u64,
    entry: Entry<O, P>,
}

/// Observable, ordered collection of registered providers.
///
/// Cheap to clone; all clones share the same entries.
///
/// See the [module-level documentation](crate::feature_provider_registry) for details.
pub struct FeatureProviderRegistry<O, P>
where
    O: Clone + Send + 'static,
    P: Clone + Send + 'static,
{
    entries: BehaviorSubject<Vec<Registered<O, P>>>,
    next_id: Arc<AtomicU64>,
}

impl<O, P> FeatureProviderRegistry<O, P>
where
    O: Clone + Send + 'static,
    P: Clone + Send + 'static,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_entries(Vec::new())
    }

    /// Creates a registry seeded with `entries`, in order.
    ///
    /// Seeded entries have no [`Registration`] and stay for the registry's lifetime.
    #[must_use]
    pub fn with_entries(entries: Vec<Entry<O, P>>) -> Self {
        let next_id = Arc::new(AtomicU64::new(0));
        let seeded = entries
            .into_iter()
            .map(|entry| Registered {
                id: next_id.fetch_add(1, Ordering::Relaxed),
                entry,
            })
            .collect();

        Self {
            entries: BehaviorSubject::new(seeded),
            next_id,
        }
    }

    /// Registers a single provider. Current and future subscribers observe it.
    pub fn register_provider(&self, registration_options: O, provider: P) -> Registration<O, P> {
        self.register_providers(vec![Entry::new(registration_options, provider)])
    }

    /// Registers several providers at once, publishing a single new snapshot.
    pub fn register_providers(&self, entries: Vec<Entry<O, P>>) -> Registration<O, P> {
        let added: Vec<Registered<O, P>> = entries
            .into_iter()
            .map(|entry| Registered {
                id: self.next_id.fetch_add(1, Ordering::Relaxed),
                entry,
            })
            .collect();
        let ids: Vec<u64> = added.iter().map(|registered| registered.id).collect();

        let result = self.entries.update(|current| {
            current.extend(added);
            debug!(
                "provider registry: registered {} provider(s), {} now registered",
                ids.len(),
                current.len()
            );
        });
        if let Err(err) = result {
            error!("provider registry: registration dropped: {}", err);
        }

        Registration {
            ids,
            entries: self.entries.clone(),
        }
    }

    /// Stream of entry snapshots, starting with the current set.
    pub fn entries(&self) -> BoxStream<'static, StreamItem<Vec<Entry<O, P>>>> {
        self.snapshots(|registered| registered.entry)
    }

    /// Stream of provider snapshots, starting with the current set.
    pub fn providers(&self) -> BoxStream<'static, StreamItem<Vec<P>>> {
        self.snapshots(|registered| registered.entry.provider)
    }

    /// The entries registered right now.
    #[must_use]
    pub fn entries_snapshot(&self) -> Vec<Entry<O, P>> {
        self.entries
            .value()
            .into_iter()
            .map(|registered| registered.entry)
            .collect()
    }

    /// The providers registered right now, in registration order.
    #[must_use]
    pub fn providers_snapshot(&self) -> Vec<P> {
        self.entries
            .value()
            .into_iter()
            .map(|registered| registered.entry.provider)
            .collect()
    }

    /// Number of providers registered right now.
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.entries.value().len()
    }

    fn snapshots<T, F>(&self, project: F) -> BoxStream<'static, StreamItem<Vec<T>>>
    where
        T: Send + 'static,
        F: Fn(Registered<O, P>) -> T + Send + Sync + 'static,
    {
        match self.entries.subscribe() {
            Ok(stream) => stream
                .map(move |item| item.map(|entries| entries.into_iter().map(&project).collect()))
                .boxed(),
            Err(err) => stream::once(ready(StreamItem::Error(err.into()))).boxed(),
        }
    }
}

impl<O, P> Default for FeatureProviderRegistry<O, P>
where
    O: Clone + Send + 'static,
    P: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<O, P> Clone for FeatureProviderRegistry<O, P>
where
    O: Clone + Send + 'static,
    P: Clone + Send + 'static,
{
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

/// Handle for the entries added by one registration call.
///
/// Dropping the handle leaves the entries registered.
#[must_use = "keep the Registration to unregister the providers later"]
pub struct Registration<O, P>
where
    O: Clone + Send + 'static,
    P: Clone + Send + 'static,
{
    ids: Vec<u64>,
    entries: BehaviorSubject<Vec<Registered<O, P>>>,
}

impl<O, P> Registration<O, P>
where
    O: Clone + Send + 'static,
    P: Clone + Send + 'static,
{
    /// Removes the entries added by this registration and publishes the new set.
    ///
    /// Other entries, including duplicates of the same provider registered
    /// separately, are left in place.
    pub fn unregister(self) {
        let ids = self.ids;
        let result = self.entries.update(|current| {
            current.retain(|registered| !ids.contains(&registered.id));
            debug!(
                "provider registry: unregistered {} provider(s), {} still registered",
                ids.len(),
                current.len()
            );
        });
        if let Err(err) = result {
            error!("provider registry: unregistration dropped: {}", err);
        }
    }
}
