// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A search result provider whose answers are pushed by the test.
//!
//! Every call to [`provide_search_result`](SearchResultProvider::provide_search_result)
//! records the query and opens a fresh channel. The test gets the sending half
//! through [`RecordingProvider::sender`], so it can emit answers, inject errors,
//! and observe with [`UnboundedSender::is_closed`] whether the aggregator is still
//! listening to that invocation.

use futures::StreamExt;
use parking_lot::Mutex;
use quarry_core::StreamItem;
use quarry_registry::{
    SearchResultProvider, SearchResultStream, SearchResults, SharedSearchResultProvider,
};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;

pub type ResultSender = UnboundedSender<StreamItem<SearchResults>>;

#[derive(Default)]
struct Recorded {
    queries: Vec<String>,
    senders: Vec<ResultSender>,
}

/// Records every invocation and hands out one sender per invocation.
///
/// Clones share the same record.
#[derive(Clone, Default)]
pub struct RecordingProvider {
    recorded: Arc<Mutex<Recorded>>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queries received so far, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.recorded.lock().queries.clone()
    }

    pub fn call_count(&self) -> usize {
        self.recorded.lock().queries.len()
    }

    /// Sender feeding the stream returned by the `call`-th invocation (0-based).
    pub fn sender(&self, call: usize) -> Option<ResultSender> {
        self.recorded.lock().senders.get(call).cloned()
    }

    /// Sender feeding the stream returned by the most recent invocation.
    pub fn last_sender(&self) -> Option<ResultSender> {
        self.recorded.lock().senders.last().cloned()
    }

    /// This provider as a registry-ready shared handle.
    pub fn shared(&self) -> SharedSearchResultProvider {
        Arc::new(self.clone())
    }
}

impl SearchResultProvider for RecordingProvider {
    fn provide_search_result(&self, query: &str) -> SearchResultStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut recorded = self.recorded.lock();
        recorded.queries.push(query.to_owned());
        recorded.senders.push(tx);
        UnboundedReceiverStream::new(rx).boxed()
    }
}
