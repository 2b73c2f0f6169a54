// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the quarry workspace.
//!
//! Tests push values in imperatively through tokio channels while the code under
//! test consumes plain streams:
//!
//! - [`test_channel`] / [`test_channel_with_errors`]: a sender plus a `StreamItem` stream
//! - [`helpers`]: timed assertions on streams
//! - [`RecordingProvider`]: a search result provider driven by the test
//! - [`test_data`]: search result fixtures
//!
//! # Example
//!
//! ```rust
//! use quarry_test_utils::{helpers::unwrap_value, test_channel};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, mut stream) = test_channel();
//! tx.send(42).unwrap();
//!
//! assert_eq!(unwrap_value(&mut stream, 100).await, 42);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod recording_provider;
pub mod test_data;

use futures::{Stream, StreamExt};
use quarry_core::StreamItem;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use helpers::assert_no_element_emitted;
pub use recording_provider::RecordingProvider;

/// Creates a test channel that automatically wraps values in `StreamItem::Value`.
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that accepts `StreamItem<T>` for testing error propagation.
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}
