// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::StreamExt;
use futures::Stream;
use quarry_core::StreamItem;
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Asserts that `stream` stays silent for `timeout_ms` milliseconds.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    tokio::select! {
        item = stream.next() => {
            panic!("Unexpected item emitted, expected no output: {item:?}");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

/// Waits up to `timeout_ms` for the next item.
///
/// # Panics
///
/// Panics if the stream ends or the timeout elapses first.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> StreamItem<T>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(item)) => item,
        Ok(None) => panic!("Stream ended while an item was expected"),
        Err(_) => panic!("Timed out after {timeout_ms}ms waiting for an item"),
    }
}

/// Waits up to `timeout_ms` for the next item and expects it to be a value.
///
/// # Panics
///
/// Panics if the next item is an error, the stream ends, or the timeout elapses.
pub async fn unwrap_value<S, T>(stream: &mut S, timeout_ms: u64) -> T
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    match unwrap_stream(stream, timeout_ms).await {
        StreamItem::Value(value) => value,
        StreamItem::Error(err) => panic!("Expected a value, got error: {err}"),
    }
}

/// Asserts that `stream` completes within `timeout_ms` without emitting anything.
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(None) => {}
        Ok(Some(item)) => panic!("Expected stream to end, got {item:?}"),
        Err(_) => panic!("Timed out after {timeout_ms}ms waiting for the stream to end"),
    }
}
