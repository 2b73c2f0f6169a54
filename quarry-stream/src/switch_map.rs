// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Switch-map operator: maps every outer value to an inner stream and forwards
//! only the most recent one.
//!
//! When the outer stream emits, the inner stream created for the previous value
//! is dropped before the new one is created. At most one inner stream is alive
//! at any time, so items from superseded inner streams can never interleave with
//! the current one.
//!
//! # Behavior
//!
//! - Outer values are drained eagerly on every poll. If several are ready at once,
//!   each is mapped in order and every superseded inner stream is dropped unpolled.
//! - Inner values are forwarded in the order the inner stream yields them.
//! - An inner stream that completes leaves the operator waiting for the next outer value.
//! - The output completes once the outer stream has completed and the current
//!   inner stream (if any) has completed too.
//!
//! # Error Handling
//!
//! An error from either the outer or the current inner stream is emitted and
//! terminates the output. The live inner stream is dropped at that point.
//!
//! # Examples
//!
//! ```rust
//! use quarry_core::StreamItem;
//! use quarry_stream::SwitchMapExt;
//! use futures::{stream, StreamExt};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let outer = stream::iter(vec![StreamItem::Value(10)]);
//!
//! let switched = outer.switch_map(|base| {
//!     stream::iter(vec![StreamItem::Value(base + 1), StreamItem::Value(base + 2)])
//! });
//!
//! let values: Vec<_> = switched.map(|item| item.unwrap()).collect().await;
//! assert_eq!(values, vec![11, 12]);
//! # }
//! ```

use futures::stream::{FusedStream, Stream};
use pin_project::pin_project;
use quarry_core::StreamItem;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Extension trait providing the `switch_map` operator for streams of `StreamItem<T>`.
pub trait SwitchMapExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Maps each value to an inner stream, forwarding only the latest inner stream.
    ///
    /// See the [module-level documentation](crate::switch_map) for the exact semantics.
    fn switch_map<U, F>(self, f: F) -> SwitchMap<Self, U, F>
    where
        F: FnMut(T) -> U,
        U: Stream;
}

impl<S, T> SwitchMapExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn switch_map<U, F>(self, f: F) -> SwitchMap<Self, U, F>
    where
        F: FnMut(T) -> U,
        U: Stream,
    {
        SwitchMap::new(self, f)
    }
}

/// Stream returned by [`SwitchMapExt::switch_map`].
#[pin_project]
#[must_use = "streams do nothing unless polled"]
pub struct SwitchMap<S, U, F> {
    #[pin]
    outer: S,
    #[pin]
    inner: Option<U>,
    f: F,
    outer_done: bool,
    terminated: bool,
}

impl<S, U, F> SwitchMap<S, U, F> {
    fn new(outer: S, f: F) -> Self {
        Self {
            outer,
            inner: None,
            f,
            outer_done: false,
            terminated: false,
        }
    }

    /// Returns `true` while an inner stream is installed and has not completed.
    pub fn has_active_inner(&self) -> bool {
        self.inner.is_some()
    }
}

impl<S, T, U, R, F> Stream for SwitchMap<S, U, F>
where
    S: Stream<Item = StreamItem<T>>,
    U: Stream<Item = StreamItem<R>>,
    F: FnMut(T) -> U,
{
    type Item = StreamItem<R>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.terminated {
            return Poll::Ready(None);
        }

        // 1. Drain the outer stream so the newest value always wins
        while !*this.outer_done {
            match this.outer.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    // The superseded inner stream goes away before its replacement exists
                    this.inner.set(None);
                    let next = (this.f)(value);
                    this.inner.set(Some(next));
                    trace!("switch_map: switched to a new inner stream");
                }
                Poll::Ready(Some(StreamItem::Error(error))) => {
                    *this.terminated = true;
                    this.inner.set(None);
                    return Poll::Ready(Some(StreamItem::Error(error)));
                }
                Poll::Ready(None) => {
                    trace!("switch_map: outer stream completed");
                    *this.outer_done = true;
                }
                Poll::Pending => break,
            }
        }

        // 2. Forward from the current inner stream
        let polled = match this.inner.as_mut().as_pin_mut() {
            Some(inner) => inner.poll_next(cx),
            None => Poll::Ready(None),
        };

        match polled {
            Poll::Ready(Some(StreamItem::Value(value))) => {
                Poll::Ready(Some(StreamItem::Value(value)))
            }
            Poll::Ready(Some(StreamItem::Error(error))) => {
                *this.terminated = true;
                this.inner.set(None);
                Poll::Ready(Some(StreamItem::Error(error)))
            }
            Poll::Ready(None) => {
                this.inner.set(None);
                if *this.outer_done {
                    *this.terminated = true;
                    Poll::Ready(None)
                } else {
                    // The outer stream returned Pending above, so its waker is registered
                    Poll::Pending
                }
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<S, T, U, R, F> FusedStream for SwitchMap<S, U, F>
where
    S: Stream<Item = StreamItem<T>>,
    U: Stream<Item = StreamItem<R>>,
    F: FnMut(T) -> U,
{
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}
