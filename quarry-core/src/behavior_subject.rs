// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber subject that remembers its current value.
//!
//! A [`BehaviorSubject`] broadcasts each [`StreamItem<T>`] to all active subscribers
//! and hands the current value to every new subscriber before anything else.
//!
//! ## Characteristics
//!
//! - **Replaying**: A subscriber first receives the value as it stood at subscribe time.
//! - **Unbounded**: Uses unbounded mpsc channels internally (no backpressure).
//! - **Thread-safe**: Cheap to clone; all clones share the same internal state.
//! - **Atomic updates**: [`update`](BehaviorSubject::update) reads and replaces the
//!   current value under the subject lock, so concurrent writers never lose each other's changes.
//! - **Error/close**: Errors are propagated to all subscribers and terminate the subject.
//!
//! ## Example
//!
//! ```
//! use quarry_core::{BehaviorSubject, StreamItem};
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = BehaviorSubject::new(vec![1]);
//! let mut stream = subject.subscribe().unwrap();
//!
//! subject.update(|values| values.push(2)).unwrap();
//! subject.close();
//!
//! assert_eq!(stream.next().await, Some(StreamItem::Value(vec![1])));
//! assert_eq!(stream.next().await, Some(StreamItem::Value(vec![1, 2])));
//! assert_eq!(stream.next().await, None);
//! # }
//! ```

use crate::{QuarryError, StreamItem, SubjectError};
use futures::channel::mpsc::{self, UnboundedSender};
use futures::Stream;
use parking_lot::Mutex;
use std::pin::Pin;
use std::sync::Arc;

pub type SubjectBoxStream<T> = Pin<Box<dyn Stream<Item = StreamItem<T>> + Send + 'static>>;

struct SubjectState<T> {
    closed: bool,
    current: T,
    senders: Vec<UnboundedSender<StreamItem<T>>>,
}

impl<T: Clone> SubjectState<T> {
    fn broadcast(&mut self, item: StreamItem<T>) {
        self.senders
            .retain(|tx| tx.unbounded_send(item.clone()).is_ok());
    }
}

/// A hot subject holding a current value that is replayed to new subscribers.
///
/// See the [module documentation](self) for examples and more details.
pub struct BehaviorSubject<T: Clone + Send + 'static> {
    state: Arc<Mutex<SubjectState<T>>>,
}

impl<T: Clone + Send + 'static> BehaviorSubject<T> {
    /// Creates a new open subject whose current value is `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                closed: false,
                current: initial,
                senders: Vec::new(),
            })),
        }
    }

    /// Subscribe to this subject.
    ///
    /// The returned stream yields the current value first, then every value
    /// published afterwards.
    pub fn subscribe(&self) -> Result<SubjectBoxStream<T>, SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        state.senders.retain(|tx| !tx.is_closed());

        let (tx, rx) = mpsc::unbounded();
        let _ = tx.unbounded_send(StreamItem::Value(state.current.clone()));
        state.senders.push(tx);
        Ok(Box::pin(rx))
    }

    /// Replace the current value and publish it to all subscribers.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn next(&self, value: T) -> Result<(), SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        state.current = value.clone();
        state.broadcast(StreamItem::Value(value));
        Ok(())
    }

    /// Mutate the current value in place and publish the result.
    ///
    /// The closure runs while the subject lock is held; it must not call back
    /// into the same subject.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn update<F>(&self, f: F) -> Result<(), SubjectError>
    where
        F: FnOnce(&mut T),
    {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        f(&mut state.current);
        let value = state.current.clone();
        state.broadcast(StreamItem::Value(value));
        Ok(())
    }

    /// Returns a clone of the current value.
    #[must_use]
    pub fn value(&self) -> T {
        self.state.lock().current.clone()
    }

    /// Send an error to all subscribers and terminate the subject.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject was already closed.
    pub fn error(&self, err: QuarryError) -> Result<(), SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        state.broadcast(StreamItem::Error(err));
        state.closed = true;
        state.senders.clear();
        Ok(())
    }

    /// Closes the subject, completing all subscriber streams.
    ///
    /// Closing is idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.senders.clear();
    }

    /// Returns `true` if the subject has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Returns the number of currently active subscribers.
    ///
    /// Note: dropped subscribers are removed on the next publish or subscribe, not immediately.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().senders.len()
    }
}

impl<T: Clone + Send + Default + 'static> Default for BehaviorSubject<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + 'static> Clone for BehaviorSubject<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}
