// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use quarry_core::{BehaviorSubject, QuarryError, StreamItem, SubjectError};

#[tokio::test]
async fn test_replays_current_value_on_subscribe() {
    let subject = BehaviorSubject::new(7);
    let mut stream = subject.subscribe().unwrap();

    assert_eq!(stream.next().await, Some(StreamItem::Value(7)));
}

#[tokio::test]
async fn test_late_subscriber_sees_latest_value_only() {
    let subject = BehaviorSubject::new(1);
    subject.next(2).unwrap();
    subject.next(3).unwrap();

    let mut stream = subject.subscribe().unwrap();
    subject.close();

    assert_eq!(stream.next().await, Some(StreamItem::Value(3)));
    assert_eq!(stream.next().await, None);
}

#[tokio::test]
async fn test_broadcasts_to_multiple_subscribers() {
    let subject = BehaviorSubject::new(0);
    let mut a = subject.subscribe().unwrap();
    let mut b = subject.subscribe().unwrap();

    subject.next(1).unwrap();

    assert_eq!(a.next().await, Some(StreamItem::Value(0)));
    assert_eq!(a.next().await, Some(StreamItem::Value(1)));
    assert_eq!(b.next().await, Some(StreamItem::Value(0)));
    assert_eq!(b.next().await, Some(StreamItem::Value(1)));
}

#[tokio::test]
async fn test_update_mutates_and_publishes() {
    let subject = BehaviorSubject::new(vec!["a"]);
    let mut stream = subject.subscribe().unwrap();

    subject.update(|values| values.push("b")).unwrap();

    assert_eq!(stream.next().await, Some(StreamItem::Value(vec!["a"])));
    assert_eq!(stream.next().await, Some(StreamItem::Value(vec!["a", "b"])));
    assert_eq!(subject.value(), vec!["a", "b"]);
}

#[tokio::test]
async fn test_error_is_propagated_and_closes() {
    let subject = BehaviorSubject::new(0);
    let mut stream = subject.subscribe().unwrap();

    subject.error(QuarryError::stream_error("boom")).unwrap();

    assert_eq!(stream.next().await, Some(StreamItem::Value(0)));
    assert!(matches!(stream.next().await, Some(StreamItem::Error(_))));
    assert_eq!(stream.next().await, None);
    assert!(subject.is_closed());
}

#[test]
fn test_operations_after_close_return_closed() {
    let subject = BehaviorSubject::new(0);
    subject.close();
    subject.close();

    assert_eq!(subject.next(1), Err(SubjectError::Closed));
    assert_eq!(subject.update(|v| *v += 1), Err(SubjectError::Closed));
    assert!(matches!(subject.subscribe(), Err(SubjectError::Closed)));
    assert_eq!(
        subject.error(QuarryError::stream_error("late")),
        Err(SubjectError::Closed)
    );
}

#[test]
fn test_dropped_subscribers_are_pruned_on_next_publish() {
    let subject = BehaviorSubject::new(0);
    let keep = subject.subscribe().unwrap();
    let gone = subject.subscribe().unwrap();
    assert_eq!(subject.subscriber_count(), 2);

    drop(gone);
    subject.next(1).unwrap();

    assert_eq!(subject.subscriber_count(), 1);
    drop(keep);
}

#[test]
fn test_clones_share_state() {
    let subject = BehaviorSubject::new(String::from("first"));
    let clone = subject.clone();

    clone.next(String::from("second")).unwrap();

    assert_eq!(subject.value(), "second");
}

#[test]
fn test_dropped_subscribers_are_pruned_on_subscribe() {
    let subject = BehaviorSubject::new(0u32);

    for _ in 0..1000 {
        drop(subject.subscribe().unwrap());
    }
    let _live = subject.subscribe().unwrap();

    assert_eq!(subject.subscriber_count(), 1);
}
