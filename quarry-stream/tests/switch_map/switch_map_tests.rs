// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::{self, FusedStream, StreamExt};
use quarry_core::StreamItem;
use quarry_stream::SwitchMapExt;
use quarry_test_utils::{
    helpers::{assert_no_element_emitted, assert_stream_ended, unwrap_value},
    test_channel,
};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedSender;

type InnerSenders = Arc<Mutex<Vec<(u32, UnboundedSender<String>)>>>;

fn inner_sender(senders: &InnerSenders, key: u32) -> UnboundedSender<String> {
    senders
        .lock()
        .unwrap()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, tx)| tx.clone())
        .expect("inner stream was never created")
}

#[tokio::test]
async fn test_switch_map_forwards_inner_values_in_order() -> anyhow::Result<()> {
    // Arrange
    let (tx, outer) = test_channel();
    let mut result = outer.switch_map(|base: u32| {
        stream::iter(vec![
            StreamItem::Value(base + 1),
            StreamItem::Value(base + 2),
            StreamItem::Value(base + 3),
        ])
    });

    // Act
    tx.send(10)?;

    // Assert
    assert_eq!(unwrap_value(&mut result, 100).await, 11);
    assert_eq!(unwrap_value(&mut result, 100).await, 12);
    assert_eq!(unwrap_value(&mut result, 100).await, 13);
    assert_no_element_emitted(&mut result, 50).await;

    Ok(())
}

#[tokio::test]
async fn test_switch_map_drops_superseded_inner_stream() -> anyhow::Result<()> {
    // Arrange
    let senders: InnerSenders = Arc::default();
    let (tx, outer) = test_channel();
    let mut result = outer.switch_map({
        let senders = Arc::clone(&senders);
        move |key: u32| {
            let (inner_tx, inner) = test_channel::<String>();
            senders.lock().unwrap().push((key, inner_tx));
            inner
        }
    });

    tx.send(1)?;
    assert_no_element_emitted(&mut result, 50).await;
    let first = inner_sender(&senders, 1);

    first.send("first-a".to_string())?;
    assert_eq!(unwrap_value(&mut result, 100).await, "first-a");

    // Act - switch, then let the superseded inner stream emit
    tx.send(2)?;
    first.send("first-stale".to_string())?;

    // Assert
    assert_no_element_emitted(&mut result, 50).await;
    assert!(first.is_closed());

    let second = inner_sender(&senders, 2);
    second.send("second-a".to_string())?;
    assert_eq!(unwrap_value(&mut result, 100).await, "second-a");
    assert!(!second.is_closed());

    Ok(())
}

#[tokio::test]
async fn test_switch_map_keeps_only_newest_of_ready_outer_values() {
    // Arrange
    let calls = Arc::new(Mutex::new(Vec::new()));
    let outer = stream::iter(vec![
        StreamItem::Value(1),
        StreamItem::Value(2),
        StreamItem::Value(3),
    ]);

    // Act
    let result = outer.switch_map({
        let calls = Arc::clone(&calls);
        move |value: i32| {
            calls.lock().unwrap().push(value);
            stream::iter(vec![StreamItem::Value(value * 10)])
        }
    });
    let values: Vec<i32> = result.map(StreamItem::unwrap).collect().await;

    // Assert
    assert_eq!(values, vec![30]);
    assert_eq!(*calls.lock().unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_switch_map_waits_after_inner_completes() -> anyhow::Result<()> {
    // Arrange
    let (tx, outer) = test_channel();
    let mut result = outer.switch_map(|value: u32| stream::iter(vec![StreamItem::Value(value)]));

    // Act & Assert
    tx.send(1)?;
    assert_eq!(unwrap_value(&mut result, 100).await, 1);
    assert_no_element_emitted(&mut result, 50).await;
    assert!(!result.is_terminated());

    tx.send(2)?;
    assert_eq!(unwrap_value(&mut result, 100).await, 2);

    Ok(())
}

#[tokio::test]
async fn test_switch_map_empty_inner_streams_emit_nothing() -> anyhow::Result<()> {
    // Arrange
    let (tx, outer) = test_channel();
    let mut result = outer.switch_map(|_: u32| stream::empty::<StreamItem<u32>>());

    // Act
    tx.send(1)?;
    tx.send(2)?;

    // Assert
    assert_no_element_emitted(&mut result, 50).await;

    Ok(())
}

#[tokio::test]
async fn test_switch_map_outlives_outer_until_inner_completes() -> anyhow::Result<()> {
    // Arrange
    let senders: InnerSenders = Arc::default();
    let (tx, outer) = test_channel();
    let mut result = outer.switch_map({
        let senders = Arc::clone(&senders);
        move |key: u32| {
            let (inner_tx, inner) = test_channel::<String>();
            senders.lock().unwrap().push((key, inner_tx));
            inner
        }
    });

    tx.send(7)?;
    assert_no_element_emitted(&mut result, 50).await;

    // Act - the outer stream completes while the inner one is live
    drop(tx);
    let inner = inner_sender(&senders, 7);
    inner.send("still-forwarded".to_string())?;

    // Assert
    assert_eq!(unwrap_value(&mut result, 100).await, "still-forwarded");

    senders.lock().unwrap().clear();
    drop(inner);
    assert_stream_ended(&mut result, 100).await;
    assert!(result.is_terminated());

    Ok(())
}

#[tokio::test]
async fn test_switch_map_ends_when_outer_ends_without_values() {
    // Arrange
    let outer = stream::empty::<StreamItem<u32>>();
    let mut result = outer.switch_map(|value: u32| stream::iter(vec![StreamItem::Value(value)]));

    // Act & Assert
    assert_stream_ended(&mut result, 100).await;
    assert!(result.is_terminated());
    assert_eq!(result.next().await, None);
}

#[tokio::test]
async fn test_switch_map_reports_active_inner() -> anyhow::Result<()> {
    // Arrange
    let (tx, outer) = test_channel();
    let mut result = outer.switch_map(|_: u32| stream::pending::<StreamItem<u32>>());
    assert!(!result.has_active_inner());

    // Act
    tx.send(1)?;
    assert_no_element_emitted(&mut result, 50).await;

    // Assert
    assert!(result.has_active_inner());

    Ok(())
}
