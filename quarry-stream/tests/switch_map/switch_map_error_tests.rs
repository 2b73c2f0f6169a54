// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::{self, FusedStream};
use quarry_core::{QuarryError, StreamItem};
use quarry_stream::SwitchMapExt;
use quarry_test_utils::{
    helpers::{assert_stream_ended, unwrap_stream, unwrap_value},
    test_channel, test_channel_with_errors,
};

#[tokio::test]
async fn test_switch_map_propagates_inner_error_and_terminates() -> anyhow::Result<()> {
    // Arrange
    let (tx, outer) = test_channel();
    let mut result = outer.switch_map(|value: u32| {
        stream::iter(vec![
            StreamItem::Value(value),
            StreamItem::Error(QuarryError::provider_error("backend down")),
            StreamItem::Value(value + 1),
        ])
    });

    // Act
    tx.send(5)?;

    // Assert
    assert_eq!(unwrap_value(&mut result, 100).await, 5);
    let error = unwrap_stream(&mut result, 100).await.unwrap_err();
    assert!(matches!(
        error,
        QuarryError::ProviderError { ref context } if context == "backend down"
    ));
    assert!(result.is_terminated());

    // Later outer values are ignored once terminated
    tx.send(6)?;
    assert_stream_ended(&mut result, 100).await;

    Ok(())
}

#[tokio::test]
async fn test_switch_map_propagates_outer_error_and_terminates() -> anyhow::Result<()> {
    // Arrange
    let (tx, outer) = test_channel_with_errors();
    let (inner_tx, inner) = test_channel::<u32>();
    let mut inner = Some(inner);
    let mut result = outer.switch_map(move |_: u32| inner.take().expect("mapped twice"));

    tx.send(StreamItem::Value(1))?;
    inner_tx.send(100)?;
    assert_eq!(unwrap_value(&mut result, 100).await, 100);

    // Act
    tx.send(StreamItem::Error(QuarryError::stream_error("registry failed")))?;

    // Assert
    assert!(unwrap_stream(&mut result, 100).await.is_error());
    assert!(inner_tx.is_closed());
    assert_stream_ended(&mut result, 100).await;

    Ok(())
}

#[tokio::test]
async fn test_switch_map_error_from_superseded_inner_is_never_seen() -> anyhow::Result<()> {
    // Arrange
    let (tx, outer) = test_channel();
    let (first_tx, first) = test_channel_with_errors::<u32>();
    let (second_tx, second) = test_channel_with_errors::<u32>();
    let mut inners = vec![second, first];
    let mut result = outer.switch_map(move |_: u32| inners.pop().expect("mapped too often"));

    tx.send(1)?;
    first_tx.send(StreamItem::Value(1))?;
    assert_eq!(unwrap_value(&mut result, 100).await, 1);

    // Act
    tx.send(2)?;
    first_tx.send(StreamItem::Error(QuarryError::stream_error("stale failure")))?;
    second_tx.send(StreamItem::Value(2))?;

    // Assert
    assert_eq!(unwrap_value(&mut result, 100).await, 2);
    assert!(first_tx.is_closed());
    assert!(!result.is_terminated());

    Ok(())
}
