// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types shared by every quarry crate.
//!
//! - [`StreamItem`]: a stream element that is either a value or a terminating error
//! - [`QuarryError`]: the root error type, with the [`Result`] alias
//! - [`BehaviorSubject`]: a hot, multi-subscriber subject that replays its current value

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod behavior_subject;
pub mod error;
pub mod stream_item;
pub mod subject_error;

pub use self::behavior_subject::{BehaviorSubject, SubjectBoxStream};
pub use self::error::{IntoQuarryError, QuarryError, Result, ResultExt};
pub use self::stream_item::StreamItem;
pub use self::subject_error::SubjectError;
