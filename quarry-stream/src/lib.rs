// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stream operators for quarry.
//!
//! - **[`switch_map`](SwitchMapExt::switch_map)**: maps each value to an inner stream and
//!   forwards only the latest one, dropping superseded inner streams
//!
//! Operators work on streams of [`StreamItem<T>`](quarry_core::StreamItem) so that errors
//! travel alongside values and terminate the output.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[cfg(feature = "tracing")]
#[macro_use]
extern crate tracing;

#[macro_use]
mod logging;
pub mod switch_map;

pub use switch_map::{SwitchMap, SwitchMapExt};
