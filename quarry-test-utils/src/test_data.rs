// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use quarry_registry::{SearchResult, SearchResults};

/// A result with only a title.
pub fn result(title: &str) -> SearchResult {
    SearchResult::new(title)
}

/// An answer listing results with the given titles, in order.
pub fn results(titles: &[&str]) -> SearchResults {
    Some(titles.iter().map(|title| result(title)).collect())
}

pub fn result_readme() -> SearchResult {
    SearchResult::new("README.md")
        .with_url("repo://quarry/README.md")
        .with_content("Provider registries for search")
}

pub fn result_lib() -> SearchResult {
    SearchResult::new("lib.rs").with_url("repo://quarry/src/lib.rs")
}

pub fn result_cargo() -> SearchResult {
    SearchResult::new("Cargo.toml")
}
