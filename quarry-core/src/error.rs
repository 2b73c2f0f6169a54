// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for quarry.
//!
//! [`QuarryError`] is the root error carried by [`StreamItem::Error`](crate::StreamItem).
//! Providers report their own failures through it, and the aggregator forwards
//! them to its subscriber unchanged.
//!
//! # Examples
//!
//! ```
//! use quarry_core::{QuarryError, Result};
//!
//! fn lookup() -> Result<()> {
//!     Err(QuarryError::provider_error("index offline"))
//! }
//!
//! assert!(lookup().is_err());
//! ```

use crate::subject_error::SubjectError;

/// Root error type for all quarry operations.
#[derive(Debug, thiserror::Error)]
pub enum QuarryError {
    /// Stream processing encountered an error
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// A search result provider failed to answer a query
    #[error("Provider error: {context}")]
    ProviderError {
        /// Description supplied by the provider
        context: String,
    },

    /// Custom error from user code
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl QuarryError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Create a provider error with the given context
    pub fn provider_error(context: impl Into<String>) -> Self {
        Self::ProviderError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }
}

impl From<SubjectError> for QuarryError {
    fn from(error: SubjectError) -> Self {
        Self::stream_error(error.to_string())
    }
}

/// Specialized Result type for quarry operations
pub type Result<T> = std::result::Result<T, QuarryError>;

/// Extension trait for converting foreign errors into `QuarryError`
pub trait IntoQuarryError {
    /// Convert this error into a `QuarryError`
    fn into_quarry(self) -> QuarryError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoQuarryError for E {
    fn into_quarry(self) -> QuarryError {
        QuarryError::user_error(self)
    }
}

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(QuarryError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<QuarryError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let context = context.into();
            match e.into() {
                QuarryError::UserError(inner) => QuarryError::StreamProcessingError {
                    context: format!("{context}: {inner}"),
                },
                other => other,
            }
        })
    }
}

impl Clone for QuarryError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            Self::ProviderError { context } => Self::ProviderError {
                context: context.clone(),
            },
            // The boxed source can't be cloned, keep its message instead
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {}", e),
            },
        }
    }
}
