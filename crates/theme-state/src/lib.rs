//! Theme state management for Adaptive Theme
//!
//! This crate provides the theme store (named theme variants, the active
//! selection, deep-merge updates) and the typed subscription broker that
//! fans out selection and update notifications.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod broker;
pub mod merge;
pub mod store;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

pub use broker::{Subscription, SubscriptionBroker, Topic};
pub use merge::deep_merge;
pub use store::{ThemeCollection, ThemeStore};

/// Theme store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The theme collection could not be converted to or from its merged form
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for theme store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// A theme name
///
/// Theme names serialize as map keys, so strings and unit enum variants work.
pub trait ThemeKey:
    Clone + Ord + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<K> ThemeKey for K where
    K: Clone + Ord + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// The design tokens of one theme variant
pub trait ThemeData: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {}

impl<T> ThemeData for T where T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let err = StoreError::from(err);
        assert!(err.to_string().contains("Serialization error"));
    }
}
