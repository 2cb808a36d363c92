//! Ordered transformation chains for archive data.
//!
//! A chain holds callbacks applied in registration order; each callback
//! receives the previous result and returns the (possibly modified) value.

use std::collections::BTreeMap;

use crate::content::{ContentType, PageId};
use crate::core::UrlPath;

type Callback<T> = Box<dyn Fn(T) -> T + Send + Sync>;

/// An ordered chain of value transformations.
pub struct FilterChain<T> {
    callbacks: Vec<Callback<T>>,
}

impl<T> FilterChain<T> {
    pub fn add(&mut self, f: impl Fn(T) -> T + Send + Sync + 'static) {
        self.callbacks.push(Box::new(f));
    }

    /// Run the value through every callback in registration order.
    pub fn apply(&self, value: T) -> T {
        self.callbacks.iter().fold(value, |v, f| f(v))
    }
}

impl<T> Default for FilterChain<T> {
    fn default() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }
}

impl<T> std::fmt::Debug for FilterChain<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

/// The filter chains an embedding site can hook into.
#[derive(Debug, Default)]
pub struct Filters {
    /// Adjust which content types are offered for archive assignment.
    pub archivable_types: FilterChain<Vec<ContentType>>,
    /// Adjust the computed type -> page mapping.
    pub mapping: FilterChain<BTreeMap<String, PageId>>,
    /// Adjust a computed archive URL.
    pub archive_url: FilterChain<UrlPath>,
}
