//! Default headers attached to every request an executor sends.
//!
//! # Design
//! The header list is shared: cloning a `DefaultHeaders` yields another
//! handle onto the same list, so executors built around one handle see each
//! other's insertions. Every mutation happens inside a single write-lock
//! critical section, which makes insert-if-absent atomic under concurrent
//! callers: a header is never duplicated and never lost.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::http::find_header;

#[derive(Debug, Clone, Default)]
pub struct DefaultHeaders {
    inner: Arc<RwLock<Vec<(String, String)>>>,
}

impl DefaultHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `name: value` unless a header with that name already exists.
    ///
    /// Returns `true` if the header was inserted. Names compare
    /// case-insensitively, and an existing value is never overwritten.
    pub fn insert_if_absent(&self, name: &str, value: &str) -> bool {
        self.insert_unless_present(&[name], name, value)
    }

    /// Insert `name: value` unless any header in `guards` or `name` itself is
    /// already present. The check and the insert share one lock acquisition.
    pub(crate) fn insert_unless_present(&self, guards: &[&str], name: &str, value: &str) -> bool {
        let mut headers = self.inner.write();
        let present = guards
            .iter()
            .chain(std::iter::once(&name))
            .any(|guard| find_header(&headers, guard).is_some());
        if present {
            return false;
        }
        headers.push((name.to_string(), value.to_string()));
        true
    }

    pub fn get(&self, name: &str) -> Option<String> {
        find_header(&self.inner.read(), name).map(str::to_string)
    }

    pub fn contains(&self, name: &str) -> bool {
        find_header(&self.inner.read(), name).is_some()
    }

    /// Remove every header named `name`, returning the first removed value.
    ///
    /// This is how a caller rotates a token: the next call carrying an
    /// authorization value inserts the new one.
    pub fn remove(&self, name: &str) -> Option<String> {
        let mut headers = self.inner.write();
        let removed = find_header(&headers, name).map(str::to_string);
        headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        removed
    }

    /// Copy of the current headers, in insertion order.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.inner.read().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
