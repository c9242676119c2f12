//! Persistent context fields bound to a logger
//!
//! `BoundContext` holds fields that are merged into every call made through
//! a logger until they are replaced. One-shot fields attached to a single
//! call win over bound fields with the same key.
//!
//! Thread-safe: replacing the bound set is a single write under an `RwLock`;
//! readers get a snapshot `Arc`, so a call in flight never sees a half
//! replaced set.

use super::fields::LogFields;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct BoundContext {
    fields: Arc<RwLock<Arc<LogFields>>>,
}

impl BoundContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the bound fields.
    pub fn bind(&self, fields: LogFields) {
        *self.fields.write() = Arc::new(fields);
    }

    /// Drop every bound field.
    pub fn clear(&self) {
        self.bind(LogFields::new());
    }

    /// Snapshot of the currently bound fields.
    pub fn snapshot(&self) -> Arc<LogFields> {
        Arc::clone(&self.fields.read())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.read().is_empty()
    }

    /// Bound fields with `one_shot` merged on top.
    pub fn merge_with(&self, one_shot: LogFields) -> LogFields {
        let bound = self.snapshot();
        if bound.is_empty() {
            return one_shot;
        }
        (*bound).clone().add(one_shot)
    }
}
