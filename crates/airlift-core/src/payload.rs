// ── Native update payload ──
//
// The vendor-specific mapping a handler's translator produces. It is
// consumed exactly once by the apply call and never persisted. Field
// order is canonical (sorted by key), so translating the same section
// twice yields byte-identical serialized payloads.

use serde::Serialize;
use serde_json::Value;

/// A vendor-native update document, keyed by native field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NativeUpdatePayload {
    fields: serde_json::Map<String, Value>,
}

impl NativeUpdatePayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a native field. Each recognized vendor-neutral key maps to
    /// exactly one native field, so translators call this once per key.
    pub fn insert(&mut self, field: &str, value: Value) {
        self.fields.insert(field.to_owned(), value);
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrow the underlying map in the shape the transport layer sends.
    pub fn as_map(&self) -> &serde_json::Map<String, Value> {
        &self.fields
    }
}
