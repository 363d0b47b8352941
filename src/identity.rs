//! Identity record and identity store capabilities.
//!
//! Records stay opaque to the mediator: it only ever reads one named field
//! (to mint a token) or hands a raw value to the store (to resolve one).

use serde_json::Value;

/// Field-level read access to an identity record.
///
/// Replaces reflective property access with an explicit accessor; `None`
/// means the record has no such field.
pub trait IdentityRecord {
    fn get_field(&self, name: &str) -> Option<Value>;
}

/// Read-only reverse lookup from a claim value to an identity.
///
/// A miss is a normal outcome, not an error.
pub trait IdentityStore {
    type Identity: IdentityRecord;

    fn lookup(&self, field: &str, value: &Value) -> Option<Self::Identity>;
}

/// A claim map doubles as an identity record in tests and simple stores.
impl IdentityRecord for serde_json::Map<String, Value> {
    fn get_field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}
