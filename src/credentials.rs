//! Credential checker capability.
//!
//! Wraps whatever login subsystem the application uses. The mediator only
//! needs three things from it: verify a set of credentials, report who is
//! currently authenticated, and establish a session for a known identifier.

use serde_json::Value;

use crate::identity::IdentityRecord;

pub trait CredentialChecker {
    /// Opaque credential material (password pair, OPAQUE envelope, ...).
    type Credentials;
    type Identity: IdentityRecord;

    /// Verify `credentials`. May establish an ambient authenticated session
    /// as a side effect; `false` is an expected outcome, never an error.
    fn check(&mut self, credentials: &Self::Credentials) -> bool;

    /// The identity of the ambient session, if one is established.
    fn current_identity(&self) -> Option<Self::Identity>;

    /// Establish a session for a known identifier and return its identity,
    /// or `None` if the identifier is not acceptable.
    fn check_and_fetch(&mut self, id: &Value) -> Option<Self::Identity>;
}
