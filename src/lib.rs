//! # Token Mediator
//!
//! Bridges an inbound request's bearer credential to an application's
//! user-identity store, and mediates issuance of new tokens after a
//! successful login. The crate owns only the token lifecycle state machine;
//! everything else is an injected capability:
//!
//! - [`TokenCodec`]: encode a subject into an opaque token, decode a token
//!   into validated claims. Signing and verification live here, out of scope.
//! - [`IdentityStore`]: reverse lookup from a claim value to an identity.
//! - [`CredentialChecker`]: verify credentials and establish sessions.
//! - [`TokenSource`]: header and query-parameter reads off a request.
//!
//! A [`Mediator`] is request-scoped: it owns a single cached token and is
//! not meant to be shared across concurrent request-handling contexts.
//!
//! ```
//! use serde_json::{Map, Value, json};
//! use token_mediator::{
//!     ClaimSet, CredentialChecker, Error, IdentityStore, Mediator, TokenCodec,
//! };
//!
//! struct PlainCodec;
//!
//! impl TokenCodec for PlainCodec {
//!     fn encode(&self, subject: &Value) -> Result<String, Error> {
//!         Ok(format!("t.{subject}"))
//!     }
//!     fn decode(&self, token: &str) -> Result<ClaimSet, Error> {
//!         let raw = token.strip_prefix("t.").ok_or(Error::Decode(
//!             token_mediator::DecodeError::Malformed,
//!         ))?;
//!         let mut claims = ClaimSet::new();
//!         claims.insert("sub".into(), serde_json::from_str(raw).map_err(|_| {
//!             Error::Decode(token_mediator::DecodeError::Malformed)
//!         })?);
//!         Ok(claims)
//!     }
//! }
//!
//! struct SingleUser(ClaimSet);
//!
//! impl IdentityStore for SingleUser {
//!     type Identity = ClaimSet;
//!     fn lookup(&self, field: &str, value: &Value) -> Option<ClaimSet> {
//!         (self.0.get(field) == Some(value)).then(|| self.0.clone())
//!     }
//! }
//!
//! struct NoLogin;
//!
//! impl CredentialChecker for NoLogin {
//!     type Credentials = ();
//!     type Identity = ClaimSet;
//!     fn check(&mut self, _credentials: &()) -> bool {
//!         false
//!     }
//!     fn current_identity(&self) -> Option<ClaimSet> {
//!         None
//!     }
//!     fn check_and_fetch(&mut self, _id: &Value) -> Option<ClaimSet> {
//!         None
//!     }
//! }
//!
//! # fn main() -> Result<(), Error> {
//! let mut user = Map::new();
//! user.insert("id".to_string(), json!(42));
//!
//! let mut mediator = Mediator::new(PlainCodec, SingleUser(user.clone()), NoLogin);
//! let token = mediator.from_user(&user)?;
//! assert_eq!(mediator.to_user(Some(token.as_str()))?, Some(user));
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod credentials;
pub mod error;
pub mod identity;
pub mod mediator;
pub mod request;

pub use codec::{ClaimSet, SUBJECT_CLAIM, TokenCodec};
pub use credentials::CredentialChecker;
pub use error::{DecodeError, Error};
pub use identity::{IdentityRecord, IdentityStore};
pub use mediator::{DEFAULT_IDENTIFIER, DEFAULT_QUERY_PARAM, Mediator};
pub use request::TokenSource;
