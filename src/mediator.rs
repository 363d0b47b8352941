//! The token lifecycle state machine.
//!
//! Flow Overview: extract a candidate token from the request, cache it,
//! decode it through the injected codec, then resolve it to an identity via
//! the store (plain resolution) or the credential checker (session-backed
//! login). Minting goes the other way: read the identity-claim field off a
//! record and hand it to the codec.
//!
//! One mediator instance per inbound request: the cached token is owned
//! exclusively by the instance, so a long-lived shared mediator would leak
//! tokens across requests.

use serde_json::Value;
use tracing::debug;

use crate::codec::{ClaimSet, SUBJECT_CLAIM, TokenCodec};
use crate::credentials::CredentialChecker;
use crate::error::{DecodeError, Error};
use crate::identity::{IdentityRecord, IdentityStore};
use crate::request::TokenSource;

/// Identity-claim field used for encoding and lookup unless reconfigured.
pub const DEFAULT_IDENTIFIER: &str = "id";

/// Query parameter [`Mediator::get_token`] falls back to.
pub const DEFAULT_QUERY_PARAM: &str = "token";

const AUTHORIZATION_HEADER: &str = "authorization";
const BEARER_SCHEME: &str = "bearer";

/// Orchestrates the token lifecycle over three injected capabilities:
/// a [`TokenCodec`], an [`IdentityStore`] and a [`CredentialChecker`].
///
/// Holds exactly one cached token, set explicitly via [`set_token`] or as a
/// side effect of extraction, and only ever cleared by being overwritten.
/// The identity-claim field name (default `"id"`) must match between
/// minting and lookup, otherwise validly-issued tokens resolve to nothing.
///
/// [`set_token`]: Mediator::set_token
pub struct Mediator<C, S, K> {
    codec: C,
    store: S,
    checker: K,
    identifier: String,
    token: Option<String>,
}

impl<C, S, K> Mediator<C, S, K>
where
    C: TokenCodec,
    S: IdentityStore,
    K: CredentialChecker<Identity = S::Identity>,
{
    #[must_use]
    pub fn new(codec: C, store: S, checker: K) -> Self {
        Self {
            codec,
            store,
            checker,
            identifier: DEFAULT_IDENTIFIER.to_string(),
            token: None,
        }
    }

    /// Rename the identity-claim field. Fluent; chain with [`set_token`].
    ///
    /// [`set_token`]: Mediator::set_token
    pub fn set_identifier(&mut self, name: impl Into<String>) -> &mut Self {
        self.identifier = name.into();
        self
    }

    /// Cache a token explicitly. Fluent.
    pub fn set_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.token = Some(token.into());
        self
    }

    /// The cached token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Guard run at the start of every token-consuming operation: a
    /// non-empty candidate becomes the cached token, otherwise the cached
    /// one is used. Empty candidates count as absent.
    fn require_token(&mut self, candidate: Option<&str>) -> Result<String, Error> {
        match candidate {
            Some(token) if !token.is_empty() => {
                self.token = Some(token.to_string());
                Ok(token.to_string())
            }
            _ => self.token.clone().ok_or(Error::TokenRequired),
        }
    }

    /// Resolve a token to an identity record.
    ///
    /// Decodes the cached (or supplied) token, reads its subject claim and
    /// looks up the store by the configured identity-claim field. `Ok(None)`
    /// means the token decoded but matches no identity; that is a valid
    /// outcome, not an error.
    ///
    /// # Errors
    ///
    /// [`Error::TokenRequired`] when no token is available; codec decode
    /// errors propagate unmodified.
    pub fn to_user(&mut self, token: Option<&str>) -> Result<Option<S::Identity>, Error> {
        let token = self.require_token(token)?;
        let claims = self.codec.decode(&token)?;
        let subject = claims
            .get(SUBJECT_CLAIM)
            .ok_or(Error::Decode(DecodeError::MissingSubject))?;
        Ok(self.store.lookup(&self.identifier, subject))
    }

    /// Mint a token for `identity`. No caching side effect.
    ///
    /// # Errors
    ///
    /// [`Error::MissingIdentityField`] when the record lacks the configured
    /// identity-claim field; codec encode errors propagate.
    pub fn from_user(&self, identity: &S::Identity) -> Result<String, Error> {
        let subject = identity
            .get_field(&self.identifier)
            .ok_or_else(|| Error::MissingIdentityField(self.identifier.clone()))?;
        self.codec.encode(&subject)
    }

    /// Login by credentials: verify them, then mint a token for the
    /// now-authenticated identity. Bad credentials are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Minting errors from [`from_user`] propagate.
    ///
    /// [`from_user`]: Mediator::from_user
    pub fn attempt(&mut self, credentials: &K::Credentials) -> Result<Option<String>, Error> {
        if !self.checker.check(credentials) {
            debug!("credential check failed, no token minted");
            return Ok(None);
        }
        match self.checker.current_identity() {
            Some(identity) => self.from_user(&identity).map(Some),
            None => Ok(None),
        }
    }

    /// Resolve a token to an authenticated session on the credential
    /// checker. Unlike [`to_user`] this establishes a session; the subject
    /// identifier is extracted straight off the token, no prior decode call
    /// needed. Checker refusal is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// [`Error::TokenRequired`] when no token is available; codec subject
    /// extraction errors propagate.
    ///
    /// [`to_user`]: Mediator::to_user
    pub fn login(&mut self, token: Option<&str>) -> Result<Option<K::Identity>, Error> {
        let token = self.require_token(token)?;
        let id = self.codec.subject(&token)?;
        Ok(self.checker.check_and_fetch(&id))
    }

    /// Extract a token from `request`: bearer authorization header first,
    /// [`DEFAULT_QUERY_PARAM`] as fallback. Caches on success.
    pub fn get_token(&mut self, request: &impl TokenSource) -> Option<String> {
        self.get_token_from(request, DEFAULT_QUERY_PARAM)
    }

    /// [`get_token`] with an explicit fallback query parameter name.
    ///
    /// [`get_token`]: Mediator::get_token
    pub fn get_token_from(
        &mut self,
        request: &impl TokenSource,
        query_param: &str,
    ) -> Option<String> {
        let found = parse_auth_header(request, BEARER_SCHEME).or_else(|| {
            request
                .query_param(query_param)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        });

        match found {
            Some(token) => {
                debug!("token extracted from request");
                self.token = Some(token.clone());
                Some(token)
            }
            None => {
                debug!("no token in authorization header or query parameter");
                None
            }
        }
    }

    /// Boolean decode check.
    ///
    /// Policy: every token-invalidity kind (malformed, expired, bad
    /// signature, missing subject) maps to `Ok(false)`;
    /// [`DecodeError::Unavailable`] propagates because a codec that cannot
    /// render a verdict has not called the token invalid.
    ///
    /// # Errors
    ///
    /// [`Error::TokenRequired`] when no token is available;
    /// [`DecodeError::Unavailable`] from the codec.
    pub fn is_valid(&mut self, token: Option<&str>) -> Result<bool, Error> {
        let token = self.require_token(token)?;
        match self.codec.decode(&token) {
            Ok(_) => Ok(true),
            Err(Error::Decode(err)) if err.is_token_invalid() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Guarded facade over [`TokenCodec::decode`].
    ///
    /// # Errors
    ///
    /// [`Error::TokenRequired`] when no token is available; decode errors
    /// propagate.
    pub fn claims(&mut self, token: Option<&str>) -> Result<ClaimSet, Error> {
        let token = self.require_token(token)?;
        self.codec.decode(&token)
    }

    /// Guarded facade over [`TokenCodec::subject`].
    ///
    /// # Errors
    ///
    /// [`Error::TokenRequired`] when no token is available; extraction
    /// errors propagate.
    pub fn subject(&mut self, token: Option<&str>) -> Result<Value, Error> {
        let token = self.require_token(token)?;
        self.codec.subject(&token)
    }

    /// Guarded facade over [`TokenCodec::refresh`]. The fresh token
    /// overwrites the cache.
    ///
    /// # Errors
    ///
    /// [`Error::TokenRequired`] when no token is available;
    /// [`Error::UnsupportedOperation`] from codecs without refresh support.
    pub fn refresh(&mut self, token: Option<&str>) -> Result<String, Error> {
        let token = self.require_token(token)?;
        let fresh = self.codec.refresh(&token)?;
        self.token = Some(fresh.clone());
        Ok(fresh)
    }

    /// Guarded facade over [`TokenCodec::invalidate`]. The cached token is
    /// left in place.
    ///
    /// # Errors
    ///
    /// [`Error::TokenRequired`] when no token is available;
    /// [`Error::UnsupportedOperation`] from codecs without blacklist
    /// support.
    pub fn invalidate(&mut self, token: Option<&str>) -> Result<(), Error> {
        let token = self.require_token(token)?;
        self.codec.invalidate(&token)
    }
}

/// Parse a scheme-prefixed token out of the authorization header.
///
/// Scheme matching is case-insensitive. Only the leading scheme word and
/// surrounding whitespace are stripped, so a token containing the scheme
/// word as a substring survives intact. No separator is required after the
/// scheme word: `"Bearerabc"` yields `"abc"`.
fn parse_auth_header(request: &impl TokenSource, scheme: &str) -> Option<String> {
    let header = request.header(AUTHORIZATION_HEADER)?.trim();
    let (prefix, rest) = header.split_at_checked(scheme.len())?;
    if !prefix.eq_ignore_ascii_case(scheme) {
        return None;
    }
    let token = rest.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
