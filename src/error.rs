//! Error taxonomy for the token lifecycle.
//!
//! Expected negative outcomes (bad credentials, identity not found, missing
//! request token) are `Option` values on the operations themselves, never
//! errors. Everything here is an actual failure of the calling operation.

use thiserror::Error;

/// Token-invalidity and codec failures surfaced by [`TokenCodec`] decoding.
///
/// The codec is authoritative for this taxonomy; the mediator propagates
/// these unmodified except in [`Mediator::is_valid`], which converts the
/// invalidity kinds to `false` and lets [`DecodeError::Unavailable`] through.
///
/// [`TokenCodec`]: crate::codec::TokenCodec
/// [`Mediator::is_valid`]: crate::mediator::Mediator::is_valid
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed token")]
    Malformed,
    #[error("token expired")]
    Expired,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("missing subject claim")]
    MissingSubject,
    /// The codec itself failed (key material unreachable, backing state
    /// unavailable). Not a statement about the token.
    #[error("codec unavailable: {0}")]
    Unavailable(String),
}

impl DecodeError {
    /// Whether this kind means "the token is invalid" as opposed to "the
    /// codec could not render a verdict".
    #[must_use]
    pub fn is_token_invalid(&self) -> bool {
        !matches!(self, Self::Unavailable(_))
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// No token was supplied and none was previously cached.
    #[error("token required but none was provided or cached")]
    TokenRequired,
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A delegated call the codec does not expose.
    #[error("unsupported codec operation: {0}")]
    UnsupportedOperation(&'static str),
    /// Minting was asked to read an identity-claim field the record lacks.
    #[error("identity record has no {0:?} field")]
    MissingIdentityField(String),
}
