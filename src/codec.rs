//! Token codec capability.
//!
//! The mediator never learns how tokens are produced or verified; it only
//! consumes this encode/decode contract. Signing, verification, expiry and
//! blacklisting all live behind an implementation of [`TokenCodec`].

use serde_json::Value;

use crate::error::Error;

/// Claim name the default [`TokenCodec::subject`] reads from a decoded token.
pub const SUBJECT_CLAIM: &str = "sub";

/// Validated claims of a decoded token.
pub type ClaimSet = serde_json::Map<String, Value>;

/// Encode/decode contract consumed by the mediator.
///
/// `refresh` and `invalidate` are optional surface; codecs that do not keep
/// the state those need (issuance clock, blacklist) inherit defaults that
/// fail with [`Error::UnsupportedOperation`].
pub trait TokenCodec {
    /// Mint an opaque token whose subject claim carries `subject`.
    ///
    /// # Errors
    ///
    /// Returns an error if the codec cannot sign (for example its key
    /// material is unavailable).
    fn encode(&self, subject: &Value) -> Result<String, Error>;

    /// Verify `token` and return its claims.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] kind for malformed, expired or
    /// wrongly-signed tokens, and [`DecodeError::Unavailable`] when the
    /// codec itself cannot render a verdict.
    ///
    /// [`DecodeError`]: crate::error::DecodeError
    /// [`DecodeError::Unavailable`]: crate::error::DecodeError::Unavailable
    fn decode(&self, token: &str) -> Result<ClaimSet, Error>;

    /// Extract the subject claim from `token`, decoding as needed.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MissingSubject`] when the token decodes but
    /// carries no subject claim, and decode errors otherwise.
    ///
    /// [`DecodeError::MissingSubject`]: crate::error::DecodeError::MissingSubject
    fn subject(&self, token: &str) -> Result<Value, Error> {
        let claims = self.decode(token)?;
        claims
            .get(SUBJECT_CLAIM)
            .cloned()
            .ok_or(Error::Decode(crate::error::DecodeError::MissingSubject))
    }

    /// Re-issue a fresh token from `token`.
    ///
    /// # Errors
    ///
    /// Defaults to [`Error::UnsupportedOperation`].
    fn refresh(&self, token: &str) -> Result<String, Error> {
        let _ = token;
        Err(Error::UnsupportedOperation("refresh"))
    }

    /// Mark `token` as no longer acceptable.
    ///
    /// # Errors
    ///
    /// Defaults to [`Error::UnsupportedOperation`].
    fn invalidate(&self, token: &str) -> Result<(), Error> {
        let _ = token;
        Err(Error::UnsupportedOperation("invalidate"))
    }
}

#[cfg(test)]
mod tests {
    use super::{ClaimSet, SUBJECT_CLAIM, TokenCodec};
    use crate::error::{DecodeError, Error};
    use anyhow::Result;
    use serde_json::{Value, json};

    /// Decode-only codec: returns a fixed claim set for any token.
    struct FixedClaims(ClaimSet);

    impl TokenCodec for FixedClaims {
        fn encode(&self, _subject: &Value) -> Result<String, Error> {
            Ok("fixed".to_string())
        }

        fn decode(&self, _token: &str) -> Result<ClaimSet, Error> {
            Ok(self.0.clone())
        }
    }

    fn claims_with_subject(subject: Value) -> ClaimSet {
        let mut claims = ClaimSet::new();
        claims.insert(SUBJECT_CLAIM.to_string(), subject);
        claims
    }

    #[test]
    fn default_subject_reads_sub_claim() -> Result<()> {
        let codec = FixedClaims(claims_with_subject(json!(42)));
        assert_eq!(codec.subject("anything")?, json!(42));
        Ok(())
    }

    #[test]
    fn default_subject_reports_missing_claim() {
        let codec = FixedClaims(ClaimSet::new());
        let err = codec.subject("anything").unwrap_err();
        assert!(matches!(
            err,
            Error::Decode(DecodeError::MissingSubject)
        ));
    }

    #[test]
    fn refresh_and_invalidate_default_to_unsupported() {
        let codec = FixedClaims(ClaimSet::new());
        assert!(matches!(
            codec.refresh("t").unwrap_err(),
            Error::UnsupportedOperation("refresh")
        ));
        assert!(matches!(
            codec.invalidate("t").unwrap_err(),
            Error::UnsupportedOperation("invalidate")
        ));
    }
}
