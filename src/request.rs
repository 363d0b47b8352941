//! Read-only view of an inbound request.
//!
//! The only request capability the mediator consumes: header and
//! query-parameter reads. The HTTP framework behind it is out of scope.

pub trait TokenSource {
    /// Value of the named header, if present. Header name matching follows
    /// the implementation's own conventions (HTTP headers are
    /// case-insensitive by nature).
    fn header(&self, name: &str) -> Option<&str>;

    /// Value of the named query parameter, if present.
    fn query_param(&self, name: &str) -> Option<&str>;
}
