//! Access-token codec.
//!
//! A token is the simple (dashless) hex form of the object id. Decoding is
//! deliberately forgiving about the hyphenated form but collapses anything
//! unparseable to `None`; the caller turns that into the uniform not-found
//! signal, so a malformed token is indistinguishable from an expired one.

use uuid::Uuid;

pub fn encode(id: Uuid) -> String {
    id.simple().to_string()
}

pub fn decode(token: &str) -> Option<Uuid> {
    Uuid::parse_str(token).ok()
}
