//! Basic credentials extraction from the Authorization header.

use axum::http::{HeaderMap, header};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::auth::Credentials;

/// Decodes `Authorization: Basic base64(email:password)`.
///
/// Returns `None` for a missing header, a non-Basic scheme, invalid
/// base64, or a payload without the `:` separator.
pub fn extract_credentials(headers: &HeaderMap) -> Option<Credentials> {
    let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;

    if email.is_empty() {
        return None;
    }

    Some(Credentials::new(email, password))
}
