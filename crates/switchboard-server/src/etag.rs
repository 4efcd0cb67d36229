//! ETag computation for rendered pages.
//!
//! ETags are SHA-256 hashes of the rendered body, so two renders of the same
//! state carry the same tag and a browser can revalidate with
//! `If-None-Match`.

use axum::http::{HeaderMap, header};
use sha2::{Digest, Sha256};

/// Compute a quoted strong ETag for `body`.
pub fn compute_etag(body: &[u8]) -> String {
  let hash = Sha256::digest(body);
  format!("\"{}\"", hex::encode(hash))
}

/// Whether the request's `If-None-Match` header already names `etag`.
///
/// Accepts `*`, comma-separated lists, weak tags, and bare (unquoted) tags.
pub fn not_modified(headers: &HeaderMap, etag: &str) -> bool {
  let Some(value) = headers
    .get(header::IF_NONE_MATCH)
    .and_then(|v| v.to_str().ok())
  else {
    return false;
  };
  let wanted = etag.trim_matches('"');
  value.split(',').map(str::trim).any(|candidate| {
    candidate == "*"
      || candidate.trim_start_matches("W/").trim_matches('"') == wanted
  })
}
