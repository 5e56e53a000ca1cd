//! Stored object naming
//!
//! Client filenames are untrusted. [`sanitize_filename`] reduces them to a safe
//! ASCII subset and [`object_name`] prefixes the result with a UTC timestamp so
//! names from different seconds never collide.

use chrono::{DateTime, Utc};

use crate::constants::{FALLBACK_FILENAME, OBJECT_TIMESTAMP_FORMAT};

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// Reduce an arbitrary filename to `[A-Za-z0-9._-]`.
///
/// Every run of disallowed characters becomes a single `_`, leading and
/// trailing `.`/`_` are stripped, and an empty result becomes `upload`.
/// The function is total and idempotent.
pub fn sanitize_filename(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_run = false;

    for c in raw.chars() {
        if is_allowed(c) {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Build the stored object name `{YYYYMMDDTHHMMSS}-{sanitized}`.
///
/// `sanitized` is expected to be the output of [`sanitize_filename`]. Two
/// uploads of the same name within the same second map to the same object.
pub fn object_name(sanitized: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}", now.format(OBJECT_TIMESTAMP_FORMAT), sanitized)
}
