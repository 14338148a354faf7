//! Filename sanitization.
//!
//! Turns an arbitrary user-supplied filename into a traversal-safe,
//! collision-resistant storage name of the form `<base>_<unix-seconds>.<ext>`.
//! The wall clock and the random fallback token are injected capabilities so
//! the function stays deterministic under test.
//!
//! Two uploads sharing a sanitized base name within the same second would
//! silently overwrite each other. That residual race is accepted; the
//! timestamp suffix covers every realistic collision between requests.

use pasar_core::constants::{FALLBACK_TOKEN_LENGTH, MAX_BASENAME_LENGTH};
use rand::distr::{Alphanumeric, SampleString};

/// Wall-clock capability, second resolution.
pub trait Clock: Send + Sync {
    fn unix_seconds(&self) -> i64;
}

/// Uniqueness-only token source. Not used for anything security-critical.
pub trait TokenSource: Send + Sync {
    fn token(&self, length: usize) -> String;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Production token source backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokens;

impl TokenSource for RandomTokens {
    fn token(&self, length: usize) -> String {
        Alphanumeric.sample_string(&mut rand::rng(), length)
    }
}

/// Sanitize a user-supplied filename into a storage-ready name.
///
/// The base name is stripped of traversal sequences (`..`, `/`, `\`) and of
/// every character outside `[A-Za-z0-9_-]`, then truncated to 100
/// characters. An empty result is replaced with a random 10-character token.
/// The current Unix timestamp is appended and the extension is reattached
/// lower-cased.
pub fn sanitize_filename(original: &str, clock: &dyn Clock, tokens: &dyn TokenSource) -> String {
    let (base, extension) = match original.rsplit_once('.') {
        Some((base, ext)) => (base, ext.to_lowercase()),
        None => (original, String::new()),
    };

    let mut base: String = base.replace("..", "").replace(['/', '\\'], "");
    base.retain(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    base.truncate(MAX_BASENAME_LENGTH);

    if base.is_empty() {
        base = tokens.token(FALLBACK_TOKEN_LENGTH);
    }

    let stamped = format!("{}_{}", base, clock.unix_seconds());

    if extension.is_empty() {
        stamped
    } else {
        format!("{}.{}", stamped, extension)
    }
}
