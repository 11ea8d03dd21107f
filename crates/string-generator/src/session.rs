//! Long-lived seeded sessions.

use crate::error::GenerationError;
use crate::generators::Generator;
use crate::pipeline::build_with;
use crate::source::SeededSource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A seeded random source behind a lock.
///
/// At most one pipeline runs against a session at a time; other callers
/// block until it finishes. Separate sessions share nothing.
#[derive(Debug)]
pub struct Session {
    source: Mutex<SeededSource>,
    seed: u64,
}

impl Session {
    /// Create a session seeded from the clock.
    ///
    /// Sessions created within the same clock tick still get distinct seeds.
    pub fn new() -> Self {
        Self::with_seed(time_seed())
    }

    /// Create a session with an explicit seed, for reproducible output.
    pub fn with_seed(seed: u64) -> Self {
        debug!(seed, "creating generator session");
        Self {
            source: Mutex::new(SeededSource::new(seed)),
            seed,
        }
    }

    /// Seed the session was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run `generators` with exclusive use of this session's source.
    pub fn build<I>(&self, generators: I) -> Result<String, GenerationError>
    where
        I: IntoIterator<Item = Generator>,
    {
        // A panicking custom unit poisons the mutex; the source itself is
        // still a valid stream, so later callers carry on with it.
        let mut source = self.source.lock().unwrap_or_else(PoisonError::into_inner);
        build_with(&mut *source, generators)
    }

    /// Like [`Session::build`], but panics if any unit fails.
    pub fn generate<I>(&self, generators: I) -> String
    where
        I: IntoIterator<Item = Generator>,
    {
        match self.build(generators) {
            Ok(value) => value,
            Err(e) => panic!("string generation failed: {e}"),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide session, created on first use.
///
/// Prefer owning a [`Session`] explicitly; this exists for call sites that
/// have nowhere to keep one.
pub fn default_session() -> &'static Session {
    static DEFAULT: OnceLock<Session> = OnceLock::new();
    DEFAULT.get_or_init(Session::new)
}

fn time_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let count = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
    nanos ^ count.wrapping_add(1).wrapping_mul(0x9E3779B97F4A7C15)
}
