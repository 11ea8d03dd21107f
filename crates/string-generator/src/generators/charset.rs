//! Character-set sampling.

use crate::error::GenerationError;
use crate::source::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

const NUMBERS: &str = "0123456789";
const LOWERS: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHA_NUMERIC: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const LOWERS_ALPHA_NUMERIC: &str = "abcdefghijklmnopqrstuvwxyz0123456789";
const UPPERS_ALPHA_NUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SYMBOL_ALL: &str = "-_#$=?@[]!%&'()~|^\\;:,./`{+*}>";
const ALL_PRINTABLE: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-_#$=?@[]!%&'()~|^\\;:,./`{+*}>";
const BASE64: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789+/";
const BASE64_URL: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-_";

/// Predefined character sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedSet {
    /// `0-9`
    Numbers,
    /// `a-z`
    Lowers,
    /// `A-Z`
    Uppers,
    /// `a-z`, `A-Z` and `0-9`
    AlphaNumeric,
    /// `a-z` and `0-9`
    LowersAlphaNumeric,
    /// `A-Z` and `0-9`
    UppersAlphaNumeric,
    /// Printable ASCII punctuation safe for most file names and tokens
    SymbolAll,
    /// Alphanumerics plus [`NamedSet::SymbolAll`]
    All,
    /// Standard base64 alphabet
    Base64,
    /// URL-safe base64 alphabet
    Base64Url,
}

impl NamedSet {
    /// Every predefined set.
    pub const ALL: [NamedSet; 10] = [
        NamedSet::Numbers,
        NamedSet::Lowers,
        NamedSet::Uppers,
        NamedSet::AlphaNumeric,
        NamedSet::LowersAlphaNumeric,
        NamedSet::UppersAlphaNumeric,
        NamedSet::SymbolAll,
        NamedSet::All,
        NamedSet::Base64,
        NamedSet::Base64Url,
    ];

    /// The characters of this set, in sampling order.
    pub fn chars(&self) -> &'static str {
        match self {
            NamedSet::Numbers => NUMBERS,
            NamedSet::Lowers => LOWERS,
            NamedSet::Uppers => UPPERS,
            NamedSet::AlphaNumeric => ALPHA_NUMERIC,
            NamedSet::LowersAlphaNumeric => LOWERS_ALPHA_NUMERIC,
            NamedSet::UppersAlphaNumeric => UPPERS_ALPHA_NUMERIC,
            NamedSet::SymbolAll => SYMBOL_ALL,
            NamedSet::All => ALL_PRINTABLE,
            NamedSet::Base64 => BASE64,
            NamedSet::Base64Url => BASE64_URL,
        }
    }
}

/// An ordered set of characters to sample from.
///
/// Duplicates are allowed and weight the draw accordingly. An empty set can
/// be constructed but fails when a unit using it runs.
#[derive(Clone, PartialEq, Eq)]
pub struct CharSet {
    chars: Arc<[char]>,
}

impl CharSet {
    /// Build a set from the characters of `chars`.
    pub fn new(chars: impl AsRef<str>) -> Self {
        Self {
            chars: chars.as_ref().chars().collect(),
        }
    }

    /// Number of characters in the set.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Whether `c` is a member of the set.
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }
}

impl From<NamedSet> for CharSet {
    fn from(set: NamedSet) -> Self {
        CharSet::new(set.chars())
    }
}

impl From<&str> for CharSet {
    fn from(chars: &str) -> Self {
        CharSet::new(chars)
    }
}

impl From<String> for CharSet {
    fn from(chars: String) -> Self {
        CharSet::new(chars)
    }
}

impl fmt::Debug for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chars: String = self.chars.iter().collect();
        f.debug_tuple("CharSet").field(&chars).finish()
    }
}

/// Resolve the length a character-set unit will emit.
///
/// Only a maximum strictly greater than `min` turns into a draw.
pub fn resolve_length<R: RandomSource>(
    source: &mut R,
    min: usize,
    max: Option<usize>,
) -> Result<usize, GenerationError> {
    match max {
        Some(max) if max > min => source.draw_inclusive(min, max),
        _ => Ok(min),
    }
}

/// Append characters sampled uniformly (with replacement) from `set`.
pub fn append_charset<R: RandomSource>(
    buf: &mut String,
    set: &CharSet,
    min: usize,
    max: Option<usize>,
    source: &mut R,
) -> Result<(), GenerationError> {
    if set.is_empty() {
        return Err(GenerationError::InvalidCharacterSet);
    }

    let length = resolve_length(source, min, max)?;
    if length == 0 {
        return Ok(());
    }

    // ASCII sets are the common case and give an exact reservation. A
    // reservation that cannot be met is skipped; pushes still grow the buffer.
    let width = set.chars.iter().map(|c| c.len_utf8()).max().unwrap_or(1);
    let _ = buf.try_reserve(length.saturating_mul(width));

    for _ in 0..length {
        let idx = source.draw(set.len())?;
        buf.push(set.chars[idx]);
    }

    Ok(())
}
