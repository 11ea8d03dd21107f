//! Composable random string generators.
//!
//! A string is described as an ordered list of [`Generator`] units. The
//! pipeline runs them left to right over one growable buffer and one random
//! source, and returns the concatenated output.
//!
//! # Architecture
//!
//! ```text
//! [Generator, Generator, ...]
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │  build_with          │
//! │                      │
//! │  - buffer (String)   │
//! │  - RandomSource      │◄── SecureSource (one-shot)
//! │                      │◄── Session (Mutex<SeededSource>)
//! └──────────┬───────────┘
//!            │
//!            ▼
//!      Result<String, GenerationError>
//! ```
//!
//! # Example
//!
//! ```rust
//! use string_generator::{build, fix, lowers, numbers, uppers};
//!
//! let value = build([fix("A"), numbers(1), lowers(5), uppers(3), fix("Z")]).unwrap();
//! assert_eq!(value.len(), 11);
//! assert!(value.starts_with('A') && value.ends_with('Z'));
//! ```
//!
//! Reproducible output comes from a seeded [`Session`]:
//!
//! ```rust
//! use string_generator::{alpha_numeric, fix, Session};
//!
//! let session = Session::with_seed(42);
//! let id = session.generate([fix("user-"), alpha_numeric(8)]);
//! assert_eq!(id.len(), 13);
//! ```
//!
//! # Units
//!
//! - `fix` / `one_of` - literal text, or one of several alternatives
//! - `charset` / `charset_range` and the named sets (`numbers`, `lowers`,
//!   `uppers`, `alpha_numeric`, `base64`, ...) - random characters
//! - `now` / `now_in` - current time with a strftime layout
//! - `format` - printf-style template with runtime arguments
//! - `grow` - capacity reservation
//! - `merge` - splice a caller-built buffer into the pipeline
//! - `custom` - any closure over the buffer and random source

pub mod error;
pub mod generators;
pub mod pipeline;
pub mod session;
pub mod source;

pub use error::GenerationError;
pub use generators::charset::{CharSet, NamedSet};
pub use generators::format::FormatArg;
pub use generators::timestamp::Zone;
pub use generators::{CustomGenerator, Generator};
pub use pipeline::{build, build_with, generate};
pub use session::{default_session, Session};
pub use source::{RandomSource, SecureSource, SeededSource};

/// Append `text` verbatim.
pub fn fix(text: impl Into<String>) -> Generator {
    Generator::Fixed(text.into())
}

/// Append exactly one of `choices`.
pub fn one_of<I, S>(choices: I) -> Generator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Generator::OneOf(choices.into_iter().map(Into::into).collect())
}

/// Append `length` characters sampled from `set`.
pub fn charset(set: impl Into<CharSet>, length: usize) -> Generator {
    Generator::CharSet {
        set: set.into(),
        min: length,
        max: None,
    }
}

/// Append between `min` and `max` (inclusive) characters sampled from `set`.
///
/// A `max` not above `min` means exactly `min` characters.
pub fn charset_range(set: impl Into<CharSet>, min: usize, max: usize) -> Generator {
    Generator::CharSet {
        set: set.into(),
        min,
        max: Some(max),
    }
}

macro_rules! named_set_generators {
    ($($name:ident, $range:ident => $set:ident;)+) => {
        $(
            #[doc = concat!("Append `length` characters from [`NamedSet::", stringify!($set), "`].")]
            pub fn $name(length: usize) -> Generator {
                charset(NamedSet::$set, length)
            }

            #[doc = concat!("Append `min..=max` characters from [`NamedSet::", stringify!($set), "`].")]
            pub fn $range(min: usize, max: usize) -> Generator {
                charset_range(NamedSet::$set, min, max)
            }
        )+
    };
}

named_set_generators! {
    numbers, numbers_range => Numbers;
    lowers, lowers_range => Lowers;
    uppers, uppers_range => Uppers;
    alpha_numeric, alpha_numeric_range => AlphaNumeric;
    lowers_alpha_numeric, lowers_alpha_numeric_range => LowersAlphaNumeric;
    uppers_alpha_numeric, uppers_alpha_numeric_range => UppersAlphaNumeric;
    symbol_all, symbol_all_range => SymbolAll;
    all, all_range => All;
    base64, base64_range => Base64;
    base64_url, base64_url_range => Base64Url;
}

/// Append the current local time rendered with the strftime `layout`.
pub fn now(layout: impl Into<String>) -> Generator {
    now_in(layout, Zone::Local)
}

/// Append the current time in `zone` rendered with the strftime `layout`.
pub fn now_in(layout: impl Into<String>, zone: impl Into<Zone>) -> Generator {
    Generator::Now {
        layout: layout.into(),
        zone: zone.into(),
    }
}

/// Append `template` rendered printf-style with `args`.
pub fn format<I, A>(template: impl Into<String>, args: I) -> Generator
where
    I: IntoIterator<Item = A>,
    A: Into<FormatArg>,
{
    Generator::Format {
        template: template.into(),
        args: args.into_iter().map(Into::into).collect(),
    }
}

/// Reserve room for `additional` bytes; output is unaffected.
pub fn grow(additional: usize) -> Generator {
    Generator::Grow(additional)
}

/// Splice `buffer` into the pipeline at this position, reusing its
/// allocation for everything that follows.
pub fn merge(buffer: String) -> Generator {
    Generator::Merge(buffer)
}

/// Wrap a closure as a unit.
pub fn custom<F>(name: impl Into<String>, func: F) -> Generator
where
    F: Fn(String, &mut dyn RandomSource) -> Result<String, GenerationError>
        + Send
        + Sync
        + 'static,
{
    Generator::Custom(CustomGenerator::new(name, func))
}
