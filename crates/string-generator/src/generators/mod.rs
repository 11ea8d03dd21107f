//! Individual generator units.
//!
//! Each unit appends to (or, for [`Generator::Merge`], replaces) the active
//! buffer of a pipeline. The per-kind logic lives in the submodules; this
//! module holds the [`Generator`] enum and its dispatch.

pub mod charset;
pub mod format;
pub mod literal;
pub mod merge;
pub mod timestamp;

use crate::error::GenerationError;
use crate::source::RandomSource;
use charset::CharSet;
use format::FormatArg;
use std::fmt;
use std::sync::Arc;
use timestamp::Zone;

type CustomFn =
    dyn Fn(String, &mut dyn RandomSource) -> Result<String, GenerationError> + Send + Sync;

/// A caller-supplied unit.
///
/// The closure receives the active buffer by value and returns the buffer
/// the rest of the pipeline should continue with.
#[derive(Clone)]
pub struct CustomGenerator {
    name: String,
    func: Arc<CustomFn>,
}

impl CustomGenerator {
    /// Wrap `func` under a name used in logs and `Debug` output.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(String, &mut dyn RandomSource) -> Result<String, GenerationError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CustomGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomGenerator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// One step of a pipeline.
#[derive(Debug, Clone)]
pub enum Generator {
    /// Append text verbatim.
    Fixed(String),

    /// Append exactly one of the alternatives, chosen with one draw.
    OneOf(Vec<String>),

    /// Append characters sampled from a set.
    CharSet {
        /// Characters to sample from
        set: CharSet,
        /// Length, or lower bound when `max` is above it
        min: usize,
        /// Optional inclusive upper bound
        max: Option<usize>,
    },

    /// Append the wall-clock time at the moment the unit runs.
    Now {
        /// strftime layout, e.g. `%Y-%m-%dT%H:%M:%S`
        layout: String,
        /// Zone the time is rendered in
        zone: Zone,
    },

    /// Append a printf-style rendering of `args`.
    Format {
        /// Template with `%` verbs
        template: String,
        /// Arguments consumed left to right
        args: Vec<FormatArg>,
    },

    /// Reserve spare capacity without emitting anything.
    Grow(usize),

    /// Hand the pipeline over to a caller-built buffer.
    Merge(String),

    /// Caller-supplied unit.
    Custom(CustomGenerator),
}

impl Generator {
    /// Short name of the unit kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Generator::Fixed(_) => "fixed",
            Generator::OneOf(_) => "one_of",
            Generator::CharSet { .. } => "charset",
            Generator::Now { .. } => "now",
            Generator::Format { .. } => "format",
            Generator::Grow(_) => "grow",
            Generator::Merge(_) => "merge",
            Generator::Custom(_) => "custom",
        }
    }

    /// Apply this unit to the active buffer and return the buffer the
    /// pipeline continues with.
    pub fn apply<R: RandomSource>(
        self,
        mut buf: String,
        source: &mut R,
    ) -> Result<String, GenerationError> {
        match self {
            Generator::Fixed(text) => buf.push_str(&text),

            Generator::OneOf(choices) => literal::append_one_of(&mut buf, &choices, source)?,

            Generator::CharSet { set, min, max } => {
                charset::append_charset(&mut buf, &set, min, max, source)?
            }

            Generator::Now { layout, zone } => timestamp::append_now(&mut buf, &layout, zone)?,

            Generator::Format { template, args } => {
                format::append_format(&mut buf, &template, &args)?
            }

            Generator::Grow(additional) => merge::grow(&mut buf, additional),

            Generator::Merge(external) => return Ok(merge::merge_into(buf, external)),

            Generator::Custom(custom) => return (custom.func)(buf, source),
        }
        Ok(buf)
    }
}
