//! Pipeline execution.

use crate::error::GenerationError;
use crate::generators::Generator;
use crate::source::{RandomSource, SecureSource};
use tracing::{debug, trace};

/// Run `generators` in order against `source` and return the final string.
///
/// Stops at the first failing unit and returns its error; output produced
/// up to that point is dropped.
pub fn build_with<R, I>(source: &mut R, generators: I) -> Result<String, GenerationError>
where
    R: RandomSource,
    I: IntoIterator<Item = Generator>,
{
    let mut buf = String::new();
    let mut units = 0usize;

    for (index, generator) in generators.into_iter().enumerate() {
        let kind = generator.kind();
        buf = generator.apply(buf, source).map_err(|e| {
            debug!(index, kind, error = %e, "generator unit failed");
            e
        })?;
        units = index + 1;
    }

    trace!(units, len = buf.len(), "pipeline finished");
    Ok(buf)
}

/// Run `generators` with a fresh secure random source.
pub fn build<I>(generators: I) -> Result<String, GenerationError>
where
    I: IntoIterator<Item = Generator>,
{
    build_with(&mut SecureSource, generators)
}

/// Like [`build`], but panics if any unit fails.
///
/// For call sites that treat generation failure as unrecoverable.
pub fn generate<I>(generators: I) -> String
where
    I: IntoIterator<Item = Generator>,
{
    match build(generators) {
        Ok(value) => value,
        Err(e) => panic!("string generation failed: {e}"),
    }
}
