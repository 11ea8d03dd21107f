//! Literal text and alternative selection.

use crate::error::GenerationError;
use crate::source::RandomSource;

/// Append one of `choices`, selected with a single draw.
pub fn append_one_of<R: RandomSource>(
    buf: &mut String,
    choices: &[String],
    source: &mut R,
) -> Result<(), GenerationError> {
    if choices.is_empty() {
        return Err(GenerationError::EmptyChoices);
    }
    let idx = source.draw(choices.len())?;
    buf.push_str(&choices[idx]);
    Ok(())
}
