//! Unit entries of a recipe and their conversion to generators.

use crate::error::RecipeError;
use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;
use string_generator::{CharSet, FormatArg, Generator, NamedSet, Zone};

/// One unit of a recipe, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UnitConfig {
    /// Literal text
    Fixed {
        /// Text appended verbatim
        value: String,
    },

    /// One of several literals, chosen at random
    OneOf {
        /// Alternatives
        values: Vec<String>,
    },

    /// Characters from a predefined set
    Named {
        /// Predefined set name
        set: NamedSet,
        /// Length, or lower bound when `max_length` is above it
        #[serde(default)]
        length: usize,
        /// Optional inclusive upper bound
        #[serde(default)]
        max_length: Option<usize>,
    },

    /// Characters from an explicit set
    Charset {
        /// Characters to sample from
        chars: String,
        /// Length, or lower bound when `max_length` is above it
        #[serde(default)]
        length: usize,
        /// Optional inclusive upper bound
        #[serde(default)]
        max_length: Option<usize>,
    },

    /// Current time
    Now {
        /// strftime layout
        layout: String,
        /// `UTC`, `Local`, an IANA name or an offset; local time when absent
        #[serde(default)]
        zone: Option<String>,
    },

    /// printf-style template
    Format {
        /// Template with `%` verbs
        template: String,
        /// Scalar arguments
        #[serde(default)]
        args: Vec<YamlValue>,
    },

    /// Capacity reservation
    Grow {
        /// Bytes to reserve
        capacity: usize,
    },

    /// Pre-built fragment spliced into the pipeline
    Merge {
        /// Fragment content
        content: String,
        /// Capacity to allocate for the fragment buffer
        #[serde(default)]
        capacity: Option<usize>,
    },
}

impl UnitConfig {
    /// Convert this entry into a generator unit.
    pub fn to_generator(&self) -> Result<Generator, RecipeError> {
        let generator = match self {
            UnitConfig::Fixed { value } => Generator::Fixed(value.clone()),

            UnitConfig::OneOf { values } => Generator::OneOf(values.clone()),

            UnitConfig::Named {
                set,
                length,
                max_length,
            } => Generator::CharSet {
                set: CharSet::from(*set),
                min: *length,
                max: *max_length,
            },

            UnitConfig::Charset {
                chars,
                length,
                max_length,
            } => Generator::CharSet {
                set: CharSet::new(chars),
                min: *length,
                max: *max_length,
            },

            UnitConfig::Now { layout, zone } => {
                let zone = match zone {
                    Some(name) => {
                        Zone::parse(name).ok_or_else(|| RecipeError::InvalidZone(name.clone()))?
                    }
                    None => Zone::Local,
                };
                Generator::Now {
                    layout: layout.clone(),
                    zone,
                }
            }

            UnitConfig::Format { template, args } => Generator::Format {
                template: template.clone(),
                args: args
                    .iter()
                    .enumerate()
                    .map(|(i, v)| yaml_to_format_arg(v, i + 1))
                    .collect::<Result<_, _>>()?,
            },

            UnitConfig::Grow { capacity } => Generator::Grow(*capacity),

            UnitConfig::Merge { content, capacity } => {
                let mut buffer = String::new();
                // An unsatisfiable capacity hint is dropped, not fatal.
                let _ = buffer.try_reserve(capacity.unwrap_or(0).max(content.len()));
                buffer.push_str(content);
                Generator::Merge(buffer)
            }
        };
        Ok(generator)
    }
}

/// Convert a scalar YAML value to a format argument.
///
/// `position` is 1-based and only used in the error.
pub fn yaml_to_format_arg(yaml: &YamlValue, position: usize) -> Result<FormatArg, RecipeError> {
    let invalid = |reason: &str| RecipeError::InvalidArgument {
        position,
        reason: reason.to_string(),
    };

    match yaml {
        YamlValue::Bool(b) => Ok(FormatArg::Bool(*b)),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(FormatArg::Int(i))
            } else if let Some(u) = n.as_u64() {
                Ok(FormatArg::Uint(u))
            } else if let Some(f) = n.as_f64() {
                Ok(FormatArg::Float(f))
            } else {
                Err(invalid("unrepresentable number"))
            }
        }
        YamlValue::String(s) => Ok(FormatArg::Str(s.clone())),
        YamlValue::Tagged(tagged) => yaml_to_format_arg(&tagged.value, position),
        YamlValue::Null => Err(invalid("null has no formatted form")),
        YamlValue::Sequence(_) => Err(invalid("sequences are not scalar")),
        YamlValue::Mapping(_) => Err(invalid("mappings are not scalar")),
    }
}
