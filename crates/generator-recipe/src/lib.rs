//! Recipe files for randomstring pipelines.
//!
//! A recipe is a YAML (or TOML) document listing generator units in order:
//!
//! ```yaml
//! version: 1
//! seed: 42
//! units:
//!   - type: fixed
//!     value: "user-"
//!   - type: named
//!     set: lowers_alpha_numeric
//!     length: 8
//!     max_length: 12
//!   - type: now
//!     layout: "%Y%m%d"
//!     zone: "Asia/Tokyo"
//!   - type: format
//!     template: "-%04d"
//!     args: [7]
//! ```
//!
//! # Example
//!
//! ```rust
//! use generator_recipe::Recipe;
//!
//! let recipe = Recipe::from_yaml(r#"
//! units:
//!   - type: fixed
//!     value: "id-"
//!   - type: named
//!     set: numbers
//!     length: 6
//! "#).unwrap();
//!
//! let value = string_generator::build(recipe.generators().unwrap()).unwrap();
//! assert_eq!(value.len(), 9);
//! ```

mod error;
mod unit;

pub use error::RecipeError;
pub use unit::{yaml_to_format_arg, UnitConfig};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use string_generator::Generator;

/// Highest recipe version this crate understands.
pub const CURRENT_VERSION: u32 = 1;

fn default_version() -> u32 {
    CURRENT_VERSION
}

/// A pipeline description loaded from a recipe file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Seed for reproducible output; absent means the secure source
    #[serde(default)]
    pub seed: Option<u64>,

    /// Units in execution order
    pub units: Vec<UnitConfig>,
}

impl Recipe {
    /// Parse a recipe from YAML.
    pub fn from_yaml(content: &str) -> Result<Self, RecipeError> {
        let recipe: Recipe = serde_yaml::from_str(content)?;
        recipe.check_version()
    }

    /// Parse a recipe from TOML.
    pub fn from_toml(content: &str) -> Result<Self, RecipeError> {
        let recipe: Recipe = toml::from_str(content)?;
        recipe.check_version()
    }

    /// Load a recipe, choosing the parser from the file extension
    /// (`.yaml`, `.yml` or `.toml`).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RecipeError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let content = fs::read_to_string(path)?;

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            Some("toml") => Self::from_toml(&content),
            _ => Err(RecipeError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Build the generator units this recipe describes.
    ///
    /// Fails on zones or format arguments that cannot be represented; the
    /// remaining checks happen when the pipeline runs.
    pub fn generators(&self) -> Result<Vec<Generator>, RecipeError> {
        self.units.iter().map(UnitConfig::to_generator).collect()
    }

    fn check_version(self) -> Result<Self, RecipeError> {
        if self.version == 0 || self.version > CURRENT_VERSION {
            return Err(RecipeError::UnsupportedVersion(self.version));
        }
        Ok(self)
    }
}
