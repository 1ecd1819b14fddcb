//! # Coercion Configuration
//!
//! The standard gateway's behaviour is driven by [`CoercionConfig`], loaded with
//! [`confique`] from compiled defaults, an optional TOML file and environment
//! variables.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `ATTRKIT_TRIM_STRINGS`, `ATTRKIT_WRAP_SCALARS`.
//! 2. **TOML file**: passed to [`CoercionConfig::load`]; a missing file is skipped.
//! 3. **Compiled Defaults**: built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `true_values` | `["true", "yes", "on", "t", "y", "1"]` | Text accepted as `true` |
//! | `false_values` | `["false", "no", "off", "f", "n", "0"]` | Text accepted as `false` |
//! | `trim_strings` | `true` | Trim text before parsing it into another type |
//! | `wrap_scalars` | `false` | Wrap a non-sequence into a one-element sequence |

use std::path::Path;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::Result;

fn default_true_values() -> Vec<String> {
    ["true", "yes", "on", "t", "y", "1"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_false_values() -> Vec<String> {
    ["false", "no", "off", "f", "n", "0"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Configuration for the standard coercion gateway, stored in TOML.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CoercionConfig {
    /// Text accepted as `true` when coercing to Bool (case-insensitive).
    #[config(default = ["true", "yes", "on", "t", "y", "1"])]
    pub true_values: Vec<String>,

    /// Text accepted as `false` when coercing to Bool (case-insensitive).
    #[config(default = ["false", "no", "off", "f", "n", "0"])]
    pub false_values: Vec<String>,

    /// Trim surrounding whitespace from text before parsing it.
    #[config(default = true, env = "ATTRKIT_TRIM_STRINGS")]
    pub trim_strings: bool,

    /// Accept a single value where a sequence is declared.
    #[config(default = false, env = "ATTRKIT_WRAP_SCALARS")]
    pub wrap_scalars: bool,
}

impl Default for CoercionConfig {
    fn default() -> Self {
        Self {
            true_values: default_true_values(),
            false_values: default_false_values(),
            trim_strings: true,
            wrap_scalars: false,
        }
    }
}

impl CoercionConfig {
    /// Load from the environment, an optional TOML file and the compiled defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// Sample TOML file listing every setting with its default.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }

    /// Match text against the configured boolean spellings.
    pub fn parse_bool(&self, text: &str) -> Option<bool> {
        let matches = |values: &[String]| values.iter().any(|v| v.eq_ignore_ascii_case(text));
        if matches(&self.true_values) {
            Some(true)
        } else if matches(&self.false_values) {
            Some(false)
        } else {
            None
        }
    }

    /// Apply `trim_strings` to input text.
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        if self.trim_strings {
            input.trim()
        } else {
            input
        }
    }
}
