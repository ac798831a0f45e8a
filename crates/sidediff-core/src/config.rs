use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compute::ComputeOptions;
use crate::error::{DiffError, DiffResult};
use crate::fold::FoldOptions;
use crate::method::DiffMethod;

/// User-facing configuration for computing and displaying a diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Show modified lines whole instead of highlighting within them.
    pub disable_word_diff: bool,
    /// Granularity used within modified lines.
    pub compare_method: DiffMethod,
    /// Added to every line number.
    pub line_number_offset: usize,
    /// Unchanged rows kept around each change when folding.
    pub extra_lines_surrounding_diff: usize,
    /// Fold unchanged rows away from changes.
    pub show_diff_only: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            disable_word_diff: false,
            compare_method: DiffMethod::Chars,
            line_number_offset: 0,
            extra_lines_surrounding_diff: 3,
            show_diff_only: true,
        }
    }
}

impl DiffConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> DiffResult<Self> {
        toml::from_str(source).map_err(|e| DiffError::Config(e.to_string()))
    }

    /// Load a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> DiffResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn compute_options(&self) -> ComputeOptions {
        ComputeOptions {
            disable_word_diff: self.disable_word_diff,
            compare_method: self.compare_method,
            line_number_offset: self.line_number_offset,
        }
    }

    pub fn fold_options(&self) -> FoldOptions {
        FoldOptions {
            extra_lines_surrounding_diff: self.extra_lines_surrounding_diff,
            ..Default::default()
        }
    }
}
