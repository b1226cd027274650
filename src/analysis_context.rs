use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

// Every knob of an analysis run lives here. Nothing is read from globals; main builds one of these,
// overlays a config file and the CLI flags, then hands it to the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisContext {
    // Graph construction. Strictly greater than, so 0.0 lets anyone with a goal or an assist in.
    pub goal_threshold: f64,
    pub assist_threshold: f64,

    pub top_n: usize,               // Neighbours listed per similarity query
    pub limit_display: usize,       // Components summarised in detail
    pub top_k_per_component: usize, // Top scorers listed per component

    // Last record wins unless this is set, in which case a repeated name aborts the build
    pub reject_duplicates: bool,

    pub delimiter: char,
    pub columns: ColumnNames,
}

// Header names in the season stats export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColumnNames {
    pub player: String,
    pub team: String,
    pub goals: String,
    pub assists: String,
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self {
            goal_threshold: 10.0,
            assist_threshold: 5.0,

            top_n: 5,
            limit_display: 5,
            top_k_per_component: 3,

            reject_duplicates: false,

            delimiter: ';',
            columns: ColumnNames::default(),
        }
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            player: "Player".to_string(),
            team: "Squad".to_string(),
            goals: "Total_Goals".to_string(),
            assists: "Assists".to_string(),
        }
    }
}

impl AnalysisContext {
    /// Reads a JSON config. Missing fields fall back to the defaults above.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let context: Self = serde_json::from_str(&data).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        context.validate()?;
        Ok(context)
    }

    // Negative and zero thresholds are fine ("no floor"), NaN and infinities are not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("goal_threshold", self.goal_threshold),
            ("assist_threshold", self.assist_threshold),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteThreshold { name, value });
            }
        }
        self.delimiter_byte()?;
        Ok(())
    }

    // The csv crate wants a single byte
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ConfigError::InvalidDelimiter(self.delimiter))
        }
    }
}
