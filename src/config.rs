use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::labels::LabelCorrections;
use crate::data::model::SampleOrder;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Header names of the four columns the loader needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub group: String,
    pub run: String,
    pub angle: String,
    pub intensity: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            group: "Type".to_string(),
            run: "Run ID".to_string(),
            angle: "Angle".to_string(),
            intensity: "Intensity".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Analysis configuration
// ---------------------------------------------------------------------------

/// Everything that steers one analysis pass.  Every field has a default, so
/// a config file only needs the keys it changes:
///
/// ```json
/// {
///   "normalize": false,
///   "label_corrections": { "FoV1": "FoV 1" },
///   "run_priority": ["Run 3", "Run 1"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rescale every run by its own maximum before extracting the FWHM.
    pub normalize: bool,
    /// Exact-match group label rewrites applied right after loading.
    pub label_corrections: LabelCorrections,
    /// Run ids in the order the prioritized chart pass draws them.
    pub run_priority: Vec<String>,
    /// Scan samples in file row order instead of sorting by angle.
    pub preserve_input_order: bool,
    pub columns: ColumnNames,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            normalize: true,
            label_corrections: [("FoV1", "FoV 1"), ("FoV2", "FoV 2")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            run_priority: vec!["Run 1".to_string(), "Run 2".to_string(), "Run 3".to_string()],
            preserve_input_order: false,
            columns: ColumnNames::default(),
        }
    }
}

impl AnalysisConfig {
    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn sample_order(&self) -> SampleOrder {
        if self.preserve_input_order {
            SampleOrder::Input
        } else {
            SampleOrder::Angle
        }
    }
}
