//! Translator configuration.

use crate::decompose::DEFAULT_MAX_DECOMPOSITION_DEPTH;
use phenograph_model::vocab::SYMMETRIC_QUALITIES;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// How opaque instance ids (dataset, OTU, character, state, cell, specimen)
/// are minted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum InstanceIdScheme {
    /// UUID v4 per instance.
    #[default]
    Random,
    /// `<prefix><kind>-<n>`, counted per translation call. Re-running on the
    /// same input reproduces the same ids.
    Sequential { prefix: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Quality ids for which mirrored phenotypes are synthesized.
    pub symmetric_qualities: BTreeSet<String>,
    pub max_decomposition_depth: usize,
    pub instance_ids: InstanceIdScheme,
    /// Stamped on every instance node the translator creates.
    pub source_id: Option<String>,
    /// Label synthesized phenotype nodes from reasoner class labels.
    pub label_descriptions: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            symmetric_qualities: SYMMETRIC_QUALITIES.iter().map(|q| q.to_string()).collect(),
            max_decomposition_depth: DEFAULT_MAX_DECOMPOSITION_DEPTH,
            instance_ids: InstanceIdScheme::default(),
            source_id: None,
            label_descriptions: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

impl TranslatorConfig {
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn with_sequential_ids(mut self, prefix: impl Into<String>) -> Self {
        self.instance_ids = InstanceIdScheme::Sequential {
            prefix: prefix.into(),
        };
        self
    }

    pub fn is_symmetric(&self, quality_id: &str) -> bool {
        self.symmetric_qualities.contains(quality_id)
    }
}
