use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::community::CommunityConfig;
use crate::graph::cycles::DEFAULT_MAX_CYCLE_LENGTH;
use crate::metrics::pagerank::PageRankConfig;

/// Settings for every analysis, as read from a TOML file.
///
/// ```toml
/// [pagerank]
/// damping = 0.85
/// iterations = 100
///
/// [community]
/// max_iterations = 100
///
/// [cycles]
/// max_length = 6
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub pagerank: PageRankConfig,
    #[serde(default)]
    pub community: CommunityConfig,
    #[serde(default)]
    pub cycles: CycleConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleConfig {
    /// Longest cycle to enumerate. Values below 2 disable enumeration.
    #[serde(default = "default_max_cycle_length")]
    pub max_length: usize,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_cycle_length(),
        }
    }
}

impl AnalysisConfig {
    /// Check every section.
    ///
    /// # Errors
    ///
    /// Returns an error if the PageRank section is invalid.
    pub fn validate(&self) -> Result<()> {
        self.pagerank
            .validate()
            .context("invalid [pagerank] configuration")
    }
}

/// Load and validate an [`AnalysisConfig`].
///
/// `None` or a path that does not exist yields the defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, or holds
/// invalid values.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    if !path.exists() {
        return Ok(AnalysisConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<AnalysisConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

const fn default_max_cycle_length() -> usize {
    DEFAULT_MAX_CYCLE_LENGTH
}
