use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Settings for the feature extraction stage, loaded from a JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureConfig {
    /// Transcripts whose 3'UTR is at least this long are rejected.
    pub utr3_max_length: usize,
    #[serde(default = "default_kozak_radius")]
    pub kozak_radius: usize,
    #[serde(default = "default_kozak_context_radius")]
    pub kozak_context_radius: usize,
    #[serde(default = "default_local_score_clip")]
    pub local_score_clip: usize,
    #[serde(default = "default_rnafold")]
    pub rnafold: PathBuf,
    #[serde(default = "default_true")]
    pub folding_energy: bool,
}

fn default_kozak_radius() -> usize {
    10
}

fn default_kozak_context_radius() -> usize {
    20
}

fn default_local_score_clip() -> usize {
    50
}

fn default_rnafold() -> PathBuf {
    PathBuf::from("RNAfold")
}

fn default_true() -> bool {
    true
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            utr3_max_length: 1000,
            kozak_radius: default_kozak_radius(),
            kozak_context_radius: default_kozak_context_radius(),
            local_score_clip: default_local_score_clip(),
            rnafold: default_rnafold(),
            folding_energy: true,
        }
    }
}

impl FeatureConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.utr3_max_length == 0 {
            bail!("invalid utr3MaxLength: must be greater than 0");
        }
        if self.local_score_clip == 0 {
            bail!("invalid localScoreClip: must be greater than 0");
        }
        if self.folding_energy && self.rnafold.as_os_str().is_empty() {
            bail!("invalid rnafold: empty path with foldingEnergy enabled");
        }
        Ok(())
    }
}
