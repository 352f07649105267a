//! Scalar feature tools run over whole region batches.
//!
//! Each tool sees one [`SequenceBatch`] and returns one value per column for
//! every transcript in it. A tool that cannot produce a value for some
//! transcript fails the whole batch.

pub mod cai;
pub mod local_score;
pub mod rnafold;

use std::collections::HashMap;

use rayon::prelude::*;

use crate::batch::{Region, RegionBatches, SequenceBatch};
use crate::config::FeatureConfig;
use crate::error::Error;

pub use cai::CodonAdaptation;
pub use local_score::LocalScore;
pub use rnafold::RnaFold;

/// Named scalar columns keyed by transcript id.
#[derive(Debug, Clone, Default)]
pub struct ScalarColumns {
    tool: String,
    names: Vec<String>,
    values: HashMap<String, Vec<f64>>,
}

impl ScalarColumns {
    #[must_use]
    pub fn new(tool: &str, names: Vec<String>) -> Self {
        Self {
            tool: tool.to_string(),
            names,
            values: HashMap::new(),
        }
    }

    /// Records the row of one transcript; the row must match the column count.
    pub fn insert(&mut self, transcript_id: &str, row: Vec<f64>) -> Result<(), Error> {
        if row.len() != self.names.len() {
            return Err(Error::external(
                &self.tool,
                format!(
                    "{transcript_id}: expected {} values, got {}",
                    self.names.len(),
                    row.len()
                ),
            ));
        }
        if self.values.insert(transcript_id.to_string(), row).is_some() {
            return Err(Error::external(
                &self.tool,
                format!("duplicate result for {transcript_id}"),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn tool(&self) -> &str {
        &self.tool
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn get(&self, transcript_id: &str) -> Option<&[f64]> {
        self.values.get(transcript_id).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fails unless every transcript of `batch` has a row.
    pub fn ensure_covers(&self, batch: &SequenceBatch) -> Result<(), Error> {
        match batch.iter().find(|(id, _)| !self.values.contains_key(*id)) {
            Some((id, _)) => Err(Error::external(
                &self.tool,
                format!("no result for {id}{}", batch.region().suffix()),
            )),
            None => Ok(()),
        }
    }
}

/// A feature computed over every sequence of one region batch.
pub trait RegionTool: Sync {
    /// Tool name used in error messages.
    fn name(&self) -> &str;

    /// Region whose batch the tool consumes.
    fn region(&self) -> Region;

    /// Computes the tool's columns for every transcript of `batch`.
    fn run(&self, batch: &SequenceBatch) -> Result<ScalarColumns, Error>;
}

/// Applies a per-sequence scoring function to every record of a batch.
pub(crate) fn score_each<F>(
    tool: &str,
    names: Vec<String>,
    batch: &SequenceBatch,
    score: F,
) -> Result<ScalarColumns, Error>
where
    F: Fn(&[u8]) -> Vec<f64>,
{
    let mut columns = ScalarColumns::new(tool, names);
    for (id, seq) in batch.iter() {
        columns.insert(id, score(seq))?;
    }
    Ok(columns)
}

/// Tools enabled by `config`, in output column order.
#[must_use]
pub fn default_tools(config: &FeatureConfig) -> Vec<Box<dyn RegionTool>> {
    let mut tools: Vec<Box<dyn RegionTool>> = Vec::new();
    if config.folding_energy {
        tools.push(Box::new(RnaFold::new(&config.rnafold, Region::FivePrimeUtr)));
        tools.push(Box::new(RnaFold::new(&config.rnafold, Region::ThreePrimeUtr)));
    }
    tools.push(Box::new(LocalScore::new(config.local_score_clip)));
    tools.push(Box::new(CodonAdaptation::human()));
    tools
}

/// Runs every tool over its region batch, in parallel, keeping tool order.
///
/// Any failure or missing row aborts the whole run.
pub fn run_tools(
    tools: &[Box<dyn RegionTool>],
    batches: &RegionBatches,
) -> Result<Vec<ScalarColumns>, Error> {
    tools
        .par_iter()
        .map(|tool| {
            let batch = batches.get(tool.region());
            let columns = tool.run(batch)?;
            columns.ensure_covers(batch)?;
            Ok(columns)
        })
        .collect()
}
