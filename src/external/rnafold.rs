//! Minimum free energy of folding via the ViennaRNA `RNAfold` binary.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::batch::{Region, SequenceBatch};
use crate::error::Error;

use super::{RegionTool, ScalarColumns};

const TOOL: &str = "RNAfold";

/// One folded record from `RNAfold` output.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldResult {
    pub id: String,
    pub length: usize,
    pub mfe: f64,
}

impl FoldResult {
    /// Energy per nucleotide.
    #[must_use]
    pub fn mfe_per_base(&self) -> f64 {
        if self.length == 0 {
            0.0
        } else {
            self.mfe / self.length as f64
        }
    }
}

/// Runs `RNAfold` once per batch and reports `{region}_MFE` and `{region}_MfeBP`.
pub struct RnaFold {
    binary: PathBuf,
    region: Region,
}

impl RnaFold {
    #[must_use]
    pub fn new(binary: &Path, region: Region) -> Self {
        Self {
            binary: binary.to_path_buf(),
            region,
        }
    }

    fn column_names(&self) -> Vec<String> {
        let label = self.region.label();
        vec![format!("{label}_MFE"), format!("{label}_MfeBP")]
    }

    fn execute(&self, input: &Path) -> Result<String, Error> {
        let output = Command::new(&self.binary)
            .args(["--verbose", "--noPS", "--jobs", "-i"])
            .arg(input)
            .output()
            .map_err(|e| {
                Error::external(
                    TOOL,
                    format!("failed to run {}: {e}", self.binary.display()),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::external(
                TOOL,
                format!("exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| Error::external(TOOL, "output is not valid UTF-8"))
    }
}

impl RegionTool for RnaFold {
    fn name(&self) -> &str {
        TOOL
    }

    fn region(&self) -> Region {
        self.region
    }

    fn run(&self, batch: &SequenceBatch) -> Result<ScalarColumns, Error> {
        let mut columns = ScalarColumns::new(TOOL, self.column_names());
        if batch.is_empty() {
            return Ok(columns);
        }

        let input = batch.to_temp_file()?;
        let stdout = self.execute(input.path())?;
        let results = parse_output(&stdout, self.region)?;

        let expected: HashSet<&str> = batch.iter().map(|(id, _)| id).collect();
        for result in results {
            if !expected.contains(result.id.as_str()) {
                return Err(Error::external(
                    TOOL,
                    format!("unknown identifier in output: {}", result.id),
                ));
            }
            columns.insert(&result.id, vec![result.mfe, result.mfe_per_base()])?;
        }

        columns.ensure_covers(batch)?;
        Ok(columns)
    }
}

/// Parses `RNAfold --verbose` output: header, sequence and structure lines per record.
///
/// Identifiers are returned without the region suffix.
pub fn parse_output(stdout: &str, region: Region) -> Result<Vec<FoldResult>, Error> {
    let lines: Vec<&str> = stdout
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() % 3 != 0 {
        return Err(Error::external(
            TOOL,
            format!("truncated output: {} lines is not a whole number of records", lines.len()),
        ));
    }

    let mut results = Vec::with_capacity(lines.len() / 3);
    for record in lines.chunks_exact(3) {
        let header = record[0]
            .strip_prefix('>')
            .ok_or_else(|| Error::external(TOOL, format!("expected header line, got: {}", record[0])))?;
        let raw_id = header.split_whitespace().next().unwrap_or("");
        let id = region.strip_suffix(raw_id).ok_or_else(|| {
            Error::external(TOOL, format!("unexpected identifier in output: {raw_id}"))
        })?;

        results.push(FoldResult {
            id: id.to_string(),
            length: record[1].trim().len(),
            mfe: parse_energy(record[2])?,
        });
    }

    Ok(results)
}

/// Extracts the energy from a structure line such as `((...)) ( -1.20)`.
fn parse_energy(line: &str) -> Result<f64, Error> {
    let value = line
        .rsplit_once('(')
        .and_then(|(_, rest)| rest.strip_suffix(')'))
        .map(str::trim)
        .ok_or_else(|| Error::external(TOOL, format!("no energy on structure line: {line}")))?;
    value
        .parse::<f64>()
        .map_err(|_| Error::external(TOOL, format!("invalid energy value: {value}")))
}
