//! In-memory batches of region sequences handed to feature tools.
//!
//! A batch is materialised on disk only as a scoped temporary file, removed
//! when the handle drops, or persisted explicitly to a caller-chosen path.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Error;
use crate::fasta;

/// Placeholder written for an empty region.
pub const EMPTY_REGION: &[u8] = b"N";

/// Transcript region a batch holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    FivePrimeUtr,
    ThreePrimeUtr,
    Coding,
}

impl Region {
    /// Identifier suffix used in batch records.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::FivePrimeUtr => "_5PUTR",
            Self::ThreePrimeUtr => "_3PUTR",
            Self::Coding => "_CDS",
        }
    }

    /// Column prefix used for per-region scalar features.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FivePrimeUtr => "5pUTR",
            Self::ThreePrimeUtr => "3pUTR",
            Self::Coding => "CDS",
        }
    }

    /// Strips this region's suffix from a record identifier.
    #[must_use]
    pub fn strip_suffix(self, id: &str) -> Option<&str> {
        id.strip_suffix(self.suffix()).filter(|s| !s.is_empty())
    }
}

/// Ordered `(transcript id, sequence)` pairs for one region.
#[derive(Debug, Clone)]
pub struct SequenceBatch {
    region: Region,
    records: Vec<(String, Vec<u8>)>,
}

impl SequenceBatch {
    #[must_use]
    pub fn new(region: Region) -> Self {
        Self {
            region,
            records: Vec::new(),
        }
    }

    /// Adds a region sequence; an empty one is stored as the `N` placeholder.
    pub fn push(&mut self, transcript_id: &str, sequence: &[u8]) {
        let sequence = if sequence.is_empty() {
            EMPTY_REGION
        } else {
            sequence
        };
        self.records
            .push((transcript_id.to_string(), sequence.to_vec()));
    }

    #[must_use]
    pub fn region(&self) -> Region {
        self.region
    }

    /// Records as `(transcript id, sequence)`, without the region suffix.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.records
            .iter()
            .map(|(id, seq)| (id.as_str(), seq.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the batch as FASTA with suffixed identifiers.
    pub fn write_fasta<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        let suffix = self.region.suffix();
        for (id, seq) in &self.records {
            fasta::write_record(writer, &format!("{id}{suffix}"), seq)?;
        }
        Ok(())
    }

    /// Writes the batch to a temporary file that is deleted when the handle drops.
    pub fn to_temp_file(&self) -> Result<NamedTempFile, Error> {
        let mut file = tempfile::Builder::new()
            .prefix("rnafeat-")
            .suffix(".fa")
            .tempfile()?;
        {
            let mut writer = BufWriter::new(file.as_file_mut());
            self.write_fasta(&mut writer)?;
            writer.flush()?;
        }
        Ok(file)
    }

    /// Writes the batch to `path`, replacing any existing file.
    pub fn persist(&self, path: &Path) -> Result<(), Error> {
        let file = File::create(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("failed to create {}: {e}", path.display()),
            ))
        })?;
        let mut writer = BufWriter::new(file);
        self.write_fasta(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// The three region batches built from one extraction pass.
#[derive(Debug, Clone)]
pub struct RegionBatches {
    pub five_prime_utr: SequenceBatch,
    pub three_prime_utr: SequenceBatch,
    pub coding: SequenceBatch,
}

impl Default for RegionBatches {
    fn default() -> Self {
        Self {
            five_prime_utr: SequenceBatch::new(Region::FivePrimeUtr),
            three_prime_utr: SequenceBatch::new(Region::ThreePrimeUtr),
            coding: SequenceBatch::new(Region::Coding),
        }
    }
}

impl RegionBatches {
    #[must_use]
    pub fn get(&self, region: Region) -> &SequenceBatch {
        match region {
            Region::FivePrimeUtr => &self.five_prime_utr,
            Region::ThreePrimeUtr => &self.three_prime_utr,
            Region::Coding => &self.coding,
        }
    }
}
