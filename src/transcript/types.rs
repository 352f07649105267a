//! Canonical transcript types handed to feature extraction.

/// Contiguous coding span in cDNA coordinates (1-based start, end as used for slicing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodingSpan {
    pub start: u32,
    pub end: u32,
}

/// The single transcript chosen to represent a gene. Every field is present.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalTranscript {
    pub transcript_id: String,
    pub gene_id: String,
    pub gene_name: String,
    pub source: String,
    pub appris: String,
    pub tsl: String,
    pub length: u32,
    pub coding: CodingSpan,
    pub sequence: Vec<u8>,
    pub description: String,
}

impl CanonicalTranscript {
    /// `codingEnd - codingStart`; may be negative for inconsistent coordinates.
    #[must_use]
    pub fn coding_length(&self) -> i64 {
        i64::from(self.coding.end) - i64::from(self.coding.start)
    }
}
