//! Per-transcript feature extraction.

pub mod orf;
pub mod window;

use rayon::prelude::*;

use crate::batch::RegionBatches;
use crate::cli;
use crate::config::FeatureConfig;
use crate::sequence::gc_content;
use crate::transcript::types::CanonicalTranscript;

use self::orf::{OrfCandidate, scan_orfs};
use self::window::{
    coding_region, five_prime_utr, kozak_context, kozak_sequence, passes_utr3_gate,
    three_prime_utr,
};

/// Sequence-derived features of one canonical transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptFeatures {
    pub transcript_id: String,
    pub gene_id: String,
    pub gene_name: String,
    pub coding_length: i64,
    pub utr5_length: usize,
    pub utr5_gc: f64,
    pub utr3_length: usize,
    pub utr3_gc: f64,
    pub kozak_sequence: String,
    pub kozak_context: String,
    pub uorfs: Vec<OrfCandidate>,
    pub dorfs: Vec<OrfCandidate>,
    pub utr5: Vec<u8>,
    pub utr3: Vec<u8>,
    pub coding: Vec<u8>,
}

impl TranscriptFeatures {
    /// Whether the coding length is a whole number of codons.
    ///
    /// Uses `codingEnd - codingStart`, which is one less than the sliced coding
    /// region length when the end coordinate is inclusive.
    #[must_use]
    pub fn has_codon_multiple_length(&self) -> bool {
        self.coding_length % 3 == 0
    }
}

/// Counters for one extraction pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionStats {
    pub num_input: u32,
    pub num_extracted: u32,
    pub num_rejected_utr3: u32,
    pub num_malformed_coding: u32,
}

/// Extracts features of one transcript, or `None` when its 3'UTR fails the length gate.
#[must_use]
pub fn extract_transcript(
    transcript: &CanonicalTranscript,
    config: &FeatureConfig,
) -> Option<TranscriptFeatures> {
    let seq = transcript.sequence.as_slice();
    let coding = transcript.coding;

    let utr3 = three_prime_utr(seq, coding);
    if !passes_utr3_gate(utr3.len(), config.utr3_max_length) {
        return None;
    }

    let utr5 = five_prime_utr(seq, coding);
    let cds = coding_region(seq, coding);
    let kozak = kozak_sequence(seq, coding, config.kozak_radius);
    let context = kozak_context(seq, coding, config.kozak_radius, config.kozak_context_radius);

    let features = TranscriptFeatures {
        transcript_id: transcript.transcript_id.clone(),
        gene_id: transcript.gene_id.clone(),
        gene_name: transcript.gene_name.clone(),
        coding_length: transcript.coding_length(),
        utr5_length: utr5.len(),
        utr5_gc: gc_content(utr5.sequence),
        utr3_length: utr3.len(),
        utr3_gc: gc_content(utr3.sequence),
        kozak_sequence: String::from_utf8_lossy(kozak.sequence).into_owned(),
        kozak_context: String::from_utf8_lossy(context.sequence).into_owned(),
        uorfs: scan_orfs(utr5.sequence),
        dorfs: scan_orfs(utr3.sequence),
        utr5: utr5.sequence.to_vec(),
        utr3: utr3.sequence.to_vec(),
        coding: cds.sequence.to_vec(),
    };

    if !features.has_codon_multiple_length() {
        cli::warning(&format!(
            "{}: coding length {} is not a multiple of 3",
            features.transcript_id, features.coding_length
        ));
    }

    Some(features)
}

/// Extracts features of every transcript in parallel, keeping input order.
pub fn extract_all(
    transcripts: &[CanonicalTranscript],
    config: &FeatureConfig,
) -> (Vec<TranscriptFeatures>, ExtractionStats) {
    let results: Vec<Option<TranscriptFeatures>> = transcripts
        .par_iter()
        .map(|t| extract_transcript(t, config))
        .collect();

    let mut stats = ExtractionStats {
        num_input: transcripts.len() as u32,
        ..ExtractionStats::default()
    };
    let mut features = Vec::with_capacity(results.len());

    for result in results {
        match result {
            Some(f) => {
                if !f.has_codon_multiple_length() {
                    stats.num_malformed_coding += 1;
                }
                stats.num_extracted += 1;
                features.push(f);
            }
            None => stats.num_rejected_utr3 += 1,
        }
    }

    (features, stats)
}

/// Collects the 5'UTR, 3'UTR and coding sequences of every row into batches.
#[must_use]
pub fn build_region_batches(features: &[TranscriptFeatures]) -> RegionBatches {
    let mut batches = RegionBatches::default();
    for f in features {
        batches.five_prime_utr.push(&f.transcript_id, &f.utr5);
        batches.three_prime_utr.push(&f.transcript_id, &f.utr3);
        batches.coding.push(&f.transcript_id, &f.coding);
    }
    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::types::CodingSpan;

    fn transcript(id: &str, sequence: &[u8], start: u32, end: u32) -> CanonicalTranscript {
        CanonicalTranscript {
            transcript_id: id.to_string(),
            gene_id: format!("G_{id}"),
            gene_name: format!("NAME_{id}"),
            source: "ensembl_havana".to_string(),
            appris: "principal1".to_string(),
            tsl: "tsl1".to_string(),
            length: sequence.len() as u32,
            coding: CodingSpan { start, end },
            sequence: sequence.to_vec(),
            description: "test gene".to_string(),
        }
    }

    fn config(utr3_max_length: usize) -> FeatureConfig {
        FeatureConfig {
            utr3_max_length,
            kozak_radius: 2,
            kozak_context_radius: 3,
            ..FeatureConfig::default()
        }
    }

    // 5'UTR ATGCCCTAA (9) | CDS ATGAAATAG (9) | 3'UTR GGCC (4)
    const SEQ: &[u8] = b"ATGCCCTAAATGAAATAGGGCC";

    #[test]
    fn extracts_regions_and_orfs() {
        let t = transcript("T1", SEQ, 10, 18);
        let f = extract_transcript(&t, &config(100)).unwrap();
        assert_eq!(f.utr5, b"ATGCCCTAA");
        assert_eq!(f.coding, b"ATGAAATAG");
        assert_eq!(f.utr3, b"GGCC");
        assert_eq!(f.utr5_length, 9);
        assert_eq!(f.utr3_length, 4);
        assert!((f.utr3_gc - 100.0).abs() < 1e-9);
        assert_eq!(f.uorfs, vec![OrfCandidate { start: 0, end: 9 }]);
        assert!(f.dorfs.is_empty());
        assert_eq!(f.kozak_sequence, "AAATGAA");
        assert_eq!(f.kozak_context, "CCTAAATGAAATAGG");
        assert_eq!(f.coding_length, 8);
        assert!(!f.has_codon_multiple_length());
        // Sliced region includes the end coordinate
        assert_eq!(f.coding.len() as i64, f.coding_length + 1);
    }

    #[test]
    fn malformed_coding_length_still_emitted() {
        let seq = b"ATGAAATAGCCCCC";
        let f = extract_transcript(&transcript("T1", seq, 1, 10), &config(100)).unwrap();
        assert_eq!(f.coding_length, 9);
        assert!(f.has_codon_multiple_length());

        let f = extract_transcript(&transcript("T1", seq, 1, 11), &config(100)).unwrap();
        assert_eq!(f.coding_length, 10);
        assert!(!f.has_codon_multiple_length());
    }

    #[test]
    fn utr3_gate_rejects() {
        let t = transcript("T1", SEQ, 10, 18);
        assert!(extract_transcript(&t, &config(4)).is_none());
        assert!(extract_transcript(&t, &config(5)).is_some());
    }

    #[test]
    fn extract_all_keeps_order_and_counts() {
        let transcripts = vec![
            transcript("T1", SEQ, 10, 18),
            transcript("T2", b"ATGAAATAGCCCCCCCCCCCC", 1, 10),
            transcript("T3", b"CCATGAAATAGCC", 3, 12),
        ];
        let (features, stats) = extract_all(&transcripts, &config(10));
        let ids: Vec<&str> = features.iter().map(|f| f.transcript_id.as_str()).collect();
        assert_eq!(ids, vec!["T1", "T3"]);
        assert_eq!(stats.num_input, 3);
        assert_eq!(stats.num_extracted, 2);
        assert_eq!(stats.num_rejected_utr3, 1);
        assert_eq!(stats.num_malformed_coding, 1);
    }

    #[test]
    fn batches_hold_placeholders_for_empty_utrs() {
        let t = transcript("T1", b"ATGAAATAG", 1, 9);
        let f = extract_transcript(&t, &config(10)).unwrap();
        let batches = build_region_batches(&[f]);
        let utr5: Vec<(&str, &[u8])> = batches.five_prime_utr.iter().collect();
        assert_eq!(utr5, vec![("T1", b"N".as_slice())]);
        let cds: Vec<(&str, &[u8])> = batches.coding.iter().collect();
        assert_eq!(cds, vec![("T1", b"ATGAAATAG".as_slice())]);
    }
}
