//! Canonical transcript selection: first ranked candidate with a complete row.

use crate::annotation::record::{MergedTable, TranscriptRecord};

use super::rank::RankedGene;
use super::types::{CanonicalTranscript, CodingSpan};

/// Counters from a selection pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionStats {
    pub num_genes: u32,
    pub num_selected: u32,
    /// Genes with no complete candidate; they yield no canonical transcript.
    pub num_dropped_genes: u32,
    /// Candidates passed over because their merged row had an absent field.
    pub num_skipped_incomplete: u32,
}

/// Collapses per-exon coding coordinates into one span: minimum start, maximum end.
///
/// Multi-exon coding boundaries are merged into a single contiguous span.
#[must_use]
pub fn collapse_coding_exons(starts: &[u32], ends: &[u32]) -> Option<CodingSpan> {
    let start = starts.iter().copied().min()?;
    let end = ends.iter().copied().max()?;
    Some(CodingSpan { start, end })
}

/// Keeps the first whitespace-delimited token of a TSL cell.
fn clean_tsl(tsl: &str) -> String {
    tsl.split_whitespace().next().unwrap_or(tsl).to_string()
}

impl CanonicalTranscript {
    /// Resolves a complete record; `None` if any required field is absent.
    #[must_use]
    pub fn from_record(record: &TranscriptRecord) -> Option<Self> {
        let coding = collapse_coding_exons(
            record.coding_starts.as_deref()?,
            record.coding_ends.as_deref()?,
        )?;
        Some(Self {
            transcript_id: record.transcript_id.clone(),
            gene_id: record.gene_id.clone(),
            gene_name: record.gene_name.clone()?,
            source: record.source.clone()?,
            appris: record.appris.clone()?,
            tsl: clean_tsl(record.tsl.as_deref()?),
            length: record.length?,
            coding,
            sequence: record.sequence.clone()?,
            description: record.description.clone()?,
        })
    }
}

/// Picks at most one canonical transcript per gene, in gene order.
///
/// Candidates are walked in rank order; the first whose merged row is complete
/// wins. A candidate missing from the table counts as incomplete.
#[must_use]
pub fn select_canonical(
    ranked: &[RankedGene],
    table: &MergedTable,
) -> (Vec<CanonicalTranscript>, SelectionStats) {
    let mut stats = SelectionStats::default();
    let mut selected = Vec::with_capacity(ranked.len());

    for gene in ranked {
        stats.num_genes += 1;
        let mut chosen = None;
        for transcript_id in &gene.transcript_ids {
            match table
                .get(transcript_id)
                .filter(|r| r.is_complete())
                .and_then(CanonicalTranscript::from_record)
            {
                Some(canonical) => {
                    chosen = Some(canonical);
                    break;
                }
                None => stats.num_skipped_incomplete += 1,
            }
        }
        match chosen {
            Some(canonical) => {
                stats.num_selected += 1;
                selected.push(canonical);
            }
            None => stats.num_dropped_genes += 1,
        }
    }

    (selected, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::record::complete_record;
    use crate::transcript::rank::group_by_gene;

    fn ranked(gene_id: &str, ids: &[&str]) -> RankedGene {
        RankedGene {
            gene_id: gene_id.to_string(),
            transcript_ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn collapse_takes_min_start_max_end() {
        let span = collapse_coding_exons(&[120, 45, 300], &[200, 90, 410]).unwrap();
        assert_eq!(span, CodingSpan { start: 45, end: 410 });
        assert!(collapse_coding_exons(&[], &[10]).is_none());
    }

    #[test]
    fn first_complete_candidate_wins() {
        let mut best = complete_record("T1", "G1");
        best.tsl = None;
        let second = complete_record("T2", "G1");
        let third = complete_record("T3", "G1");
        let table = MergedTable::new(vec![best, second, third]);

        let (selected, stats) = select_canonical(&[ranked("G1", &["T1", "T2", "T3"])], &table);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].transcript_id, "T2");
        assert_eq!(stats.num_skipped_incomplete, 1);
        assert_eq!(stats.num_selected, 1);
    }

    #[test]
    fn gene_without_complete_row_dropped() {
        let mut a = complete_record("T1", "G1");
        a.description = None;
        let mut b = complete_record("T2", "G1");
        b.sequence = None;
        let c = complete_record("T3", "G2");
        let table = MergedTable::new(vec![a, b, c]);

        let genes = vec![ranked("G1", &["T1", "T2"]), ranked("G2", &["T3"])];
        let (selected, stats) = select_canonical(&genes, &table);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].gene_id, "G2");
        assert_eq!(
            stats,
            SelectionStats {
                num_genes: 2,
                num_selected: 1,
                num_dropped_genes: 1,
                num_skipped_incomplete: 2,
            }
        );
    }

    #[test]
    fn candidate_missing_from_table_skipped() {
        let table = MergedTable::new(vec![complete_record("T2", "G1")]);
        let (selected, stats) = select_canonical(&[ranked("G1", &["T_gone", "T2"])], &table);
        assert_eq!(selected[0].transcript_id, "T2");
        assert_eq!(stats.num_skipped_incomplete, 1);
    }

    #[test]
    fn canonical_resolves_span_and_tsl() {
        let mut r = complete_record("T1", "G1");
        r.coding_starts = Some(vec![61, 14]);
        r.coding_ends = Some(vec![60, 99]);
        r.tsl = Some("tsl3 (assigned to previous version 2)".to_string());
        let c = CanonicalTranscript::from_record(&r).unwrap();
        assert_eq!(c.coding, CodingSpan { start: 14, end: 99 });
        assert_eq!(c.tsl, "tsl3");
        assert_eq!(c.coding_length(), 85);
    }

    #[test]
    fn ranking_then_selection() {
        let mut long_incomplete = complete_record("T_long", "G1");
        long_incomplete.length = Some(9000);
        long_incomplete.description = None;
        let mut havana = complete_record("T_havana", "G1");
        havana.source = Some("havana".to_string());
        let mut preferred = complete_record("T_pref", "G1");
        preferred.length = Some(2000);
        let table = MergedTable::new(vec![havana, long_incomplete, preferred]);

        let genes = group_by_gene(&table);
        let (selected, _) = select_canonical(&genes, &table);
        // T_long ranks first but lacks a description
        assert_eq!(selected[0].transcript_id, "T_pref");
    }
}
