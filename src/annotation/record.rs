//! Merged per-transcript annotation records.

use std::collections::HashMap;

/// One merged annotation row. Missing cells are `None`, never defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptRecord {
    pub transcript_id: String,
    pub gene_id: String,
    pub gene_name: Option<String>,
    pub source: Option<String>,
    pub appris: Option<String>,
    pub tsl: Option<String>,
    pub length: Option<u32>,
    /// 1-based coding start per coding exon.
    pub coding_starts: Option<Vec<u32>>,
    pub coding_ends: Option<Vec<u32>>,
    pub sequence: Option<Vec<u8>>,
    pub description: Option<String>,
}

impl TranscriptRecord {
    /// True when every column required downstream is present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.gene_name.is_some()
            && self.source.is_some()
            && self.appris.is_some()
            && self.tsl.is_some()
            && self.length.is_some()
            && self.coding_starts.is_some()
            && self.coding_ends.is_some()
            && self.sequence.is_some()
            && self.description.is_some()
    }
}

/// Transcript-id keyed table of merged records, in input order.
#[derive(Debug, Default)]
pub struct MergedTable {
    records: Vec<TranscriptRecord>,
    index: HashMap<String, usize>,
}

impl MergedTable {
    /// Builds the table; later duplicates of a transcript id are ignored.
    #[must_use]
    pub fn new(records: Vec<TranscriptRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        let mut kept = Vec::with_capacity(records.len());
        for record in records {
            if index.contains_key(&record.transcript_id) {
                continue;
            }
            index.insert(record.transcript_id.clone(), kept.len());
            kept.push(record);
        }
        Self {
            records: kept,
            index,
        }
    }

    #[must_use]
    pub fn get(&self, transcript_id: &str) -> Option<&TranscriptRecord> {
        self.index.get(transcript_id).map(|&i| &self.records[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranscriptRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn complete_record(transcript_id: &str, gene_id: &str) -> TranscriptRecord {
    TranscriptRecord {
        transcript_id: transcript_id.to_string(),
        gene_id: gene_id.to_string(),
        gene_name: Some("GENE".to_string()),
        source: Some("ensembl_havana".to_string()),
        appris: Some("principal1".to_string()),
        tsl: Some("tsl1".to_string()),
        length: Some(1200),
        coding_starts: Some(vec![1]),
        coding_ends: Some(vec![10]),
        sequence: Some(b"ATGAAATAGC".to_vec()),
        description: Some("test gene".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_when_all_present() {
        assert!(complete_record("T1", "G1").is_complete());
    }

    #[test]
    fn any_absent_field_is_incomplete() {
        let mut r = complete_record("T1", "G1");
        r.appris = None;
        assert!(!r.is_complete());

        let mut r = complete_record("T1", "G1");
        r.description = None;
        assert!(!r.is_complete());

        let mut r = complete_record("T1", "G1");
        r.coding_ends = None;
        assert!(!r.is_complete());
    }

    #[test]
    fn table_lookup_and_order() {
        let table = MergedTable::new(vec![
            complete_record("T2", "G1"),
            complete_record("T1", "G1"),
            complete_record("T2", "G9"),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("T2").unwrap().gene_id, "G1");
        assert!(table.get("T3").is_none());
        let ids: Vec<&str> = table.iter().map(|r| r.transcript_id.as_str()).collect();
        assert_eq!(ids, vec!["T2", "T1"]);
    }
}
