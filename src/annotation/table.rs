//! Parsers for the mart-style feature and classification tables, and their merge.

use std::collections::{HashMap, HashSet};
use std::io::BufRead;

use crate::error::Error;

use super::record::{MergedTable, TranscriptRecord};

pub const COL_GENE_ID: &str = "Gene stable ID";
pub const COL_TRANSCRIPT_ID: &str = "Transcript stable ID";
pub const COL_GENE_NAME: &str = "Gene name";
pub const COL_LENGTH: &str = "Transcript length (including UTRs and CDS)";
pub const COL_TYPE: &str = "Transcript type";
pub const COL_CODING_START: &str = "cDNA coding start";
pub const COL_CODING_END: &str = "cDNA coding end";
pub const COL_SEQUENCE: &str = "cDNA sequences";
pub const COL_DESCRIPTION: &str = "Gene description";
pub const COL_TSL: &str = "Transcript support level (TSL)";
pub const COL_APPRIS: &str = "APPRIS annotation";
pub const COL_SOURCE: &str = "Source (transcript)";

const PROTEIN_CODING: &str = "protein_coding";
const EXON_DELIMITER: char = ';';

/// A row of the feature table.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEntry {
    pub transcript_id: String,
    pub gene_id: String,
    pub gene_name: Option<String>,
    pub length: Option<u32>,
    pub coding_starts: Option<Vec<u32>>,
    pub coding_ends: Option<Vec<u32>>,
    pub sequence: Option<Vec<u8>>,
    pub description: Option<String>,
}

/// A row of the classification table.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationEntry {
    pub transcript_id: String,
    pub gene_id: String,
    pub tsl: Option<String>,
    pub appris: Option<String>,
    pub source: Option<String>,
    pub length: Option<u32>,
}

/// Column positions resolved from a header line.
struct Header {
    positions: HashMap<String, usize>,
}

impl Header {
    fn parse(line: &str) -> Self {
        let positions = line
            .split('\t')
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        Self { positions }
    }

    fn require(&self, name: &str) -> Result<usize, Error> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| Error::Format(format!("missing column '{name}' in table header")))
    }
}

/// Cells of one data line. Trailing cells dropped by the writer read as absent.
struct Row<'a> {
    fields: Vec<&'a str>,
    line_num: usize,
}

impl<'a> Row<'a> {
    fn new(line: &'a str, line_num: usize) -> Self {
        Self {
            fields: line.split('\t').collect(),
            line_num,
        }
    }

    fn cell(&self, index: usize) -> Option<&'a str> {
        self.fields
            .get(index)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    fn string(&self, index: usize) -> Option<String> {
        self.cell(index).map(str::to_string)
    }

    fn required(&self, index: usize, name: &str) -> Result<String, Error> {
        self.string(index).ok_or_else(|| {
            Error::Parse(format!("line {}: empty '{name}'", self.line_num))
        })
    }

    fn number(&self, index: usize, name: &str) -> Result<Option<u32>, Error> {
        self.cell(index)
            .map(|v| {
                v.parse::<u32>().map_err(|e| {
                    Error::Parse(format!("line {}: invalid {name} '{v}': {e}", self.line_num))
                })
            })
            .transpose()
    }

    fn exon_list(&self, index: usize, name: &str) -> Result<Option<Vec<u32>>, Error> {
        self.cell(index)
            .map(|v| parse_exon_list(v).map_err(|e| {
                Error::Parse(format!("line {}: invalid {name} '{v}': {e}", self.line_num))
            }))
            .transpose()
    }

    fn is_protein_coding(&self, index: usize) -> bool {
        self.cell(index) == Some(PROTEIN_CODING)
    }
}

/// Parses a `;`-delimited list of positive 1-based positions.
fn parse_exon_list(value: &str) -> Result<Vec<u32>, String> {
    value
        .split(EXON_DELIMITER)
        .map(|item| {
            let n: u32 = item.trim().parse().map_err(|e| format!("{e}"))?;
            if n == 0 {
                return Err("positions are 1-based".to_string());
            }
            Ok(n)
        })
        .collect()
}

/// Iterates data lines after the header, skipping blank lines.
fn read_table<R: BufRead>(reader: R) -> Result<(Header, Vec<(usize, String)>), Error> {
    let mut lines = reader.lines().enumerate();
    let header = match lines.next() {
        Some((_, line)) => Header::parse(&line?),
        None => return Err(Error::Format("empty table: missing header line".to_string())),
    };
    let mut data = Vec::new();
    for (line_num, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        data.push((line_num + 1, line));
    }
    Ok((header, data))
}

fn check_duplicate(seen: &mut HashSet<String>, id: &str, table: &str) -> Result<(), Error> {
    if !seen.insert(id.to_string()) {
        return Err(Error::Validation(format!(
            "duplicate transcript ID in {table} table: {id}"
        )));
    }
    Ok(())
}

/// Parses the feature table, keeping protein-coding transcripts only.
pub fn parse_feature_table<R: BufRead>(reader: R) -> Result<Vec<FeatureEntry>, Error> {
    let (header, lines) = read_table(reader)?;
    let gene_id = header.require(COL_GENE_ID)?;
    let transcript_id = header.require(COL_TRANSCRIPT_ID)?;
    let gene_name = header.require(COL_GENE_NAME)?;
    let length = header.require(COL_LENGTH)?;
    let biotype = header.require(COL_TYPE)?;
    let coding_start = header.require(COL_CODING_START)?;
    let coding_end = header.require(COL_CODING_END)?;
    let sequence = header.require(COL_SEQUENCE)?;
    let description = header.require(COL_DESCRIPTION)?;

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for (line_num, line) in &lines {
        let row = Row::new(line, *line_num);
        if !row.is_protein_coding(biotype) {
            continue;
        }
        let id = row.required(transcript_id, COL_TRANSCRIPT_ID)?;
        check_duplicate(&mut seen, &id, "feature")?;
        entries.push(FeatureEntry {
            gene_id: row.required(gene_id, COL_GENE_ID)?,
            gene_name: row.string(gene_name),
            length: row.number(length, "transcript length")?,
            coding_starts: row.exon_list(coding_start, "coding start")?,
            coding_ends: row.exon_list(coding_end, "coding end")?,
            sequence: row.cell(sequence).map(|s| s.to_ascii_uppercase().into_bytes()),
            description: row.string(description),
            transcript_id: id,
        });
    }
    Ok(entries)
}

/// Parses the classification table, keeping protein-coding transcripts only.
pub fn parse_classification_table<R: BufRead>(
    reader: R,
) -> Result<Vec<ClassificationEntry>, Error> {
    let (header, lines) = read_table(reader)?;
    let gene_id = header.require(COL_GENE_ID)?;
    let transcript_id = header.require(COL_TRANSCRIPT_ID)?;
    let tsl = header.require(COL_TSL)?;
    let appris = header.require(COL_APPRIS)?;
    let source = header.require(COL_SOURCE)?;
    let length = header.require(COL_LENGTH)?;
    let biotype = header.require(COL_TYPE)?;

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for (line_num, line) in &lines {
        let row = Row::new(line, *line_num);
        if !row.is_protein_coding(biotype) {
            continue;
        }
        let id = row.required(transcript_id, COL_TRANSCRIPT_ID)?;
        check_duplicate(&mut seen, &id, "classification")?;
        entries.push(ClassificationEntry {
            gene_id: row.required(gene_id, COL_GENE_ID)?,
            tsl: row.string(tsl),
            appris: row.string(appris),
            source: row.string(source),
            length: row.number(length, "transcript length")?,
            transcript_id: id,
        });
    }
    Ok(entries)
}

/// Inner-joins the two tables on transcript id, in classification-table order.
#[must_use]
pub fn merge_tables(
    features: Vec<FeatureEntry>,
    classification: Vec<ClassificationEntry>,
) -> MergedTable {
    let mut by_id: HashMap<String, FeatureEntry> = features
        .into_iter()
        .map(|f| (f.transcript_id.clone(), f))
        .collect();

    let records = classification
        .into_iter()
        .filter_map(|c| {
            let f = by_id.remove(&c.transcript_id)?;
            Some(TranscriptRecord {
                transcript_id: c.transcript_id,
                gene_id: f.gene_id,
                gene_name: f.gene_name,
                source: c.source,
                appris: c.appris,
                tsl: c.tsl,
                length: c.length.or(f.length),
                coding_starts: f.coding_starts,
                coding_ends: f.coding_ends,
                sequence: f.sequence,
                description: f.description,
            })
        })
        .collect();

    MergedTable::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const FEATURE_TABLE: &str = "\
Gene stable ID\tTranscript stable ID\tGene name\tTranscript length (including UTRs and CDS)\tTranscript type\tcDNA coding start\tcDNA coding end\tcDNA sequences\tGene description
ENSG01\tENST01\tTP53\t12\tprotein_coding\t4;7\t9;12\tcccATGaaaTAG\ttumor protein p53 [Source:HGNC Symbol;Acc:HGNC:11998]
ENSG01\tENST02\tTP53\t9\tprotein_coding\t1\t9\tATGAAATAG\t
ENSG01\tENST03\tTP53\t20\tretained_intron\t\t\tACGT\tsomething
ENSG02\tENST04\tMYC\t9\tprotein_coding\t\t\tATGAAATAG\tmyc
";

    const CLASSIFICATION_TABLE: &str = "\
Gene stable ID\tTranscript stable ID\tTranscript support level (TSL)\tAPPRIS annotation\tSource (transcript)\tTranscript length (including UTRs and CDS)\tTranscript type
ENSG02\tENST04\ttsl1\tprincipal1\tensembl_havana\t9\tprotein_coding
ENSG01\tENST02\ttsl2 (assigned to previous version 3)\t\thavana\t\tprotein_coding
ENSG01\tENST01\ttsl1\tprincipal1\tensembl_havana\t12\tprotein_coding
ENSG01\tENST99\ttsl1\tprincipal1\tensembl\t100\tprotein_coding
";

    #[test]
    fn feature_table_parsing() {
        let entries = parse_feature_table(Cursor::new(FEATURE_TABLE)).unwrap();
        assert_eq!(entries.len(), 3);
        let first = &entries[0];
        assert_eq!(first.transcript_id, "ENST01");
        assert_eq!(first.coding_starts, Some(vec![4, 7]));
        assert_eq!(first.coding_ends, Some(vec![9, 12]));
        assert_eq!(first.sequence.as_deref(), Some(b"CCCATGAAATAG".as_slice()));
        assert!(first.description.as_deref().unwrap().contains("Acc:HGNC:11998"));
        assert_eq!(entries[1].description, None);
        assert_eq!(entries[2].coding_starts, None);
    }

    #[test]
    fn classification_table_parsing() {
        let entries = parse_classification_table(Cursor::new(CLASSIFICATION_TABLE)).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[1].appris, None);
        assert_eq!(entries[1].length, None);
        assert_eq!(
            entries[1].tsl.as_deref(),
            Some("tsl2 (assigned to previous version 3)")
        );
    }

    #[test]
    fn merge_is_inner_join_in_classification_order() {
        let features = parse_feature_table(Cursor::new(FEATURE_TABLE)).unwrap();
        let classes = parse_classification_table(Cursor::new(CLASSIFICATION_TABLE)).unwrap();
        let merged = merge_tables(features, classes);

        let ids: Vec<&str> = merged.iter().map(|r| r.transcript_id.as_str()).collect();
        assert_eq!(ids, vec!["ENST04", "ENST02", "ENST01"]);

        // Length falls back to the feature table
        assert_eq!(merged.get("ENST02").unwrap().length, Some(9));
        let r = merged.get("ENST01").unwrap();
        assert_eq!(r.source.as_deref(), Some("ensembl_havana"));
        assert_eq!(r.gene_name.as_deref(), Some("TP53"));
        assert!(r.is_complete());
        assert!(!merged.get("ENST04").unwrap().is_complete());
    }

    #[test]
    fn missing_column_error() {
        let table = "Gene stable ID\tTranscript stable ID\n";
        let err = parse_classification_table(Cursor::new(table)).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
        assert!(err.to_string().contains("Transcript support level (TSL)"));
    }

    #[test]
    fn invalid_coding_position() {
        let table = FEATURE_TABLE.replace("\t4;7\t", "\t4;x\t");
        let err = parse_feature_table(Cursor::new(table)).unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("4;x"));
    }

    #[test]
    fn zero_coding_position_rejected() {
        let table = FEATURE_TABLE.replace("\t1\t9\t", "\t0\t9\t");
        assert!(parse_feature_table(Cursor::new(table)).is_err());
    }

    #[test]
    fn duplicate_transcript_error() {
        let mut table = CLASSIFICATION_TABLE.to_string();
        table.push_str("ENSG02\tENST04\ttsl1\tprincipal1\tensembl\t9\tprotein_coding\n");
        let err = parse_classification_table(Cursor::new(table)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn empty_table_error() {
        assert!(parse_feature_table(Cursor::new("")).is_err());
    }
}
