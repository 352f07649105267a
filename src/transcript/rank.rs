//! Ranking of a gene's transcripts by source, APPRIS tier, TSL and length.
//!
//! Each key component is either a parsed value or an explicit `Unmatched`
//! sentinel that compares after every parsed value. The composite key sorts
//! ascending; ties keep input order.

use std::collections::HashMap;

use crate::annotation::record::{MergedTable, TranscriptRecord};

/// A rank component: a finite tier or the sentinel that sorts last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    Finite(u32),
    Unmatched,
}

/// APPRIS sort key.
///
/// Parsed keys compare as plain strings, so `a10` sorts before `a2`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ApprisKey {
    Parsed(String),
    Unmatched,
}

/// Composite ranking key. Field order is comparison order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankKey {
    pub source: Rank,
    pub appris: ApprisKey,
    pub tsl: Rank,
    /// Negated transcript length; `i64::MAX` when the length is absent.
    pub negated_length: i64,
}

impl RankKey {
    #[must_use]
    pub fn for_record(record: &TranscriptRecord) -> Self {
        Self {
            source: source_rank(record.source.as_deref()),
            appris: appris_key(record.appris.as_deref()),
            tsl: tsl_rank(record.tsl.as_deref()),
            negated_length: record.length.map_or(i64::MAX, |len| -i64::from(len)),
        }
    }
}

/// Maps a transcript source through the fixed priority table.
#[must_use]
pub fn source_rank(source: Option<&str>) -> Rank {
    match source {
        Some("ensembl_havana") => Rank::Finite(0),
        Some("ensembl") => Rank::Finite(1),
        Some("havana") => Rank::Finite(2),
        _ => Rank::Unmatched,
    }
}

/// Parses `<lowercase letters><digits>`; `principal` becomes `a`, `alternative` becomes `b`,
/// any other letters are dropped, and the digits are appended verbatim.
#[must_use]
pub fn appris_key(appris: Option<&str>) -> ApprisKey {
    let Some(value) = appris else {
        return ApprisKey::Unmatched;
    };
    let letters = leading_len(value, |b| b.is_ascii_lowercase());
    let digits = leading_len(&value[letters..], |b| b.is_ascii_digit());
    if letters == 0 || digits == 0 {
        return ApprisKey::Unmatched;
    }
    let prefix = match &value[..letters] {
        "principal" => "a",
        "alternative" => "b",
        _ => "",
    };
    ApprisKey::Parsed(format!("{prefix}{}", &value[letters..letters + digits]))
}

/// Parses a leading three-letter code followed by digits, e.g. `tsl1 (assigned ...)` → 1.
#[must_use]
pub fn tsl_rank(tsl: Option<&str>) -> Rank {
    let Some(value) = tsl else {
        return Rank::Unmatched;
    };
    let bytes = value.as_bytes();
    if bytes.len() < 4 || !bytes[..3].iter().all(u8::is_ascii_lowercase) {
        return Rank::Unmatched;
    }
    let digits = leading_len(&value[3..], |b| b.is_ascii_digit());
    match value[3..3 + digits].parse::<u32>() {
        Ok(n) => Rank::Finite(n),
        Err(_) => Rank::Unmatched,
    }
}

fn leading_len(s: &str, pred: impl Fn(&u8) -> bool) -> usize {
    s.as_bytes().iter().take_while(|b| pred(b)).count()
}

/// Orders one gene's transcripts best-first. The sort is stable.
#[must_use]
pub fn rank_transcripts<'a>(transcripts: &[&'a TranscriptRecord]) -> Vec<&'a TranscriptRecord> {
    let mut keyed: Vec<(RankKey, &TranscriptRecord)> = transcripts
        .iter()
        .map(|&t| (RankKey::for_record(t), t))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, t)| t).collect()
}

/// A gene's transcript ids, best-ranked first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedGene {
    pub gene_id: String,
    pub transcript_ids: Vec<String>,
}

/// Groups the table by gene (in order of first appearance) and ranks each group.
#[must_use]
pub fn group_by_gene(table: &MergedTable) -> Vec<RankedGene> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&TranscriptRecord>> = HashMap::new();
    for record in table.iter() {
        let group = groups.entry(record.gene_id.as_str()).or_insert_with(|| {
            order.push(record.gene_id.as_str());
            Vec::new()
        });
        group.push(record);
    }

    order
        .into_iter()
        .map(|gene_id| {
            let members = groups.remove(gene_id).unwrap_or_default();
            RankedGene {
                gene_id: gene_id.to_string(),
                transcript_ids: rank_transcripts(&members)
                    .into_iter()
                    .map(|t| t.transcript_id.clone())
                    .collect(),
            }
        })
        .collect()
}
