//! Annotated FASTA exchange format for canonical transcripts.
//!
//! Header layout:
//! `>{id} |GeneID:{gene}|GeneName:{name}|cDNA_start:{start}|cDNA_end:{end}|TSL:{tsl}|APPRIS:{appris}|Source:{source}|{description}`

use std::collections::HashMap;
use std::io::{BufRead, Write};

use crate::error::Error;
use crate::fasta;
use crate::transcript::types::{CanonicalTranscript, CodingSpan};

const KEY_GENE_ID: &str = "GeneID";
const KEY_GENE_NAME: &str = "GeneName";
const KEY_CODING_START: &str = "cDNA_start";
const KEY_CODING_END: &str = "cDNA_end";
const KEY_TSL: &str = "TSL";
const KEY_APPRIS: &str = "APPRIS";
const KEY_SOURCE: &str = "Source";

/// Number of `|`-separated fields before the free-text description.
const NUM_KEYED_FIELDS: usize = 7;

/// Formats the header line (without `>`) for a canonical transcript.
#[must_use]
pub fn format_header(t: &CanonicalTranscript) -> String {
    format!(
        "{} |{KEY_GENE_ID}:{}|{KEY_GENE_NAME}:{}|{KEY_CODING_START}:{}|{KEY_CODING_END}:{}|{KEY_TSL}:{}|{KEY_APPRIS}:{}|{KEY_SOURCE}:{}|{}",
        t.transcript_id,
        t.gene_id,
        t.gene_name,
        t.coding.start,
        t.coding.end,
        t.tsl,
        t.appris,
        t.source,
        t.description
    )
}

/// Writes canonical transcripts as annotated FASTA.
pub fn write_canonical_fasta<W: Write>(
    writer: &mut W,
    transcripts: &[CanonicalTranscript],
) -> Result<(), Error> {
    for t in transcripts {
        fasta::write_record(writer, &format_header(t), &t.sequence)?;
    }
    Ok(())
}

/// Reads annotated FASTA back into canonical transcripts.
///
/// The transcript length is taken from the sequence.
pub fn read_canonical_fasta<R: BufRead>(reader: R) -> Result<Vec<CanonicalTranscript>, Error> {
    fasta::parse_fasta(reader)?
        .into_iter()
        .map(|record| parse_header(&record.id, &record.header, record.sequence))
        .collect()
}

fn parse_header(id: &str, header: &str, sequence: Vec<u8>) -> Result<CanonicalTranscript, Error> {
    let fields: Vec<&str> = header.splitn(NUM_KEYED_FIELDS + 2, '|').collect();
    if fields.len() != NUM_KEYED_FIELDS + 2 {
        return Err(Error::Format(format!(
            "annotated FASTA header for {id} has {} fields, expected {}",
            fields.len(),
            NUM_KEYED_FIELDS + 2
        )));
    }

    let mut keyed: HashMap<&str, &str> = HashMap::with_capacity(NUM_KEYED_FIELDS);
    for item in &fields[1..=NUM_KEYED_FIELDS] {
        let (key, value) = item.split_once(':').ok_or_else(|| {
            Error::Format(format!("malformed header field '{item}' for {id}"))
        })?;
        keyed.insert(key, value);
    }
    let get = |key: &str| -> Result<String, Error> {
        keyed
            .get(key)
            .map(|v| v.to_string())
            .ok_or_else(|| Error::Format(format!("missing header field '{key}' for {id}")))
    };
    let position = |key: &str| -> Result<u32, Error> {
        let value = get(key)?;
        value
            .parse()
            .map_err(|e| Error::Parse(format!("invalid {key} '{value}' for {id}: {e}")))
    };

    let length = u32::try_from(sequence.len())
        .map_err(|_| Error::Validation(format!("sequence of {id} too long")))?;

    Ok(CanonicalTranscript {
        transcript_id: id.to_string(),
        gene_id: get(KEY_GENE_ID)?,
        gene_name: get(KEY_GENE_NAME)?,
        source: get(KEY_SOURCE)?,
        appris: get(KEY_APPRIS)?,
        tsl: get(KEY_TSL)?,
        length,
        coding: CodingSpan {
            start: position(KEY_CODING_START)?,
            end: position(KEY_CODING_END)?,
        },
        sequence,
        description: fields[NUM_KEYED_FIELDS + 1].to_string(),
    })
}
