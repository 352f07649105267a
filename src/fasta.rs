//! Reading and writing FASTA records.

use std::io::{BufRead, Write};

use crate::error::Error;

/// A FASTA record: first header token, full header line (without `>`), and sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub header: String,
    pub sequence: Vec<u8>,
}

/// Reads FASTA records from a buffered reader.
///
/// Multi-line sequences are concatenated and uppercased. Lines before the
/// first header are ignored.
pub fn parse_fasta<R: BufRead>(reader: R) -> Result<Vec<FastaRecord>, Error> {
    let mut results: Vec<FastaRecord> = Vec::new();
    let mut current: Option<(String, String)> = None;
    let mut current_sequence: Vec<u8> = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(header) = line.strip_prefix('>') {
            if let Some((id, header)) = current.take() {
                results.push(FastaRecord {
                    id,
                    header,
                    sequence: std::mem::take(&mut current_sequence),
                });
            }
            let id = header.split_whitespace().next().unwrap_or("");
            if id.is_empty() {
                return Err(Error::Parse(format!(
                    "line {}: empty FASTA header",
                    line_num + 1
                )));
            }
            current = Some((id.to_string(), header.trim_end().to_string()));
        } else if current.is_some() {
            let start = current_sequence.len();
            current_sequence.extend_from_slice(line.trim().as_bytes());
            current_sequence[start..].make_ascii_uppercase();
        }
    }

    if let Some((id, header)) = current {
        results.push(FastaRecord {
            id,
            header,
            sequence: current_sequence,
        });
    }

    Ok(results)
}

/// Writes one record as a header line and a single sequence line.
pub fn write_record<W: Write>(writer: &mut W, header: &str, sequence: &[u8]) -> Result<(), Error> {
    writer.write_all(b">")?;
    writer.write_all(header.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.write_all(sequence)?;
    writer.write_all(b"\n")?;
    Ok(())
}
