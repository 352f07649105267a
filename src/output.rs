//! Tab-separated feature table output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Error;
use crate::external::ScalarColumns;
use crate::features::TranscriptFeatures;
use crate::features::orf::format_orfs;

/// Columns derived from the sequence itself, before any tool columns.
pub const SEQUENCE_COLUMNS: [&str; 12] = [
    "transcript_id",
    "ensembl_gene_id",
    "gene_name",
    "coding_len",
    "5pUTR_len",
    "5pUTR_GC",
    "3pUTR_len",
    "3pUTR_GC",
    "Kozak_Sequence",
    "Kozak_Context",
    "uORFs",
    "dORFs",
];

/// One output row: a transcript's features plus its tool values in column order.
#[derive(Debug)]
pub struct FeatureRow<'a> {
    pub features: &'a TranscriptFeatures,
    pub scalars: Vec<f64>,
}

/// Header line fields: sequence columns followed by each tool's columns.
#[must_use]
pub fn header_fields(columns: &[ScalarColumns]) -> Vec<String> {
    SEQUENCE_COLUMNS
        .iter()
        .map(ToString::to_string)
        .chain(columns.iter().flat_map(|c| c.names().iter().cloned()))
        .collect()
}

/// Joins tool values onto feature rows. Every transcript needs a value from every tool.
pub fn assemble_rows<'a>(
    features: &'a [TranscriptFeatures],
    columns: &[ScalarColumns],
) -> Result<Vec<FeatureRow<'a>>, Error> {
    features
        .iter()
        .map(|f| {
            let mut scalars = Vec::new();
            for c in columns {
                let values = c.get(&f.transcript_id).ok_or_else(|| {
                    Error::external(c.tool(), format!("no result for {}", f.transcript_id))
                })?;
                scalars.extend_from_slice(values);
            }
            Ok(FeatureRow { features: f, scalars })
        })
        .collect()
}

/// Writes the feature table. Nothing is written unless every row is complete.
pub fn write_feature_table<W: Write>(
    writer: &mut W,
    features: &[TranscriptFeatures],
    columns: &[ScalarColumns],
) -> Result<usize, Error> {
    let rows = assemble_rows(features, columns)?;
    write_rows(writer, columns, &rows)
}

/// Writes the feature table to `path`. The file is only created once every row is complete.
pub fn write_feature_file(
    path: &Path,
    features: &[TranscriptFeatures],
    columns: &[ScalarColumns],
) -> Result<usize, Error> {
    let rows = assemble_rows(features, columns)?;
    let file = File::create(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("failed to create {}: {e}", path.display()),
        ))
    })?;
    let mut writer = BufWriter::new(file);
    write_rows(&mut writer, columns, &rows)
}

fn write_rows<W: Write>(
    writer: &mut W,
    columns: &[ScalarColumns],
    rows: &[FeatureRow<'_>],
) -> Result<usize, Error> {
    writeln!(writer, "{}", header_fields(columns).join("\t"))?;
    for row in rows {
        write_row(writer, row)?;
    }
    writer.flush()?;
    Ok(rows.len())
}

fn write_row<W: Write>(writer: &mut W, row: &FeatureRow<'_>) -> Result<(), Error> {
    let f = row.features;
    write!(
        writer,
        "{}\t{}\t{}\t{}\t{}\t{:.2}\t{}\t{:.2}\t{}\t{}\t{}\t{}",
        f.transcript_id,
        f.gene_id,
        f.gene_name,
        f.coding_length,
        f.utr5_length,
        f.utr5_gc,
        f.utr3_length,
        f.utr3_gc,
        f.kozak_sequence,
        f.kozak_context,
        format_orfs(&f.uorfs),
        format_orfs(&f.dorfs),
    )?;
    for value in &row.scalars {
        write!(writer, "\t{value}")?;
    }
    writeln!(writer)?;
    Ok(())
}
