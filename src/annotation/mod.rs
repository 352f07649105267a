//! Annotation input: mart tables, their merge, annotated FASTA and expression filters.

pub mod expressed;
pub mod header;
pub mod record;
pub mod table;

use std::path::Path;

use crate::error::Error;
use crate::input::open_input;

use record::MergedTable;
use table::{merge_tables, parse_classification_table, parse_feature_table};

/// Parses both tables from disk (plain or gzip) and merges them.
pub fn load_merged_table(features: &Path, classification: &Path) -> Result<MergedTable, Error> {
    let feature_entries = parse_feature_table(open_input(features)?)?;
    let class_entries = parse_classification_table(open_input(classification)?)?;
    Ok(merge_tables(feature_entries, class_entries))
}
