//! Expressed-transcript filter list.

use std::collections::HashSet;
use std::io::BufRead;

use crate::error::Error;

/// Transcript ids read from the first tab-separated column of each line.
#[derive(Debug, Default)]
pub struct ExpressedTranscripts {
    ids: HashSet<String>,
}

impl ExpressedTranscripts {
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut ids = HashSet::new();
        for line in reader.lines() {
            let line = line?;
            if let Some(id) = line.split('\t').next().map(str::trim)
                && !id.is_empty()
            {
                ids.insert(id.to_string());
            }
        }
        Ok(Self { ids })
    }

    #[must_use]
    pub fn contains(&self, transcript_id: &str) -> bool {
        self.ids.contains(transcript_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn first_column_only() {
        let input = "ENST01\t12.5\tx\nENST02\n\n  \nENST03\t0\n";
        let expressed = ExpressedTranscripts::from_reader(Cursor::new(input)).unwrap();
        assert_eq!(expressed.len(), 3);
        assert!(expressed.contains("ENST01"));
        assert!(expressed.contains("ENST03"));
        assert!(!expressed.contains("12.5"));
    }
}
