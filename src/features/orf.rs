//! Upstream/downstream open reading frame scanning within a UTR.
//!
//! Frames are counted from offset 0 of the UTR itself, not from the main
//! coding frame. Every in-frame start codon is extended to each in-frame
//! stop codon that follows at least one sense codon, nearest first, so one
//! start may yield several nested candidates. Nothing is de-duplicated.

use std::fmt;

use crate::codon::{is_start_codon, is_stop_codon};

/// Shortest candidate: start codon, one codon, stop codon.
pub const MIN_ORF_LENGTH: usize = 9;

/// A start-to-stop span, offsets relative to the scanned UTR.
///
/// `end - start` is a positive multiple of 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrfCandidate {
    pub start: usize,
    pub end: usize,
}

impl fmt::Display for OrfCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

/// Scans a UTR for ORF candidates.
#[must_use]
pub fn scan_orfs(utr: &[u8]) -> Vec<OrfCandidate> {
    let mut candidates = Vec::new();

    for start in (0..utr.len()).step_by(3) {
        if utr.len() - start < MIN_ORF_LENGTH {
            break;
        }
        if !is_start_codon(&utr[start..start + 3]) {
            continue;
        }

        // Cursor over the remaining region: the next codon that may close an ORF.
        let mut cursor = start + 6;
        while let Some(stop) = next_stop(utr, cursor) {
            candidates.push(OrfCandidate {
                start,
                end: stop + 3,
            });
            cursor = stop + 3;
        }
    }

    candidates
}

/// First stop codon at `from`, `from + 3`, ... that fits inside `seq`.
fn next_stop(seq: &[u8], from: usize) -> Option<usize> {
    (from..)
        .step_by(3)
        .take_while(|&pos| pos + 3 <= seq.len())
        .find(|&pos| is_stop_codon(&seq[pos..pos + 3]))
}

/// Formats candidates as `[(s, e), (s, e)]`.
#[must_use]
pub fn format_orfs(orfs: &[OrfCandidate]) -> String {
    let items: Vec<String> = orfs.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}
