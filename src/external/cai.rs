//! Codon adaptation index of coding sequences.

use crate::batch::{Region, SequenceBatch};
use crate::codon::CodonWeights;
use crate::error::Error;

use super::{RegionTool, ScalarColumns, score_each};

const TOOL: &str = "CAI";

/// Codons with a single synonymous choice carry no adaptation signal.
const EXCLUDED: [&[u8; 3]; 2] = [b"ATG", b"TGG"];

/// Geometric mean of codon weights over the counted codons of `cds`.
///
/// Incomplete trailing codons, ambiguous codons and `ATG`/`TGG` are
/// skipped. Returns 0 when nothing is counted.
#[must_use]
pub fn codon_adaptation_index(cds: &[u8], weights: &CodonWeights) -> f64 {
    let mut log_sum = 0.0;
    let mut counted = 0usize;

    for codon in cds.chunks_exact(3) {
        let upper = codon.to_ascii_uppercase();
        if EXCLUDED.iter().any(|c| c.as_slice() == upper.as_slice()) {
            continue;
        }
        if let Some(w) = weights.weight(&upper) {
            log_sum += w.ln();
            counted += 1;
        }
    }

    if counted == 0 {
        0.0
    } else {
        (log_sum / counted as f64).exp()
    }
}

pub struct CodonAdaptation {
    weights: CodonWeights,
}

impl CodonAdaptation {
    #[must_use]
    pub fn human() -> Self {
        Self {
            weights: CodonWeights::human(),
        }
    }
}

impl RegionTool for CodonAdaptation {
    fn name(&self) -> &str {
        TOOL
    }

    fn region(&self) -> Region {
        Region::Coding
    }

    fn run(&self, batch: &SequenceBatch) -> Result<ScalarColumns, Error> {
        score_each(TOOL, vec![TOOL.to_string()], batch, |seq| {
            vec![codon_adaptation_index(seq, &self.weights)]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn single_codon_weight() {
        let w = CodonWeights::human();
        // GCC 0.40
        assert!(approx(codon_adaptation_index(b"GCC", &w), 0.40));
    }

    #[test]
    fn geometric_mean_skips_excluded() {
        let w = CodonWeights::human();
        // ATG skipped; GCC 0.40, GCT 0.27, TGG skipped, TAA 0.30
        let expected = (0.40f64 * 0.27 * 0.30).powf(1.0 / 3.0);
        assert!(approx(codon_adaptation_index(b"ATGGCCGCTTGGTAA", &w), expected));
    }

    #[test]
    fn ambiguous_and_trailing_codons_skipped() {
        let w = CodonWeights::human();
        assert!(approx(codon_adaptation_index(b"GCCNNNGC", &w), 0.40));
        assert!(approx(codon_adaptation_index(b"gcc", &w), 0.40));
    }

    #[test]
    fn nothing_counted_is_zero() {
        let w = CodonWeights::human();
        assert_eq!(codon_adaptation_index(b"ATGTGG", &w), 0.0);
        assert_eq!(codon_adaptation_index(b"N", &w), 0.0);
    }

    #[test]
    fn scores_whole_batch() {
        let mut batch = SequenceBatch::new(Region::Coding);
        batch.push("T1", b"ATGGCC");
        let columns = CodonAdaptation::human().run(&batch).unwrap();
        let cai = columns.get("T1").unwrap()[0];
        assert!(approx(cai, 0.40));
    }
}
