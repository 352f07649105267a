//! Local score of the 5'UTR leader, favouring pyrimidine-rich (TOP-like) starts.
//!
//! The local score is the maximum of the Lindley process
//! `U(0) = 0, U(i) = max(0, U(i-1) + s(x_i))` over the first `clip` bases.

use crate::batch::{Region, SequenceBatch};
use crate::error::Error;

use super::{RegionTool, ScalarColumns, score_each};

const TOOL: &str = "local_score";
const COLUMN: &str = "TOP_localScore";

fn base_score(base: u8) -> i64 {
    match base.to_ascii_uppercase() {
        b'A' | b'G' => -1,
        b'C' | b'T' => 1,
        _ => 0,
    }
}

/// Maximum of the Lindley process over the first `clip` bases of `seq`.
#[must_use]
pub fn local_score(seq: &[u8], clip: usize) -> i64 {
    let mut current = 0i64;
    let mut best = 0i64;
    for &base in seq.iter().take(clip) {
        current = (current + base_score(base)).max(0);
        best = best.max(current);
    }
    best
}

pub struct LocalScore {
    clip: usize,
}

impl LocalScore {
    #[must_use]
    pub fn new(clip: usize) -> Self {
        Self { clip }
    }
}

impl RegionTool for LocalScore {
    fn name(&self) -> &str {
        TOOL
    }

    fn region(&self) -> Region {
        Region::FivePrimeUtr
    }

    fn run(&self, batch: &SequenceBatch) -> Result<ScalarColumns, Error> {
        score_each(TOOL, vec![COLUMN.to_string()], batch, |seq| {
            vec![local_score(seq, self.clip) as f64]
        })
    }
}
