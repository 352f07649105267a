//! Coordinate windows over a transcript's cDNA sequence.
//!
//! `coding.start` is 1-based. Windows running past the 3' end come back short;
//! only the Kozak windows clamp a negative left edge, by re-slicing from 0.

use crate::sequence::slice_clamped;
use crate::transcript::types::CodingSpan;

/// A slice of the parent sequence with its effective bounds.
///
/// Always `start <= end <= parent.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceWindow<'a> {
    pub start: usize,
    pub end: usize,
    pub sequence: &'a [u8],
}

impl<'a> SequenceWindow<'a> {
    /// Slices `[start, end)`, clamping a negative left edge to 0 and both edges to the sequence.
    fn new(seq: &'a [u8], start: i64, end: i64) -> Self {
        let start = usize::try_from(start.max(0)).unwrap_or(usize::MAX);
        let end = usize::try_from(end.max(0)).unwrap_or(usize::MAX);
        let sequence = slice_clamped(seq, start, end);
        let end = end.min(seq.len());
        let start = start.min(end);
        Self {
            start,
            end,
            sequence,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

fn zero_based_start(coding: CodingSpan) -> i64 {
    i64::from(coding.start) - 1
}

/// Coding region `[codingStart - 1, codingEnd)`.
#[must_use]
pub fn coding_region(seq: &[u8], coding: CodingSpan) -> SequenceWindow<'_> {
    SequenceWindow::new(seq, zero_based_start(coding), i64::from(coding.end))
}

/// 5'UTR `[0, codingStart - 1)`.
#[must_use]
pub fn five_prime_utr(seq: &[u8], coding: CodingSpan) -> SequenceWindow<'_> {
    SequenceWindow::new(seq, 0, zero_based_start(coding))
}

/// 3'UTR `[codingEnd, len)`.
#[must_use]
pub fn three_prime_utr(seq: &[u8], coding: CodingSpan) -> SequenceWindow<'_> {
    SequenceWindow::new(seq, i64::from(coding.end), seq.len() as i64)
}

/// Kozak sequence: `[codingStart - 1 - radius, codingStart + 2 + radius)`.
///
/// A negative left edge is replaced by 0 without moving the right edge, so
/// windows near the transcript start are shorter than `2 * radius + 3`.
#[must_use]
pub fn kozak_sequence(seq: &[u8], coding: CodingSpan, radius: usize) -> SequenceWindow<'_> {
    kozak_window(seq, coding, radius as i64)
}

/// Kozak context: the Kozak window widened by `context` on both sides, same clamp.
#[must_use]
pub fn kozak_context(
    seq: &[u8],
    coding: CodingSpan,
    radius: usize,
    context: usize,
) -> SequenceWindow<'_> {
    kozak_window(seq, coding, radius as i64 + context as i64)
}

fn kozak_window(seq: &[u8], coding: CodingSpan, reach: i64) -> SequenceWindow<'_> {
    let start = i64::from(coding.start);
    SequenceWindow::new(seq, start - 1 - reach, start + 2 + reach)
}

/// The 3'UTR quality gate: a UTR of `limit` or more nucleotides is rejected.
#[must_use]
pub fn passes_utr3_gate(utr3_length: usize, limit: usize) -> bool {
    utr3_length < limit
}

#[cfg(test)]
mod tests {
    use super::*;

    // 5'UTR (12) | CDS ATG AAA TAG (9) | 3'UTR (6)
    const SEQ: &[u8] = b"GCCGCCACCGCCATGAAATAGTTTAAA";

    fn span(start: u32, end: u32) -> CodingSpan {
        CodingSpan { start, end }
    }

    #[test]
    fn regions_partition_the_sequence() {
        let coding = span(13, 21);
        let utr5 = five_prime_utr(SEQ, coding);
        let cds = coding_region(SEQ, coding);
        let utr3 = three_prime_utr(SEQ, coding);
        assert_eq!(utr5.sequence, b"GCCGCCACCGCC");
        assert_eq!(cds.sequence, b"ATGAAATAG");
        assert_eq!(utr3.sequence, b"TTTAAA");
        assert_eq!((utr3.start, utr3.end), (21, 27));
    }

    #[test]
    fn empty_five_prime_utr() {
        let utr5 = five_prime_utr(SEQ, span(1, 9));
        assert!(utr5.is_empty());
        assert_eq!((utr5.start, utr5.end), (0, 0));
    }

    #[test]
    fn coding_end_past_sequence() {
        let cds = coding_region(b"ATGAAA", span(1, 40));
        assert_eq!(cds.sequence, b"ATGAAA");
        assert_eq!(cds.end, 6);
        assert!(three_prime_utr(b"ATGAAA", span(1, 40)).is_empty());
    }

    #[test]
    fn kozak_interior_window() {
        let long = vec![b'C'; 40];
        let coding = span(21, 30);
        let w = kozak_sequence(&long, coding, 10);
        assert_eq!((w.start, w.end), (10, 33));
        assert_eq!(w.len(), 23);
        let c = kozak_context(&long, coding, 4, 5);
        assert_eq!((c.start, c.end), (11, 32));
    }

    #[test]
    fn kozak_left_edge_clamps_to_zero() {
        let w = kozak_sequence(SEQ, span(1, 9), 10);
        assert_eq!(w.start, 0);
        assert_eq!(w.end, 13);
        assert_eq!(w.sequence, &SEQ[..13]);
    }

    #[test]
    fn kozak_clamp_shifts_rather_than_centres() {
        // Left edge 13 - 1 - 20 < 0: window is [0, 35) cut to the sequence end
        let c = kozak_context(SEQ, span(13, 21), 10, 10);
        assert_eq!(c.start, 0);
        assert_eq!(c.sequence, SEQ);
        let w = kozak_sequence(SEQ, span(13, 21), 10);
        assert_eq!((w.start, w.end), (2, 25));
    }

    #[test]
    fn kozak_right_edge_not_clamped_before_slicing() {
        let w = kozak_sequence(b"CCATGAA", span(3, 7), 10);
        assert_eq!(w.sequence, b"CCATGAA");
        assert_eq!(w.end, 7);
    }

    #[test]
    fn extraction_is_repeatable() {
        let coding = span(13, 21);
        assert_eq!(kozak_context(SEQ, coding, 10, 20), kozak_context(SEQ, coding, 10, 20));
        assert_eq!(three_prime_utr(SEQ, coding), three_prime_utr(SEQ, coding));
    }

    #[test]
    fn utr3_gate_rejects_at_limit() {
        assert!(!passes_utr3_gate(300, 300));
        assert!(passes_utr3_gate(299, 300));
        assert!(!passes_utr3_gate(301, 300));
        assert!(passes_utr3_gate(0, 300));
    }
}
