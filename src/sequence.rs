//! Nucleotide sequence helpers shared by window extraction and scoring.

/// Returns `seq[start..end]` with both bounds clamped to the sequence length.
///
/// A window running past the end yields a shorter slice; a start beyond the
/// end (or past `end`) yields an empty slice.
#[must_use]
pub fn slice_clamped(seq: &[u8], start: usize, end: usize) -> &[u8] {
    let end = end.min(seq.len());
    let start = start.min(end);
    &seq[start..end]
}

/// GC content as a percentage of all characters (`G`, `C` and the `S` ambiguity code).
///
/// An empty sequence has 0% GC.
#[must_use]
pub fn gc_content(seq: &[u8]) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let gc = seq
        .iter()
        .filter(|b| matches!(b.to_ascii_uppercase(), b'G' | b'C' | b'S'))
        .count();
    gc as f64 * 100.0 / seq.len() as f64
}
