//! Codon constants and a per-codon weight table.

pub const START_CODON: &[u8; 3] = b"ATG";
pub const STOP_CODONS: [&[u8; 3]; 3] = [b"TAA", b"TAG", b"TGA"];

/// Returns true if `codon` is one of the three canonical stop triplets.
#[must_use]
pub fn is_stop_codon(codon: &[u8]) -> bool {
    STOP_CODONS.iter().any(|stop| stop.as_slice() == codon)
}

/// Returns true if `codon` is the start triplet.
#[must_use]
pub fn is_start_codon(codon: &[u8]) -> bool {
    codon == START_CODON.as_slice()
}

fn base_to_index(b: u8) -> Option<usize> {
    match b {
        b'A' | b'a' => Some(0),
        b'C' | b'c' => Some(1),
        b'G' | b'g' => Some(2),
        b'T' | b't' | b'U' | b'u' => Some(3),
        _ => None,
    }
}

/// 6-bit codon index: A=0, C=1, G=2, T/U=3; index = first*16 + second*4 + third.
#[must_use]
pub fn codon_index(codon: &[u8]) -> Option<usize> {
    if codon.len() < 3 {
        return None;
    }
    let a = base_to_index(codon[0])?;
    let b = base_to_index(codon[1])?;
    let c = base_to_index(codon[2])?;
    Some(a * 16 + b * 4 + c)
}

/// Relative adaptiveness of each codon, indexed by [`codon_index`].
pub struct CodonWeights {
    table: [f64; 64],
}

impl CodonWeights {
    /// Human codon usage expressed as relative adaptiveness.
    #[must_use]
    pub fn human() -> Self {
        // Order: AAA, AAC, AAG, AAT, ACA, ACC, ACG, ACT, AGA, ...
        #[rustfmt::skip]
        let table: [f64; 64] = [
            0.43, 0.53, 0.57, 0.47,  // AA*
            0.28, 0.36, 0.11, 0.25,  // AC*
            0.21, 0.24, 0.21, 0.15,  // AG*
            0.17, 0.47, 1.00, 0.36,  // AT*
            0.27, 0.58, 0.73, 0.42,  // CA*
            0.28, 0.32, 0.11, 0.29,  // CC*
            0.11, 0.18, 0.20, 0.08,  // CG*
            0.07, 0.20, 0.40, 0.13,  // CT*
            0.42, 0.54, 0.58, 0.46,  // GA*
            0.23, 0.40, 0.11, 0.27,  // GC*
            0.25, 0.34, 0.25, 0.16,  // GG*
            0.12, 0.24, 0.46, 0.18,  // GT*
            0.30, 0.56, 0.24, 0.44,  // TA*
            0.15, 0.22, 0.05, 0.19,  // TC*
            0.47, 0.54, 1.00, 0.46,  // TG*
            0.08, 0.54, 0.13, 0.46,  // TT*
        ];
        Self { table }
    }

    /// Weight of a single codon, or `None` for incomplete or ambiguous codons.
    #[must_use]
    pub fn weight(&self, codon: &[u8]) -> Option<f64> {
        codon_index(codon).map(|i| self.table[i])
    }
}
