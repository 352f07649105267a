use criterion::{Criterion, criterion_group, criterion_main};

use rnafeat::annotation::record::{MergedTable, TranscriptRecord};
use rnafeat::features::orf::scan_orfs;
use rnafeat::transcript::rank::group_by_gene;

const NUM_GENES: usize = 2_000;
const TRANSCRIPTS_PER_GENE: usize = 8;

/// Deterministic pseudo-random UTR with frequent start and stop codons.
fn synthetic_utr(len: usize) -> Vec<u8> {
    let codons: [&[u8; 3]; 6] = [b"ATG", b"GCC", b"TAA", b"CTG", b"TGA", b"AAG"];
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut seq = Vec::with_capacity(len + 3);
    while seq.len() < len {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        seq.extend_from_slice(codons[(state % 6) as usize]);
    }
    seq.truncate(len);
    seq
}

fn synthetic_table() -> MergedTable {
    let sources = ["ensembl_havana", "havana", "ensembl"];
    let appris = ["principal1", "principal3", "alternative2", ""];
    let mut records = Vec::with_capacity(NUM_GENES * TRANSCRIPTS_PER_GENE);
    for g in 0..NUM_GENES {
        for t in 0..TRANSCRIPTS_PER_GENE {
            let i = g * TRANSCRIPTS_PER_GENE + t;
            records.push(TranscriptRecord {
                transcript_id: format!("ENST{i:011}"),
                gene_id: format!("ENSG{g:011}"),
                gene_name: Some(format!("GENE{g}")),
                source: Some(sources[i % sources.len()].to_string()),
                appris: Some(appris[i % appris.len()].to_string()).filter(|a| !a.is_empty()),
                tsl: Some(format!("tsl{}", i % 5 + 1)),
                length: Some(1000 + (i % 97) as u32 * 13),
                coding_starts: Some(vec![101]),
                coding_ends: Some(vec![700]),
                sequence: None,
                description: Some("synthetic".to_string()),
            });
        }
    }
    MergedTable::new(records)
}

fn bench_scan_orfs(c: &mut Criterion) {
    let utr = synthetic_utr(3_000);
    c.bench_function("scan_orfs (3 kb UTR)", |b| {
        b.iter(|| {
            let orfs = scan_orfs(&utr);
            assert!(!orfs.is_empty());
        });
    });
}

fn bench_group_by_gene(c: &mut Criterion) {
    let table = synthetic_table();
    c.bench_function("group_by_gene (16k transcripts)", |b| {
        b.iter(|| {
            let ranked = group_by_gene(&table);
            assert_eq!(ranked.len(), NUM_GENES);
        });
    });
}

criterion_group!(benches, bench_scan_orfs, bench_group_by_gene);
criterion_main!(benches);
