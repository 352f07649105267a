//! rnafeat: canonical transcript selection and translational-control features of mRNAs.

pub mod error;

pub mod annotation;
pub mod batch;
pub mod cli;
pub mod codon;
pub mod config;
pub mod external;
pub mod fasta;
pub mod features;
pub mod input;
pub mod output;
pub mod sequence;
pub mod transcript;
