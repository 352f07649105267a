//! Transcript ranking and canonical selection.

pub mod rank;
pub mod select;
pub mod types;
