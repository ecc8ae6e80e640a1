//! Input handling module

pub mod alignments;
pub mod glob_resolver;

pub use alignments::{list_alignments, AlignmentListing};
pub use glob_resolver::resolve_patterns;
