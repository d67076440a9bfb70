//! SEARCH/REPLACE patch engine.
//!
//! The generation service is instructed to answer with conflict-marker style
//! edit blocks. `parser` extracts them from the raw response text and `apply`
//! splices them onto a file buffer with forward-only matching.

mod apply;
mod parser;

pub use apply::{apply_blocks, ApplyOutcome};
pub use parser::{parse_blocks, PatchBlock};
