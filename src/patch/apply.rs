//! Forward-only application of parsed patch blocks.
//!
//! Responses routinely contain several blocks whose `search` text is the
//! same literal snippet (repeated boilerplate). Searching from the start of
//! the buffer for every block would hit the first occurrence each time and
//! corrupt later ones, so matching resumes from the end of the previous
//! splice: each block lands on a distinct, non-overlapping region as long as
//! the blocks were generated against one unmodified snapshot of the file.

use tracing::warn;

use super::PatchBlock;

/// Result of applying a block sequence to a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub text: String,
    /// Number of blocks whose search text was found and spliced.
    pub applied: usize,
    /// Indices (into the input slice) of blocks whose search text was not
    /// found at or after the cursor. Skipping is recoverable; callers log it.
    pub skipped: Vec<usize>,
}

/// Apply `blocks` to `original` in order with a monotonic cursor.
///
/// A block whose `search` text is not found at or after the cursor is
/// skipped without advancing the cursor. Matching is exact; line endings and
/// trailing whitespace are the file I/O layer's concern.
pub fn apply_blocks(original: &str, blocks: &[PatchBlock]) -> ApplyOutcome {
    let mut text = original.to_string();
    let mut cursor = 0usize;
    let mut applied = 0usize;
    let mut skipped = Vec::new();

    for (index, block) in blocks.iter().enumerate() {
        if block.search.is_empty() {
            warn!("patch block {} has empty search text, skipping", index);
            skipped.push(index);
            continue;
        }

        match text[cursor..].find(&block.search) {
            Some(offset) => {
                let start = cursor + offset;
                let end = start + block.search.len();
                text.replace_range(start..end, &block.replace);
                cursor = start + block.replace.len();
                applied += 1;
            }
            None => {
                warn!(
                    "patch block {} not found in target (search starts with {:?}), skipping",
                    index,
                    block.search.chars().take(40).collect::<String>()
                );
                skipped.push(index);
            }
        }
    }

    ApplyOutcome {
        text,
        applied,
        skipped,
    }
}
