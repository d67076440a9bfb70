//! Extraction of SEARCH/REPLACE blocks from a raw model response.
//!
//! The expected shape is the conflict-marker format the system prompt asks
//! for:
//!
//! ```text
//! <<<<<<< SEARCH
//! original code
//! =======
//! transformed code
//! >>>>>>> REPLACE
//! ```
//!
//! Models drift on the exact marker width and keyword casing, so each
//! sentinel line tolerates 3–10 repetitions of its marker character and
//! matches the keyword case-insensitively. Anything else on the line (code
//! fences, prose, file paths) is ordinary content.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

/// One parsed edit instruction. Both fields are verbatim text; no escaping
/// or whitespace normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchBlock {
    pub search: String,
    pub replace: String,
}

fn search_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*<{3,10}\s*SEARCH\s*$").unwrap())
}

fn separator_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*={3,10}\s*$").unwrap())
}

fn replace_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*>{3,10}\s*REPLACE\s*$").unwrap())
}

/// Parse every well-formed block out of `response`, in order of appearance.
///
/// A block that never reaches its end marker is dropped without disturbing
/// the blocks parsed before it, and a response with no blocks at all yields
/// an empty vec; callers treat that as "no change needed", not an error.
pub fn parse_blocks(response: &str) -> Vec<PatchBlock> {
    enum State {
        Outside,
        InSearch,
        InReplace,
    }

    let mut blocks = Vec::new();
    let mut search_lines: Vec<&str> = Vec::new();
    let mut replace_lines: Vec<&str> = Vec::new();
    let mut state = State::Outside;

    for line in response.lines() {
        match state {
            State::Outside => {
                if search_marker().is_match(line) {
                    search_lines.clear();
                    replace_lines.clear();
                    state = State::InSearch;
                }
            }
            State::InSearch => {
                if separator_marker().is_match(line) {
                    state = State::InReplace;
                } else if search_marker().is_match(line) {
                    // A fresh start marker abandons the half-open block.
                    search_lines.clear();
                } else {
                    search_lines.push(line);
                }
            }
            State::InReplace => {
                if replace_marker().is_match(line) {
                    blocks.push(PatchBlock {
                        search: search_lines.join("\n"),
                        replace: replace_lines.join("\n"),
                    });
                    search_lines.clear();
                    replace_lines.clear();
                    state = State::Outside;
                } else {
                    replace_lines.push(line);
                }
            }
        }
    }

    if !matches!(state, State::Outside) {
        debug!("discarding unterminated trailing patch block");
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_block() {
        let blocks = parse_blocks("<<<<<<< SEARCH\nfoo\n=======\nbar\n>>>>>>> REPLACE");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].search, "foo");
        assert_eq!(blocks[0].replace, "bar");
    }

    #[test]
    fn test_multiple_blocks_preserve_order() {
        let response = "\
```javascript
<<<<<<< SEARCH
import A from 'a'
=======
import A from 'a'
import I18n from 'i18n'
>>>>>>> REPLACE

<<<<<<< SEARCH
plugins: [
=======
plugins: [
  I18n(),
>>>>>>> REPLACE
```";
        let blocks = parse_blocks(response);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].search, "import A from 'a'");
        assert_eq!(blocks[1].search, "plugins: [");
        assert!(blocks[1].replace.contains("I18n(),"));
    }

    #[test]
    fn test_tolerates_short_markers_and_casing() {
        // Marker drift the generation service actually produces.
        let response = "<<<<< search\nold\n===\nnew\n>>>>>> Replace";
        let blocks = parse_blocks(response);
        assert_eq!(
            blocks,
            vec![PatchBlock {
                search: "old".to_string(),
                replace: "new".to_string(),
            }]
        );
    }

    #[test]
    fn test_rejects_overlong_markers() {
        // Eleven marker characters is outside the tolerated range; the line
        // counts as content, so no block is found.
        let response = "<<<<<<<<<<< SEARCH\nold\n=======\nnew\n>>>>>>> REPLACE";
        assert!(parse_blocks(response).is_empty());
    }

    #[test]
    fn test_unterminated_trailing_block_discarded() {
        let response = "<<<<<<< SEARCH\na\n=======\nb\n>>>>>>> REPLACE\n<<<<<<< SEARCH\nc\n=======\nd";
        let blocks = parse_blocks(response);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].search, "a");
    }

    #[test]
    fn test_no_blocks_yields_empty_vec() {
        assert!(parse_blocks("nothing to change here").is_empty());
        assert!(parse_blocks("").is_empty());
    }

    #[test]
    fn test_multiline_fragments() {
        let response = "<<<<<<< SEARCH\nline one\nline two\n=======\nreplacement\n>>>>>>> REPLACE";
        let blocks = parse_blocks(response);
        assert_eq!(blocks[0].search, "line one\nline two");
        assert_eq!(blocks[0].replace, "replacement");
    }

    #[test]
    fn test_empty_replace_section() {
        // Deletion: an empty replace side is legal.
        let response = "<<<<<<< SEARCH\nremove me\n=======\n>>>>>>> REPLACE";
        let blocks = parse_blocks(response);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].replace, "");
    }

    #[test]
    fn test_restarted_block_keeps_later_content() {
        // A second start marker inside a search section abandons what came
        // before it.
        let response =
            "<<<<<<< SEARCH\nstale\n<<<<<<< SEARCH\nfresh\n=======\nnew\n>>>>>>> REPLACE";
        let blocks = parse_blocks(response);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].search, "fresh");
    }
}
