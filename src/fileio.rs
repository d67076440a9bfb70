//! Line-ending-preserving file access.
//!
//! Patch matching is exact, so the buffer handed to the patch engine is
//! normalized to LF. The original convention is recorded at read time and
//! restored on write, keeping CRLF projects CRLF.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineEnding {
    Lf,
    Crlf,
}

/// A file's text content with its original line-ending convention.
#[derive(Debug, Clone)]
pub struct FileText {
    path: PathBuf,
    ending: LineEnding,
    content: String,
}

impl FileText {
    /// Read a file, normalizing CRLF to LF in the returned content.
    ///
    /// The underlying `io::Error` is preserved as the error source, so a
    /// caller can downcast to distinguish "not found" from other failures.
    pub fn read(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let ending = if raw.contains("\r\n") {
            LineEnding::Crlf
        } else {
            LineEnding::Lf
        };

        let content = match ending {
            LineEnding::Crlf => raw.replace("\r\n", "\n"),
            LineEnding::Lf => raw,
        };

        Ok(Self {
            path,
            ending,
            content,
        })
    }

    /// LF-normalized content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write `content` back to the same path, restoring the original
    /// line-ending convention first.
    pub fn write(&self, content: &str) -> Result<()> {
        let output = match self.ending {
            LineEnding::Crlf => content.replace('\n', "\r\n"),
            LineEnding::Lf => content.to_string(),
        };

        std::fs::write(&self.path, output)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        debug!("wrote {}", self.path.display());
        Ok(())
    }
}

/// Whether an error chain bottoms out in a file-not-found condition.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .map(|io| io.kind() == std::io::ErrorKind::NotFound)
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_lf_round_trip() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("a.vue");
        std::fs::write(&path, "<p>hi</p>\n").unwrap();

        let file = FileText::read(&path).unwrap();
        assert_eq!(file.content(), "<p>hi</p>\n");

        file.write("<p>{{ t('hi') }}</p>\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "<p>{{ t('hi') }}</p>\n"
        );
    }

    #[test]
    fn test_crlf_normalized_and_restored() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("a.vue");
        std::fs::write(&path, "line one\r\nline two\r\n").unwrap();

        let file = FileText::read(&path).unwrap();
        assert_eq!(file.content(), "line one\nline two\n");

        file.write("line one\nchanged\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "line one\r\nchanged\r\n"
        );
    }

    #[test]
    fn test_missing_file_is_distinguishable() {
        let tmp = tempdir().unwrap();
        let err = FileText::read(tmp.path().join("nope.vue")).unwrap_err();
        assert!(is_not_found(&err));
    }
}
