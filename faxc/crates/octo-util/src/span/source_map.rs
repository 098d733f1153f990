use std::io;
use std::path::{Path, PathBuf};

use super::Span;

/// A loaded compilation unit: path, raw byte buffer (with an appended NUL
/// sentinel byte so the tokenizer can always peek one byte past the last
/// real character without bounds-checking), and a line-start table built in
/// a single scan. Immutable once constructed, owned for the whole
/// compilation.
#[derive(Debug)]
pub struct SourceMap {
    path: PathBuf,
    buffer: Vec<u8>,
    len: usize,
    line_starts: Vec<usize>,
}

impl SourceMap {
    /// Loads `path` from disk. Loading is the only fallible operation here;
    /// everything downstream treats the result as immutable and infallible.
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let contents = std::fs::read(&path)?;
        Ok(Self::from_bytes(path, contents))
    }

    /// Builds a `SourceMap` directly from in-memory source text, bypassing
    /// the filesystem. Used by tests and by any embedder that already has
    /// the source text in hand.
    pub fn from_source(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self::from_bytes(path.into(), source.into().into_bytes())
    }

    fn from_bytes(path: PathBuf, mut contents: Vec<u8>) -> Self {
        let len = contents.len();
        contents.push(0);
        let line_starts = Self::compute_line_starts(&contents[..len]);
        Self {
            path,
            buffer: contents,
            len,
            line_starts,
        }
    }

    fn compute_line_starts(text: &[u8]) -> Vec<usize> {
        let mut starts = vec![0];
        for (i, &b) in text.iter().enumerate() {
            if b == b'\n' {
                starts.push(i + 1);
            }
        }
        starts
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Length of the real source, not counting the sentinel byte.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte at `offset`. Returns `0` (the sentinel) for `offset >= len()`,
    /// mirroring the NUL-terminated buffer the tokenizer scans.
    pub fn byte(&self, offset: usize) -> u8 {
        self.buffer.get(offset).copied().unwrap_or(0)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 1-based (line, column) for a byte offset into the source.
    pub fn offset_to_line_col(&self, offset: usize) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx];
        let column = offset - line_start + 1;
        (line_idx as u32 + 1, column as u32)
    }

    /// The 1-based `line`'s text, excluding the trailing newline. Returns
    /// an empty string for an out-of-range line rather than panicking, since
    /// diagnostics must never crash the compiler that produced them.
    pub fn line_text(&self, line: u32) -> &str {
        let idx = match line.checked_sub(1) {
            Some(i) => i as usize,
            None => return "",
        };
        let Some(&start) = self.line_starts.get(idx) else {
            return "";
        };
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| s.saturating_sub(1))
            .unwrap_or(self.len);
        let end = end.max(start);
        let slice = &self.buffer[start..end.min(self.buffer.len())];
        let slice = match slice.last() {
            Some(b'\r') => &slice[..slice.len() - 1],
            _ => slice,
        };
        std::str::from_utf8(slice).unwrap_or("")
    }

    pub fn span_at(&self, offset: usize) -> Span {
        let (line, column) = self.offset_to_line_col(offset);
        Span::new(line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_has_one_line_start() {
        let sm = SourceMap::from_source("t.oc", "let x = 1;");
        assert_eq!(sm.line_count(), 1);
        assert_eq!(sm.line_text(1), "let x = 1;");
    }

    #[test]
    fn multi_line_offsets() {
        let sm = SourceMap::from_source("t.oc", "let x = 1;\nlet y = 2;\n");
        assert_eq!(sm.line_count(), 3);
        assert_eq!(sm.line_text(2), "let y = 2;");
        assert_eq!(sm.offset_to_line_col(11), (2, 1));
    }

    #[test]
    fn byte_past_end_is_sentinel() {
        let sm = SourceMap::from_source("t.oc", "ab");
        assert_eq!(sm.byte(0), b'a');
        assert_eq!(sm.byte(1), b'b');
        assert_eq!(sm.byte(2), 0);
        assert_eq!(sm.byte(1000), 0);
    }

    #[test]
    fn empty_source() {
        let sm = SourceMap::from_source("t.oc", "");
        assert_eq!(sm.len(), 0);
        assert!(sm.is_empty());
        assert_eq!(sm.byte(0), 0);
    }

    #[test]
    fn trailing_carriage_return_trimmed() {
        let sm = SourceMap::from_source("t.oc", "let x = 1;\r\nlet y = 2;");
        assert_eq!(sm.line_text(1), "let x = 1;");
    }
}
