use octo_util::SourceMap;

/// A byte-indexed read head over a [`SourceMap`]'s buffer, tracking
/// 1-based (line, column) as it goes. The source sentinel byte (`0`) makes
/// `current()`/`peek()` past the end always well-defined.
pub struct Cursor<'a> {
    source: &'a SourceMap,
    offset: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a SourceMap) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.source.len()
    }

    pub fn current(&self) -> u8 {
        self.source.byte(self.offset)
    }

    pub fn peek(&self) -> u8 {
        self.source.byte(self.offset + 1)
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    /// Consumes and returns the current byte, advancing line/column
    /// bookkeeping. A no-op at end of source (returns the sentinel).
    pub fn advance(&mut self) -> u8 {
        if self.is_at_end() {
            return 0;
        }
        let c = self.source.byte(self.offset);
        self.offset += 1;
        if c == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_line_and_column() {
        let source = SourceMap::from_source("t.oc", "ab\ncd");
        let mut cursor = Cursor::new(&source);
        assert_eq!(cursor.advance(), b'a');
        assert_eq!((cursor.line(), cursor.column()), (1, 2));
        assert_eq!(cursor.advance(), b'b');
        assert_eq!(cursor.advance(), b'\n');
        assert_eq!((cursor.line(), cursor.column()), (2, 1));
        assert_eq!(cursor.advance(), b'c');
        assert_eq!((cursor.line(), cursor.column()), (2, 2));
    }

    #[test]
    fn past_end_is_sentinel_and_inert() {
        let source = SourceMap::from_source("t.oc", "a");
        let mut cursor = Cursor::new(&source);
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.current(), 0);
        assert_eq!(cursor.advance(), 0);
    }
}
