// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source location tracking.

/// A byte range in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Line-start offsets of a source text, for byte offset → line:col lookup.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offset where each line begins. `line_starts[0]` is always 0.
    line_starts: Vec<usize>,
    len: usize,
}

impl LineMap {
    pub fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();
        LineMap {
            line_starts,
            len: source.len(),
        }
    }

    /// Convert a byte offset to (line, col), both 1-based. Offsets past the
    /// end clamp to the last position.
    pub fn line_col(&self, offset: usize) -> (u32, u32) {
        let offset = offset.min(self.len);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let col = offset - self.line_starts[line_idx] + 1;
        ((line_idx + 1) as u32, col as u32)
    }

    /// Source text of a 1-based line, without its newline.
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| s.saturating_sub(1))
            .unwrap_or(source.len());
        source.get(start..end)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source() {
        let lm = LineMap::new("");
        assert_eq!(lm.line_col(0), (1, 1));
        assert_eq!(lm.line_count(), 1);
    }

    #[test]
    fn offsets_across_lines() {
        let src = "class A\n{\n    Stream s;\n}";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_count(), 4);
        assert_eq!(lm.line_col(0), (1, 1));
        assert_eq!(lm.line_col(8), (2, 1));
        assert_eq!(lm.line_col(14), (3, 5));
        assert_eq!(lm.line_text(src, 3), Some("    Stream s;"));
        assert_eq!(lm.line_text(src, 5), None);
    }

    #[test]
    fn newline_belongs_to_its_line() {
        let src = "ab\ncd\n";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_col(2), (1, 3));
        assert_eq!(lm.line_col(3), (2, 1));
        assert_eq!(lm.line_text(src, 3), Some(""));
    }

    #[test]
    fn offset_past_end_clamps() {
        let lm = LineMap::new("abc");
        assert_eq!(lm.line_col(100), (1, 4));
    }

    #[test]
    fn span_len() {
        assert_eq!(Span::new(3, 7).len(), 4);
        assert!(Span::new(5, 5).is_empty());
        assert_eq!(Span::new(9, 2).len(), 0);
    }
}
