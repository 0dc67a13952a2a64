const OPEN: &str = "${{";
const CLOSE: &str = "}}";

/// One `${{ ... }}` interpolation span found in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    /// Text between the delimiters, untrimmed.
    pub inner: &'a str,
    /// Byte offset of the opening `${{`.
    pub position: usize,
}

impl Span<'_> {
    /// Whether the interior spans more than one line.
    #[must_use]
    pub fn is_multiline(&self) -> bool {
        self.inner.contains('\n')
    }
}

/// Iterate over the interpolation spans of `text` in document order.
///
/// Each span ends at the first `}}` after its opening delimiter. Scanning
/// resumes after that `}}`, and stops entirely at the first opening that
/// has no close, so the whole document is scanned once.
pub fn extract_spans(text: &str) -> Spans<'_> {
    Spans { text, offset: 0 }
}

/// Iterator returned by [`extract_spans`].
#[derive(Debug, Clone)]
pub struct Spans<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Iterator for Spans<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Span<'a>> {
        let rest = self.text.get(self.offset..)?;
        let position = self.offset + rest.find(OPEN)?;
        let body_start = position + OPEN.len();
        let Some(close) = self.text[body_start..].find(CLOSE) else {
            self.offset = self.text.len();
            return None;
        };
        let body_end = body_start + close;
        self.offset = body_end + CLOSE.len();
        Some(Span {
            inner: &self.text[body_start..body_end],
            position,
        })
    }
}
