use std::fmt;
use std::rc::Rc;

/// Represents a source file and its content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Source {
    pub filename: String,
    pub content: String,
}

impl Source {
    /// Creates a source with `\r\n` and lone `\r` line endings normalized to `\n`.
    pub fn new(filename: impl Into<String>, content: &str) -> Self {
        Self {
            filename: filename.into(),
            content: content.replace("\r\n", "\n").replace('\r', "\n"),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filename)
    }
}

/// Represents a location in a source file. Lines and columns are 1-based,
/// `offset` counts chars from the start of the content.
#[derive(Debug, Clone)]
pub struct Location {
    pub source: Rc<Source>,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn start_of(source: Rc<Source>) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

/// Represents a span in a source file.
#[derive(Debug, Clone)]
pub struct Span {
    /// The start location of the span.
    pub start: Location,
    /// The end location of the span (exclusive).
    pub end: Location,
}

impl Span {
    pub fn new(start: Location, end: Location) -> Self {
        debug_assert_eq!(start.source, end.source);
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A spanned value, directly convertible from a scanned token.
#[derive(Clone)]
pub struct Spanned<T> {
    pub inner: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn line(&self) -> usize {
        self.span.start.line
    }

    pub fn column(&self) -> usize {
        self.span.start.column
    }
}

impl<T: fmt::Debug> fmt::Debug for Spanned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}:{}", self.inner, self.line(), self.column())
    }
}
