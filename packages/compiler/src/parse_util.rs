//! Parse Utilities
//!
//! Source locations and the diagnostics collector shared by the attribute
//! splitter and the widget transformer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chars;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseSourceFile {
    pub content: String,
    pub url: String,
}

impl ParseSourceFile {
    pub fn new(content: impl Into<String>, url: impl Into<String>) -> Self {
        ParseSourceFile {
            content: content.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseLocation {
    pub file: ParseSourceFile,
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub fn new(file: ParseSourceFile, offset: usize, line: usize, col: usize) -> Self {
        ParseLocation { file, offset, line, col }
    }

    /// Location `delta` characters further into the file. Stops at the end of
    /// the content.
    pub fn move_by(&self, delta: usize) -> ParseLocation {
        let mut offset = self.offset;
        let mut line = self.line;
        let mut col = self.col;

        for ch in self.file.content[self.offset.min(self.file.content.len())..]
            .chars()
            .take(delta)
        {
            offset += ch.len_utf8();
            if ch == chars::NEWLINE {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }

        ParseLocation::new(self.file.clone(), offset, line, col)
    }
}

impl fmt::Display for ParseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.file.url, self.line, self.col)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan { start, end }
    }

    /// Span covering all of `content`, as used for nodes built from a single
    /// template string.
    pub fn for_content(content: impl Into<String>, url: impl Into<String>) -> Self {
        let file = ParseSourceFile::new(content, url);
        let start = ParseLocation::new(file, 0, 0, 0);
        let end = start.move_by(usize::MAX);
        ParseSourceSpan::new(start, end)
    }

    /// The source text covered by this span.
    pub fn text(&self) -> &str {
        let content = &self.start.file.content;
        let end = self.end.offset.min(content.len());
        let start = self.start.offset.min(end);
        &content[start..end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseErrorLevel {
    Warning,
    Error,
}

impl fmt::Display for ParseErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorLevel::Warning => f.write_str("WARNING"),
            ParseErrorLevel::Error => f.write_str("ERROR"),
        }
    }
}

/// A single compile-time diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseError {
    pub span: Option<ParseSourceSpan>,
    pub msg: String,
    pub level: ParseErrorLevel,
}

impl ParseError {
    pub fn new(span: Option<ParseSourceSpan>, msg: impl Into<String>) -> Self {
        ParseError {
            span,
            msg: msg.into(),
            level: ParseErrorLevel::Error,
        }
    }

    pub fn warning(span: Option<ParseSourceSpan>, msg: impl Into<String>) -> Self {
        ParseError {
            span,
            msg: msg.into(),
            level: ParseErrorLevel::Warning,
        }
    }

    /// Message with the offending source text appended, if a span is known.
    pub fn contextual_message(&self) -> String {
        match &self.span {
            Some(span) if !span.text().is_empty() => {
                format!("{} (\"[{} ->]{}\")", self.msg, self.level, span.text())
            }
            _ => self.msg.clone(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some(span) => write!(f, "{}: {}", self.contextual_message(), span.start),
            None => f.write_str(&self.msg),
        }
    }
}

/// Accumulates diagnostics across a compilation.
///
/// Nothing in this crate aborts on a user error: every problem is pushed here
/// and processing moves on, so one pass can surface several diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<ParseError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ParseError) {
        log::trace!("diagnostic: {}", error);
        self.entries.push(error);
    }

    pub fn error(&mut self, msg: impl Into<String>, span: Option<&ParseSourceSpan>) {
        self.push(ParseError::new(span.cloned(), msg));
    }

    pub fn warning(&mut self, msg: impl Into<String>, span: Option<&ParseSourceSpan>) {
        self.push(ParseError::warning(span.cloned(), msg));
    }

    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.level == ParseErrorLevel::Error)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.entries.iter()
    }

    /// Messages only, in report order. Mostly useful in tests.
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.msg.clone()).collect()
    }
}
