use std::fmt;

use tessera_core::Position;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::syntax::{TokenKind, text_range};

/// Something the parser would have accepted at the failure index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    Literal(String),
    Pattern(String),
    Kind(TokenKind),
    AnyToken,
    EndOfInput,
    /// A token directly following the previous one.
    Adjacent,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Literal(text) => write!(f, "{text:?}"),
            Expectation::Pattern(pattern) => write!(f, "/{pattern}/"),
            Expectation::Kind(kind) => write!(f, "{kind}"),
            Expectation::AnyToken => f.write_str("any token"),
            Expectation::EndOfInput => f.write_str("end of input"),
            Expectation::Adjacent => f.write_str("an adjacent token"),
        }
    }
}

/// Furthest point any attempt reached, and the expectations recorded there.
#[derive(Debug, Default)]
pub(crate) struct FailureRecord {
    index: Option<usize>,
    expected: Vec<Expectation>,
}

impl FailureRecord {
    pub(crate) fn record(&mut self, index: usize, expectation: Expectation) {
        match self.index {
            Some(furthest) if index < furthest => return,
            Some(furthest) if index == furthest => {}
            _ => {
                self.index = Some(index);
                self.expected.clear();
            }
        }
        if !self.expected.contains(&expectation) {
            self.expected.push(expectation);
        }
    }

    /// Marks `index` as reached without adding an expectation.
    pub(crate) fn reach(&mut self, index: usize) {
        if self.index.is_none_or(|furthest| index > furthest) {
            self.index = Some(index);
            self.expected.clear();
        }
    }

    pub(crate) fn index(&self) -> usize {
        self.index.unwrap_or(0)
    }

    pub(crate) fn into_expected(self) -> Vec<Expectation> {
        self.expected
    }
}

/// The root rule did not match the whole input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    index: usize,
    offset: usize,
    position: Position,
    expected: Vec<Expectation>,
}

impl ParseFailure {
    pub(crate) fn new(
        index: usize,
        offset: usize,
        position: Position,
        expected: Vec<Expectation>,
    ) -> Self {
        Self {
            index,
            offset,
            position,
            expected,
        }
    }

    /// Furthest input index reached: a character offset or a token index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Character offset of the failure in the source text.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.column
    }

    pub fn expected(&self) -> &[Expectation] {
        &self.expected
    }

    /// `"x"`, or `one of "x", "y"`; `None` when nothing was expected.
    pub fn expected_summary(&self) -> Option<String> {
        match self.expected.as_slice() {
            [] => None,
            [single] => Some(single.to_string()),
            many => {
                let items: Vec<String> = many.iter().map(ToString::to_string).collect();
                Some(format!("one of {}", items.join(", ")))
            }
        }
    }

    /// The failure as a single error diagnostic at its offset.
    pub fn to_diagnostics(&self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        let builder = diagnostics.report(
            DiagnosticKind::ParseFailure,
            text_range(self.offset, self.offset),
        );
        match self.expected_summary() {
            Some(summary) => builder.message(format!("expected {summary}")).emit(),
            None => builder.emit(),
        }
        diagnostics
    }

    /// Renders the failure against `source` through the diagnostics printer.
    pub fn render(&self, source: &str) -> String {
        self.to_diagnostics().render(source)
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}",
            self.position.line, self.position.column
        )?;
        if let Some(summary) = self.expected_summary() {
            write!(f, ": expected {summary}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseFailure {}
