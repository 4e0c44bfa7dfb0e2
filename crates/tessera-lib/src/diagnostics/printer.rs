//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};
use rowan::TextRange;
use tessera_core::{Source, SourceKind};

use super::Diagnostics;
use super::message::Severity;

pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    /// Content and, for files, the path of a registered source.
    pub fn from_source(mut self, source: Source<'s>) -> Self {
        self.source = Some(source.content);
        if let SourceKind::File(path) = source.kind {
            self.path = Some(path.as_str());
        }
        self
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return self.format_plain(w);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            let range = byte_range(diag.range(), source);

            let mut snippet = Snippet::source(source).line_start(1).annotation(
                AnnotationKind::Primary
                    .span(range)
                    .label(diag.message()),
            );
            if let Some(p) = self.path {
                snippet = snippet.path(p);
            }

            let level = severity_to_level(diag.severity());
            let report = vec![level.primary_title(diag.message()).element(snippet)];

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", diag)?;
        }
        Ok(())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

/// Converts a character range into a byte range of `source`.
/// An empty range is widened to the character it points at, if any.
fn byte_range(range: TextRange, source: &str) -> std::ops::Range<usize> {
    let start_char: usize = range.start().into();
    let mut end_char: usize = range.end().into();
    if start_char == end_char {
        end_char += 1;
    }

    let byte_at = |n: usize| {
        source
            .char_indices()
            .nth(n)
            .map_or(source.len(), |(byte, _)| byte)
    };
    byte_at(start_char)..byte_at(end_char)
}

impl Diagnostics {
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}
