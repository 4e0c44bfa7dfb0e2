//! Recoverable findings reported next to a pass's output.

mod message;
mod printer;

#[cfg(test)]
mod tests;

use rowan::TextRange;

pub use message::{DiagnosticKind, DiagnosticMessage, Severity};
pub use printer::DiagnosticsPrinter;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Starts a diagnostic of `kind` over `range` (in characters).
    ///
    /// Uses the kind's default message and severity until overridden on the builder.
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::with_default_message(kind, range),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(DiagnosticMessage::is_error)
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(DiagnosticMessage::is_warning)
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }

    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }

    pub fn render_colored(&self, source: &str, colored: bool) -> String {
        self.printer().source(source).colored(colored).render()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl DiagnosticBuilder<'_> {
    /// Detail rendered through the kind's message template.
    pub fn message(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.message.severity = severity;
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}
