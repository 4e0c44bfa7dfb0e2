use rowan::TextRange;

/// Kinds of recoverable findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    /// A character no lexer channel accepted, skipped under the report policy.
    UnrecognizedCharacter,
    /// The input did not match the grammar.
    ParseFailure,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnrecognizedCharacter => Severity::Warning,
            Self::ParseFailure => Severity::Error,
        }
    }

    /// Base message, used when no detail is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnrecognizedCharacter => "unrecognized character",
            Self::ParseFailure => "parse error",
        }
    }

    /// Template for detailed messages; `{}` is replaced by the detail.
    pub fn custom_message(&self) -> String {
        format!("{}: {{}}", self.fallback_message())
    }

    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One finding. Ranges count characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) severity: Severity,
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            range,
            message: kind.fallback_message().to_string(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity,
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )
    }
}
