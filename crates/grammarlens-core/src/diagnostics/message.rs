use rowan::TextRange;

/// Diagnostic kinds ordered by severity class (errors first).
///
/// None of these abort an operation: each one accompanies a degraded result
/// (an empty alternative list, an omitted graph, a group with no visible path).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Lexical problems in the grammar source
    UnterminatedBlock,
    UnexpectedCharacter,

    // Rule structure
    MalformedRule,

    // Graph assembly
    UnresolvedRule,
    EmptyDiagnosticPath,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnresolvedRule | Self::EmptyDiagnosticPath => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Default hint for this kind, appended to plain output.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::MalformedRule => Some("a rule is written `name : alternative | ... ;`"),
            Self::UnterminatedBlock => Some("add the missing `}`"),
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnterminatedBlock => "unterminated `{` block",
            Self::UnexpectedCharacter => "unexpected character",
            Self::MalformedRule => "rule has no `:`",
            Self::UnresolvedRule => "rule has no automaton",
            Self::EmptyDiagnosticPath => "diagnostic has no paths",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::MalformedRule => "rule `{}` has no `:`".to_string(),
            Self::UnresolvedRule => "rule `{}` has no automaton start state".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Source range shown to the user. Graph assembly findings have none.
    pub(crate) range: Option<TextRange>,
    pub(crate) message: String,
}

impl DiagnosticMessage {
    pub(crate) fn new(
        kind: DiagnosticKind,
        range: Option<TextRange>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            range,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> Option<TextRange> {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.range {
            Some(range) => write!(
                f,
                "{} at {}..{}: {}",
                self.severity(),
                u32::from(range.start()),
                u32::from(range.end()),
                self.message
            )?,
            None => write!(f, "{}: {}", self.severity(), self.message)?,
        }
        if let Some(hint) = self.kind.default_hint() {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
