use crate::diagnostic_code::{DiagnosticCode, Phase, Severity};

/// Represents a source code location
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
  pub file: String,
  pub line: usize,
  pub column: usize,
  pub length: usize,
}

/// Label for underlining specific parts of code
#[derive(Debug, Clone)]
pub struct Label {
  pub span: Span,
  pub message: Option<String>,
  pub style: LabelStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
  Primary,
  Secondary,
}

impl Label {
  pub fn primary(span: Span, message: Option<String>) -> Self {
    Self {
      span,
      message,
      style: LabelStyle::Primary,
    }
  }

  pub fn secondary(span: Span, message: Option<String>) -> Self {
    Self {
      span,
      message,
      style: LabelStyle::Secondary,
    }
  }
}

/// A single diagnostic message.
///
/// `phase` and `line` are flat convenience fields (mirroring `code.phase()`
/// and the primary label's span) so callers that only want the plain
/// `(phase, line, message, suggestion)` shape don't have to reach into
/// `labels[0].span.line`.
#[derive(Debug, Clone)]
pub struct Diagnostic {
  pub code: DiagnosticCode,
  pub severity: Severity,
  pub phase: Phase,
  pub line: usize,
  pub message: String,
  pub labels: Vec<Label>,
  pub notes: Vec<String>,
  pub help: Option<String>,
}

impl Diagnostic {
  pub fn new(code: DiagnosticCode, line: usize, message: String) -> Self {
    Self {
      severity: code.severity(),
      phase: code.phase(),
      code,
      line,
      message,
      labels: Vec::new(),
      notes: Vec::new(),
      help: None,
    }
  }

  pub fn with_label(mut self, label: Label) -> Self {
    self.labels.push(label);
    self
  }

  pub fn with_note(mut self, note: String) -> Self {
    self.notes.push(note);
    self
  }

  pub fn with_help(mut self, help: String) -> Self {
    self.help = Some(help);
    self
  }

  /// The diagnostic's advisory suggestion text, if any.
  pub fn suggestion(&self) -> Option<&str> {
    self.help.as_deref()
  }

  /// Renders the plain transcript line(s) mandated for the phase:
  /// `Syntax Error on line <L>: <message>`, `Semantic Error: <message> on
  /// line <L>`, or (for the lexer, which the format doesn't separately
  /// name) the same shape as Syntax. A suggestion, if present, follows on
  /// its own indented line.
  pub fn render(&self) -> String {
    let head = match self.phase {
      Phase::Lex => format!("Lex Error on line {}: {}", self.line, self.message),
      Phase::Syntax => format!("Syntax Error on line {}: {}", self.line, self.message),
      Phase::Semantic => format!("Semantic Error: {} on line {}", self.message, self.line),
    };
    match &self.help {
      Some(suggestion) => format!("{}\n   -> Suggestion: {}", head, suggestion),
      None => head,
    }
  }
}
