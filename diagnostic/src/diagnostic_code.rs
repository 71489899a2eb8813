/// Which pipeline stage produced a diagnostic.
///
/// The front-end runs the lexer, then the parser, then the semantic
/// analyzer to completion before the next stage starts, so diagnostics
/// accumulate phase-by-phase in the shared collector; this is what lets a
/// diagnostic remember which phase it came from once they're all mixed
/// into one ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
  Lex,
  Syntax,
  Semantic,
}

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Error,
  Warning,
  Note,
  Help,
}

/// Unique identifier for each type of diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
  // Lexical
  UnexpectedCharacter,

  // Syntax
  MissingSemicolon,
  MissingParen,
  MissingBrace,
  UnexpectedSemicolon,
  UnexpectedToken,
  ExpectedExpression,
  ExpectedIdentifier,
  ExpectedToken,

  // Semantic
  VariableRedeclared,
  VariableNotDeclared,

  // Warning
  UnusedVariable,

  // Ambient (CLI boundary, never emitted by compile_frontend itself)
  FileNotFound,
  InvalidArguments,
}

impl DiagnosticCode {
  pub fn code(&self) -> String {
    match self {
      Self::UnexpectedCharacter => "E0001".to_string(),

      Self::MissingSemicolon => "E0100".to_string(),
      Self::MissingParen => "E0101".to_string(),
      Self::MissingBrace => "E0102".to_string(),
      Self::UnexpectedSemicolon => "E0103".to_string(),
      Self::UnexpectedToken => "E0104".to_string(),
      Self::ExpectedExpression => "E0105".to_string(),
      Self::ExpectedIdentifier => "E0106".to_string(),
      Self::ExpectedToken => "E0107".to_string(),

      Self::VariableRedeclared => "E0200".to_string(),
      Self::VariableNotDeclared => "E0201".to_string(),

      Self::UnusedVariable => "W0001".to_string(),

      Self::FileNotFound => "E0400".to_string(),
      Self::InvalidArguments => "E0401".to_string(),
    }
  }

  pub fn severity(&self) -> Severity {
    match self {
      Self::UnusedVariable => Severity::Warning,
      _ => Severity::Error,
    }
  }

  pub fn phase(&self) -> Phase {
    match self {
      Self::UnexpectedCharacter => Phase::Lex,

      Self::MissingSemicolon
      | Self::MissingParen
      | Self::MissingBrace
      | Self::UnexpectedSemicolon
      | Self::UnexpectedToken
      | Self::ExpectedExpression
      | Self::ExpectedIdentifier
      | Self::ExpectedToken => Phase::Syntax,

      Self::VariableRedeclared | Self::VariableNotDeclared | Self::UnusedVariable => {
        Phase::Semantic
      },

      Self::FileNotFound | Self::InvalidArguments => Phase::Syntax,
    }
  }
}
