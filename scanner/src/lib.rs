use crate::token::Token;
use diagnostic::DiagnosticEngine;

pub mod token;
mod utils;

/// Converts a source string into an ordered token sequence, emitting
/// lexical diagnostics for anything it can't recognize. Stateless beyond
/// the scan cursor below.
pub struct Scanner {
  pub tokens: Vec<Token>,
  pub source: String,
  pub line: usize,
  pub column: usize,
  pub start_column: usize,
  pub current: usize,
  pub start: usize,
}

impl Scanner {
  pub fn new(source: impl Into<String>) -> Self {
    Self {
      source: source.into(),
      column: 0,
      start_column: 0,
      line: 1,
      start: 0,
      current: 0,
      tokens: vec![],
    }
  }

  /// Runs the scan to completion and returns the token sequence,
  /// recording any lexical diagnostics into `engine`.
  pub fn scan(mut self, engine: &mut DiagnosticEngine) -> Vec<Token> {
    self.get_tokens(engine);
    self.tokens
  }
}
