//! The SimpleC front-end's single public entry point: `compile_frontend`.
//!
//! Composes the three leaves-first components — [`scanner::Scanner`],
//! [`parser::Parser`], [`semantic_analysis::Resolver`] — behind one pure
//! function. No shared mutable state crosses invocations: every call
//! owns its own lexer cursor, parser cursor, symbol-table stack, and
//! diagnostic collector, all of which are dropped when the call returns.

use diagnostic::{diagnostic::Diagnostic, DiagnosticEngine};
use parser::{ast::Node, Parser};
use scanner::{token::Token, Scanner};
use semantic_analysis::{Resolver, SemanticOptions};

/// The three products of one front-end run: the token stream, the AST
/// (always `Some(Program)` in practice — see the field doc), and the
/// phase-ordered diagnostic transcript.
#[derive(Debug)]
pub struct CompileOutput {
  pub tokens: Vec<Token>,
  /// `Some(Node::Program(..))` whenever the lexer produced at least
  /// `Eof`, which is always. Kept as an `Option` to mirror spec.md's
  /// literal "ast: Program | null" contract rather than collapsing it to
  /// a bare `Node`.
  pub ast: Option<Node>,
  pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutput {
  pub fn has_errors(&self) -> bool {
    self
      .diagnostics
      .iter()
      .any(|d| matches!(d.severity, diagnostic::diagnostic_code::Severity::Error))
  }
}

/// Runs the full front-end pipeline over `source` and returns its three
/// products in one batch. Never fails: every phase's exit condition is
/// "input exhausted," not "no errors" — callers detect failure by
/// inspecting whether `diagnostics` contains an error-severity entry.
pub fn compile_frontend(source: &str) -> CompileOutput {
  compile_frontend_with_options(source, SemanticOptions::default())
}

/// Same as [`compile_frontend`], but lets the caller override the
/// semantic analyzer's optional unused-variable warning — used by tests
/// that reproduce spec.md §8's seed scenarios verbatim, which enumerate
/// only the errors those scenarios name.
pub fn compile_frontend_with_options(source: &str, semantic_options: SemanticOptions) -> CompileOutput {
  let mut engine = DiagnosticEngine::new();

  let tokens = Scanner::new(source).scan(&mut engine);
  let ast = Parser::new(tokens.clone()).parse(&mut engine);
  Resolver::with_options(semantic_options).run(&ast, &mut engine);

  CompileOutput {
    tokens,
    ast: Some(ast),
    diagnostics: engine.into_sorted_diagnostics(),
  }
}
