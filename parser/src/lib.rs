/*
*
*  The grammar (informal)
*
*  program      -> statement*
*  statement    -> var_decl | if_stmt | block | assign_stmt
*  var_decl     -> type ID ('=' expr)? ';'
*  if_stmt      -> 'if' '(' expr ')' statement ('else' statement)?
*  block        -> '{' statement* '}'
*  assign_stmt  -> ID '=' expr ';'
*  expr         -> rel
*  rel          -> add (REL_OP add)?
*  add          -> mul (('+'|'-') mul)*
*  mul          -> unary (('*'|'/') unary)*
*  unary        -> NUMBER | ID | '(' expr ')'
*
*/

use diagnostic::{diagnostic::Diagnostic, diagnostic_code::DiagnosticCode, DiagnosticEngine};
use scanner::token::{types::TokenKind, Token};

use crate::{
  ast::{Node, Span},
  suggestions::{suggestion_for, RecoveryRule},
};

pub mod ast;
pub mod suggestions;

pub struct Parser {
  tokens: Vec<Token>,
  current: usize,
}

impl Parser {
  pub fn new(tokens: Vec<Token>) -> Self {
    Self { tokens, current: 0 }
  }

  /// Consumes the whole token sequence, constructs an AST rooted at
  /// `Program`, and records syntax diagnostics in `engine`. Never fails:
  /// structural faults degrade to `ErrorNode`s rather than aborting.
  pub fn parse(mut self, engine: &mut DiagnosticEngine) -> Node {
    let children = self.parse_statement_list_until(engine, |t| matches!(t.kind, TokenKind::Eof));
    Node::Program(children)
  }

  // --- statement level -----------------------------------------------

  /// Parses statements until `stop` matches the lookahead token (or EOF
  /// is reached). Performs rule 3's statement-level panic-mode resync
  /// directly in the loop: a token that starts no known statement gets
  /// one diagnostic and is skipped, guaranteeing forward progress.
  fn parse_statement_list_until(
    &mut self,
    engine: &mut DiagnosticEngine,
    stop: impl Fn(&Token) -> bool,
  ) -> Vec<Node> {
    let mut statements = Vec::new();

    while !self.is_at_end() && !stop(self.peek()) {
      match self.parse_statement(engine) {
        Some(node) => statements.push(node),
        None => {
          let tok = self.peek().clone();
          engine.emit(Diagnostic::new(
            DiagnosticCode::UnexpectedToken,
            tok.line,
            format!("Unexpected token {} at start of statement", tok.describe()),
          ));
          self.advance();
        },
      }
    }

    statements
  }

  /// Tries to parse one statement at the current position. Returns
  /// `None` when the lookahead token starts none of the four statement
  /// forms, leaving the cursor untouched for the caller to resync.
  fn parse_statement(&mut self, engine: &mut DiagnosticEngine) -> Option<Node> {
    if self.at_keyword("int") || self.at_keyword("float") {
      Some(self.parse_var_decl(engine))
    } else if self.at_keyword("if") {
      Some(self.parse_if(engine))
    } else if self.at_delim("{") {
      Some(self.parse_block(engine))
    } else if matches!(self.peek().kind, TokenKind::Id) {
      Some(self.parse_assign_stmt(engine))
    } else {
      None
    }
  }

  /// Parses a single required statement slot (an `if`/`else` body),
  /// falling back to an `ErrorNode` with a one-token skip when the
  /// lookahead starts no statement at all.
  fn parse_required_statement(&mut self, engine: &mut DiagnosticEngine) -> Node {
    if let Some(node) = self.parse_statement(engine) {
      return node;
    }

    let tok = self.peek().clone();
    engine.emit(Diagnostic::new(
      DiagnosticCode::UnexpectedToken,
      tok.line,
      format!("Unexpected token {} at start of statement", tok.describe()),
    ));
    let span = Span {
      line: tok.line,
      column: tok.column,
      length: tok.lexeme.len().max(1),
    };
    if !self.is_at_end() {
      self.advance();
    }
    Node::ErrorNode {
      recovered_from: span,
    }
  }

  fn parse_var_decl(&mut self, engine: &mut DiagnosticEngine) -> Node {
    let type_tok = self.advance();
    let type_node = Node::Type(type_tok.lexeme.clone());

    let decl_line = type_tok.line;
    let var_node = if matches!(self.peek().kind, TokenKind::Id) {
      let tok = self.advance();
      Node::Variable(tok.lexeme, tok.line)
    } else {
      let tok = self.peek().clone();
      engine.emit(Diagnostic::new(
        DiagnosticCode::ExpectedIdentifier,
        tok.line,
        format!(
          "Expected identifier after type '{}'. Encountered {}",
          type_tok.lexeme,
          tok.describe()
        ),
      ));
      Node::Variable("<error>".to_string(), tok.line)
    };

    let mut assign_node = if self.at_op("=") {
      self.advance();
      Some(Box::new(self.parse_expr(engine)))
    } else {
      None
    };

    if let Some(garbage) = self.expect_terminator(";", "declaration", DiagnosticCode::MissingSemicolon, engine) {
      if assign_node.is_some() {
        assign_node = Some(Box::new(Node::ErrorNode { recovered_from: garbage }));
      }
    }

    Node::VarDecl {
      type_node: Box::new(type_node),
      var_node: Box::new(var_node),
      assign_node,
      line: decl_line,
    }
  }

  fn parse_if(&mut self, engine: &mut DiagnosticEngine) -> Node {
    self.advance(); // 'if'

    if self.at_delim("(") {
      self.advance();
    } else {
      let tok = self.peek().clone();
      engine.emit(Diagnostic::new(
        DiagnosticCode::ExpectedToken,
        tok.line,
        format!("Expected '(' after 'if'. Encountered {}", tok.describe()),
      ));
    }

    let mut condition = self.parse_expr(engine);
    if let Some(garbage) = self.expect_terminator(")", "if-condition", DiagnosticCode::MissingParen, engine) {
      condition = Node::ErrorNode { recovered_from: garbage };
    }

    // Rule 2: a stray ';' right after the condition creates an empty if.
    if self.at_delim(";") {
      let tok = self.peek().clone();
      engine.emit(
        Diagnostic::new(
          DiagnosticCode::UnexpectedSemicolon,
          tok.line,
          "Unexpected ';' after if-condition. This creates an empty 'if' statement.".to_string(),
        )
        .with_help(suggestion_for(RecoveryRule::StraySemicolonAfterCondition, ";")),
      );
      self.advance();
      let if_block = Node::Block(vec![]);
      let else_block = self.parse_optional_else(engine);
      return Node::If {
        condition: Box::new(condition),
        if_block: Box::new(if_block),
        else_block,
      };
    }

    let if_block = self.parse_required_statement(engine);
    let else_block = self.parse_optional_else(engine);

    Node::If {
      condition: Box::new(condition),
      if_block: Box::new(if_block),
      else_block,
    }
  }

  fn parse_optional_else(&mut self, engine: &mut DiagnosticEngine) -> Option<Box<Node>> {
    if self.at_keyword("else") {
      self.advance();
      Some(Box::new(self.parse_required_statement(engine)))
    } else {
      None
    }
  }

  fn parse_block(&mut self, engine: &mut DiagnosticEngine) -> Node {
    self.advance(); // '{'

    let statements = self.parse_statement_list_until(engine, |t| {
      (matches!(t.kind, TokenKind::Delim) && t.lexeme == "}") || matches!(t.kind, TokenKind::Eof)
    });

    if self.at_delim("}") {
      self.advance();
    } else {
      // Only EOF can end the loop above without landing on '}'.
      let tok = self.peek().clone();
      engine.emit(Diagnostic::new(
        DiagnosticCode::MissingBrace,
        tok.line,
        format!("Missing '}}' to close block. Encountered {}", tok.describe()),
      ));
    }

    Node::Block(statements)
  }

  fn parse_assign_stmt(&mut self, engine: &mut DiagnosticEngine) -> Node {
    let id_tok = self.advance();
    let assign_line = id_tok.line;
    let left = Node::Variable(id_tok.lexeme.clone(), id_tok.line);

    if self.at_op("=") {
      self.advance();
    } else {
      let tok = self.peek().clone();
      engine.emit(Diagnostic::new(
        DiagnosticCode::ExpectedToken,
        tok.line,
        format!(
          "Expected '=' after identifier '{}'. Encountered {}",
          id_tok.lexeme,
          tok.describe()
        ),
      ));
    }

    let mut right = self.parse_expr(engine);
    if let Some(garbage) =
      self.expect_terminator(";", "expression statement", DiagnosticCode::MissingSemicolon, engine)
    {
      right = Node::ErrorNode {
        recovered_from: garbage,
      };
    }

    Node::Assign {
      op: "=".to_string(),
      left: Box::new(left),
      right: Box::new(right),
      line: assign_line,
    }
  }

  // --- expression level ------------------------------------------------

  fn parse_expr(&mut self, engine: &mut DiagnosticEngine) -> Node {
    self.parse_rel(engine)
  }

  fn parse_rel(&mut self, engine: &mut DiagnosticEngine) -> Node {
    let lhs = self.parse_add(engine);
    if self.at_rel_op() {
      let op = self.advance().lexeme;
      let rhs = self.parse_add(engine);
      return Node::BinOp {
        op,
        left: Box::new(lhs),
        right: Box::new(rhs),
      };
    }
    lhs
  }

  fn parse_add(&mut self, engine: &mut DiagnosticEngine) -> Node {
    let mut lhs = self.parse_mul(engine);
    while self.at_op("+") || self.at_op("-") {
      let op = self.advance().lexeme;
      let rhs = self.parse_mul(engine);
      lhs = Node::BinOp {
        op,
        left: Box::new(lhs),
        right: Box::new(rhs),
      };
    }
    lhs
  }

  fn parse_mul(&mut self, engine: &mut DiagnosticEngine) -> Node {
    let mut lhs = self.parse_unary(engine);
    while self.at_op("*") || self.at_op("/") {
      let op = self.advance().lexeme;
      let rhs = self.parse_unary(engine);
      lhs = Node::BinOp {
        op,
        left: Box::new(lhs),
        right: Box::new(rhs),
      };
    }
    lhs
  }

  fn parse_unary(&mut self, engine: &mut DiagnosticEngine) -> Node {
    match self.peek().kind {
      TokenKind::Number => {
        let tok = self.advance();
        Node::Number(tok.lexeme.parse::<f64>().unwrap_or(0.0))
      },
      TokenKind::Id => {
        let tok = self.advance();
        Node::Variable(tok.lexeme, tok.line)
      },
      TokenKind::Delim if self.peek().lexeme == "(" => {
        self.advance();
        let inner = self.parse_expr(engine);
        self.expect_terminator(")", "grouping", DiagnosticCode::MissingParen, engine);
        inner
      },
      _ => {
        // Rule 4: expression slot failure. Substitute a literal Number(0)
        // and leave the cursor where it is.
        let tok = self.peek().clone();
        engine.emit(Diagnostic::new(
          DiagnosticCode::ExpectedExpression,
          tok.line,
          format!("Expected expression. Encountered {}", tok.describe()),
        ));
        Node::Number(0.0)
      },
    }
  }

  // --- terminator helper -----------------------------------------------

  /// Expects `delim` at the cursor. Three outcomes, per spec.md §4.2.1's
  /// follow-set table:
  ///
  /// - `delim` is right there: consume it, `None`.
  /// - it's absent but the lookahead is a token the table says may
  ///   legitimately follow `context`: synthesize `delim` logically (emit
  ///   a diagnostic, don't advance), `None` — this is what lets recovery
  ///   continue on the real token instead of eating it.
  /// - it's absent and the lookahead is *not* in that follow set: the
  ///   observed token is garbage between the construct and its
  ///   terminator (e.g. a lexically-orphaned literal), so skip forward
  ///   until `delim` or a follow-set token turns up before deciding
  ///   whether to emit a diagnostic. Returns `Some(span)` of the
  ///   skipped region so the caller can mark whatever it already parsed
  ///   as unreliable.
  fn expect_terminator(
    &mut self,
    delim: &str,
    context: &str,
    code: DiagnosticCode,
    engine: &mut DiagnosticEngine,
  ) -> Option<Span> {
    if self.at_delim(delim) {
      self.advance();
      return None;
    }

    if self.is_at_end() {
      let tok = self.peek().clone();
      engine.emit(Diagnostic::new(
        code,
        tok.line,
        format!("Expected '{}' after {}. Encountered {}", delim, context, tok.describe()),
      ));
      return None;
    }

    if self.in_follow_set(context) {
      let tok = self.peek().clone();
      engine.emit(
        Diagnostic::new(
          code,
          tok.line,
          format!("Missing '{}' after {}. Encountered {}", delim, context, tok.describe()),
        )
        .with_help(suggestion_for(RecoveryRule::MissingTerminator, delim)),
      );
      return None;
    }

    let garbage_start = self.peek().clone();
    let mut garbage_len = 0usize;
    while !self.is_at_end() && !self.at_delim(delim) && !self.in_follow_set(context) {
      self.advance();
      garbage_len += 1;
    }
    let garbage = Span {
      line: garbage_start.line,
      column: garbage_start.column,
      length: garbage_len.max(1),
    };

    if self.at_delim(delim) {
      self.advance();
      return Some(garbage);
    }

    let tok = self.peek().clone();
    if self.is_at_end() {
      engine.emit(Diagnostic::new(
        code,
        tok.line,
        format!("Expected '{}' after {}. Encountered {}", delim, context, tok.describe()),
      ));
    } else {
      engine.emit(
        Diagnostic::new(
          code,
          tok.line,
          format!("Missing '{}' after {}. Encountered {}", delim, context, tok.describe()),
        )
        .with_help(suggestion_for(RecoveryRule::MissingTerminator, delim)),
      );
    }
    Some(garbage)
  }

  /// Whether the lookahead token is one spec.md §4.2.1's follow-set
  /// table says may legitimately appear after `context`. Declarations,
  /// assignments, and expression-statements share one follow set (the
  /// tokens that justify synthesizing a missing `;`); if-conditions have
  /// their own (for a missing `)`). Sites the table doesn't cover (a
  /// parenthesized grouping) treat every token as legitimate, preserving
  /// unconditional synthesis there.
  fn in_follow_set(&self, context: &str) -> bool {
    let tok = self.peek();
    match context {
      "declaration" | "expression statement" => {
        self.at_delim("}")
          || matches!(tok.kind, TokenKind::Id)
          || (matches!(tok.kind, TokenKind::Keyword) && matches!(tok.lexeme.as_str(), "if" | "int" | "float"))
      },
      "if-condition" => {
        self.at_delim("{")
          || matches!(tok.kind, TokenKind::Id)
          || (matches!(tok.kind, TokenKind::Keyword) && matches!(tok.lexeme.as_str(), "if" | "int" | "float"))
      },
      _ => true,
    }
  }

  // --- cursor primitives -------------------------------------------------

  fn peek(&self) -> &Token {
    &self.tokens[self.current]
  }

  fn is_at_end(&self) -> bool {
    matches!(self.peek().kind, TokenKind::Eof)
  }

  /// Advances and returns the consumed token. `EOF` is a sentinel and is
  /// never consumed destructively: calling this at end-of-stream just
  /// returns another clone of it.
  fn advance(&mut self) -> Token {
    let tok = self.peek().clone();
    if !self.is_at_end() {
      self.current += 1;
    }
    tok
  }

  fn at_delim(&self, lexeme: &str) -> bool {
    matches!(self.peek().kind, TokenKind::Delim) && self.peek().lexeme == lexeme
  }

  fn at_op(&self, lexeme: &str) -> bool {
    matches!(self.peek().kind, TokenKind::Op) && self.peek().lexeme == lexeme
  }

  fn at_keyword(&self, lexeme: &str) -> bool {
    matches!(self.peek().kind, TokenKind::Keyword) && self.peek().lexeme == lexeme
  }

  fn at_rel_op(&self) -> bool {
    matches!(self.peek().kind, TokenKind::Op)
      && matches!(self.peek().lexeme.as_str(), "==" | "!=" | ">=" | "<=" | ">" | "<")
  }
}
