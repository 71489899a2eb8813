use diagnostic::{
  diagnostic::{Diagnostic, Label, Span},
  diagnostic_code::DiagnosticCode,
  DiagnosticEngine,
};

use crate::{
  token::{types::TokenKind, Token},
  Scanner,
};

impl Scanner {
  /// Scans the whole source, pushing tokens and emitting lexical
  /// diagnostics as it goes. Never aborts early; always appends exactly
  /// one `EOF`.
  pub fn get_tokens(&mut self, engine: &mut DiagnosticEngine) {
    if self.line == 0 {
      self.line = 1;
    }

    while !self.is_at_end() {
      self.start = self.current;
      self.start_column = self.column;
      let c = self.advance();

      let token_kind = match c {
        '(' => Some(TokenKind::Delim),
        ')' => Some(TokenKind::Delim),
        '{' => Some(TokenKind::Delim),
        '}' => Some(TokenKind::Delim),
        ';' => Some(TokenKind::Delim),
        ',' => Some(TokenKind::Delim),

        '=' => {
          if self.match_char('=') {
            self.advance();
          }
          Some(TokenKind::Op)
        },
        '!' => {
          if self.match_char('=') {
            self.advance();
            Some(TokenKind::Op)
          } else {
            let diagnostic = Diagnostic::new(
              DiagnosticCode::UnexpectedCharacter,
              self.line,
              "Unexpected character '!'".to_string(),
            )
            .with_label(Label::primary(
              Span {
                file: "input".to_string(),
                line: self.line,
                column: self.start_column,
                length: 1,
              },
              None,
            ));
            engine.emit(diagnostic);
            None
          }
        },
        '>' => {
          if self.match_char('=') {
            self.advance();
          }
          Some(TokenKind::Op)
        },
        '<' => {
          if self.match_char('=') {
            self.advance();
          }
          Some(TokenKind::Op)
        },
        '+' | '-' | '*' => Some(TokenKind::Op),

        '/' => {
          if self.match_char('/') {
            self.consume_line_comment();
            None
          } else {
            Some(TokenKind::Op)
          }
        },

        ' ' | '\r' | '\t' | '\n' => None,

        'a'..='z' | 'A'..='Z' | '_' => Some(self.tokenize_keyword_or_id()),
        '0'..='9' => Some(self.tokenize_number()),

        unknown => {
          let diagnostic = Diagnostic::new(
            DiagnosticCode::UnexpectedCharacter,
            self.line,
            format!("Unexpected character '{}'", unknown),
          )
          .with_label(Label::primary(
            Span {
              file: "input".to_string(),
              line: self.line,
              column: self.start_column,
              length: 1,
            },
            None,
          ));
          engine.emit(diagnostic);
          None
        },
      };

      if let Some(kind) = token_kind {
        self.add_token(kind);
      }
    }

    self.tokens.push(Token::eof(self.line, self.column));
  }

  fn consume_line_comment(&mut self) {
    while let Some(c) = self.peek() {
      if c == '\n' {
        break;
      }
      self.advance();
    }
  }

  fn tokenize_number(&mut self) -> TokenKind {
    while let Some(c) = self.peek() {
      if c.is_ascii_digit() {
        self.advance();
      } else {
        break;
      }
    }

    if self.peek() == Some('.') {
      if let Some(next) = self.peek_next() {
        if next.is_ascii_digit() {
          self.advance();
          while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
              self.advance();
            } else {
              break;
            }
          }
        }
      }
    }

    TokenKind::Number
  }

  fn tokenize_keyword_or_id(&mut self) -> TokenKind {
    while let Some(c) = self.peek() {
      if c.is_ascii_alphanumeric() || c == '_' {
        self.advance();
      } else {
        break;
      }
    }

    match self.get_current_lexeme() {
      "int" | "float" | "if" | "else" => TokenKind::Keyword,
      _ => TokenKind::Id,
    }
  }

  fn add_token(&mut self, kind: TokenKind) {
    let lexeme = self.get_current_lexeme().to_string();
    self.tokens.push(Token::new(kind, lexeme, self.line, self.start_column));
  }

  fn is_at_end(&self) -> bool {
    self.current == self.source.len()
  }

  fn advance(&mut self) -> char {
    let c = self.peek().expect("advance called at end of source");
    self.current += c.len_utf8();
    if c == '\n' {
      self.line += 1;
      self.column = 0;
    } else {
      self.column += 1;
    }
    c
  }

  fn peek(&self) -> Option<char> {
    self.source[self.current..].chars().next()
  }

  fn peek_next(&self) -> Option<char> {
    let mut chars = self.source[self.current..].chars();
    chars.next();
    chars.next()
  }

  fn match_char(&self, expected: char) -> bool {
    self.peek() == Some(expected)
  }

  fn get_current_lexeme(&self) -> &str {
    &self.source[self.start..self.current]
  }
}
