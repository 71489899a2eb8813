/// Coarse classification of a token, per the language's token taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  Keyword,
  Id,
  Number,
  Op,
  Delim,
  // Reserved for a future string literal extension; the grammar this
  // lexer feeds has no string productions, so the lexer never emits it.
  String,
  Eof,
}

impl std::fmt::Display for TokenKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let text = match self {
      TokenKind::Keyword => "KEYWORD",
      TokenKind::Id => "ID",
      TokenKind::Number => "NUMBER",
      TokenKind::Op => "OP",
      TokenKind::Delim => "DELIM",
      TokenKind::String => "STRING",
      TokenKind::Eof => "EOF",
    };
    write!(f, "{}", text)
  }
}
