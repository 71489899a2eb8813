/// Which recovery rule produced a diagnostic, keying the advisory-text
/// lookup below. Kept as data rather than inline string-building so new
/// suggestions can be added without touching parser control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryRule {
  MissingTerminator,
  StraySemicolonAfterCondition,
}

/// Looks up the advisory suggestion for a recovered fault. `delim` is the
/// missing/offending token's lexeme, used to fill in terminator-specific
/// wording; it's ignored by rules that don't reference a delimiter.
pub fn suggestion_for(rule: RecoveryRule, delim: &str) -> String {
  match rule {
    RecoveryRule::MissingTerminator => format!("Did you forget a '{}' after this?", delim),
    RecoveryRule::StraySemicolonAfterCondition => "Did you mean to delete this ';'?".to_string(),
  }
}
