#[cfg(test)]
mod tests {

  use super::*;
  use diagnostic::{
    diagnostic::{Diagnostic, Label, Span},
    diagnostic_code::DiagnosticCode,
    DiagnosticEngine,
  };

  #[test]
  fn test_diagnostic_formatting() {
    let source = r#"var b = "asdfasdf"#;

    let mut engine = DiagnosticEngine::new();

    let error = Diagnostic::new(
      DiagnosticCode::UnexpectedCharacter,
      1,
      "unexpected character '$'".to_string(),
    )
    .with_label(Label::primary(
      Span {
        file: "input".to_string(),
        line: 1,
        column: 18,
        length: 1,
      },
      Some("this character is not part of the language".to_string()),
    ))
    .with_help("remove the stray character".to_string());

    engine.emit(error);
    println!("{}", engine.format_all_plain(source));
  }

  #[test]
  fn test_spec_rendering_includes_phase_and_suggestion() {
    let mut engine = DiagnosticEngine::new();

    engine.emit(Diagnostic::new(
      DiagnosticCode::MissingSemicolon,
      5,
      "Missing ';' after declaration. Encountered KEYWORD('if')".to_string(),
    ).with_help("Did you forget a ';' after this?".to_string()));

    engine.emit(Diagnostic::new(
      DiagnosticCode::VariableNotDeclared,
      9,
      "Variable 'y' used before declaration".to_string(),
    ));

    let rendered = engine.format_all_spec();
    assert!(rendered.contains("Syntax Error on line 5: Missing ';' after declaration"));
    assert!(rendered.contains("-> Suggestion: Did you forget a ';' after this?"));
    assert!(rendered.contains("Semantic Error: Variable 'y' used before declaration on line 9"));
  }
}
