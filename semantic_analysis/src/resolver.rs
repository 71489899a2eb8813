use std::collections::HashMap;

use diagnostic::{diagnostic::Diagnostic, diagnostic_code::DiagnosticCode, DiagnosticEngine};
use parser::ast::Node;

/// A declared variable's metadata, copied at declaration time. Never a
/// back-reference into the AST, so the symbol table can't form a cycle
/// with the tree it describes.
#[derive(Debug, Clone)]
struct Symbol {
  #[allow(dead_code)]
  declared_type: String,
  decl_line: usize,
  used: bool,
}

/// Knobs governing analysis behavior beyond spec.md's four core rules.
/// `warn_unused` defaults to `true`, matching a realistic analyzer; the
/// seed scenarios in spec.md §8 only enumerate error-severity
/// diagnostics, so tests that compare against those exact lists
/// construct the resolver with `warn_unused: false`.
#[derive(Debug, Clone, Copy)]
pub struct SemanticOptions {
  pub warn_unused: bool,
}

impl Default for SemanticOptions {
  fn default() -> Self {
    Self { warn_unused: true }
  }
}

/// Walks the AST with a stack of scopes, one per `Block`, emitting
/// semantic diagnostics. The AST itself is never mutated. A single
/// implicit top-level scope holds declarations made outside any
/// `Block`, since spec.md's `Program` root is not itself a `Block`.
pub struct Resolver {
  scopes: Vec<HashMap<String, Symbol>>,
  options: SemanticOptions,
}

impl Resolver {
  pub fn new() -> Self {
    Self::with_options(SemanticOptions::default())
  }

  pub fn with_options(options: SemanticOptions) -> Self {
    Self {
      scopes: vec![HashMap::new()],
      options,
    }
  }

  /// Entry point. Resolves `program`'s statements against the top-level
  /// scope, then pops it, flushing any unused-variable warnings for
  /// top-level declarations.
  pub fn run(&mut self, program: &Node, engine: &mut DiagnosticEngine) {
    match program {
      Node::Program(statements) => {
        for stmt in statements {
          self.resolve(stmt, engine);
        }
      },
      other => self.resolve(other, engine),
    }
    self.end_scope(engine);
  }

  fn resolve(&mut self, node: &Node, engine: &mut DiagnosticEngine) {
    match node {
      Node::Program(statements) => {
        for stmt in statements {
          self.resolve(stmt, engine);
        }
      },
      Node::Block(statements) => {
        self.begin_scope();
        for stmt in statements {
          self.resolve(stmt, engine);
        }
        self.end_scope(engine);
      },
      Node::VarDecl {
        type_node,
        var_node,
        assign_node,
        line,
      } => {
        let declared_type = match type_node.as_ref() {
          Node::Type(name) => name.clone(),
          _ => String::new(),
        };

        if let Some(init) = assign_node {
          self.resolve(init, engine);
        }

        if let Node::Variable(name, _) = var_node.as_ref() {
          self.declare(name, declared_type, *line, engine);
        }
      },
      Node::Assign { left, right, .. } => {
        self.resolve(right, engine);
        if let Node::Variable(name, line) = left.as_ref() {
          self.use_or_complain(name, *line, engine);
        }
      },
      Node::If {
        condition,
        if_block,
        else_block,
      } => {
        self.resolve(condition, engine);
        self.resolve(if_block, engine);
        if let Some(else_block) = else_block {
          self.resolve(else_block, engine);
        }
      },
      Node::BinOp { left, right, .. } => {
        self.resolve(left, engine);
        self.resolve(right, engine);
      },
      Node::Variable(name, line) => self.use_or_complain(name, *line, engine),
      Node::Number(_) | Node::Type(_) => {},
      // ErrorNodes are skipped, never recursed into.
      Node::ErrorNode { .. } => {},
    }
  }

  fn begin_scope(&mut self) {
    self.scopes.push(HashMap::new());
  }

  fn end_scope(&mut self, engine: &mut DiagnosticEngine) {
    let Some(scope) = self.scopes.pop() else {
      return;
    };
    if !self.options.warn_unused {
      return;
    }
    let mut unused: Vec<(String, Symbol)> = scope.into_iter().filter(|(_, sym)| !sym.used).collect();
    unused.sort_by_key(|(_, sym)| sym.decl_line);
    for (name, sym) in unused {
      engine.emit(Diagnostic::new(
        DiagnosticCode::UnusedVariable,
        sym.decl_line,
        format!("Variable '{}' is never used", name),
      ));
    }
  }

  /// On VarDecl: redeclaration in the **current** scope is an error;
  /// otherwise the name is bound in that scope. spec.md §4.3 has no
  /// mention of shadowing an outer scope's binding, so it is silently
  /// permitted here, matching block-scoped languages generally.
  fn declare(&mut self, name: &str, declared_type: String, line: usize, engine: &mut DiagnosticEngine) {
    let scope = self.scopes.last_mut().expect("at least one scope always open");

    if scope.contains_key(name) {
      engine.emit(Diagnostic::new(
        DiagnosticCode::VariableRedeclared,
        line,
        format!("Variable '{}' redeclared on line {}", name, line),
      ));
      return;
    }

    scope.insert(
      name.to_string(),
      Symbol {
        declared_type,
        decl_line: line,
        used: false,
      },
    );
  }

  /// Shared by `Variable` reads and `Assign` targets: look up the scope
  /// stack top-down; if the name is bound anywhere, mark it used;
  /// otherwise emit the "not declared" diagnostic spec.md §4.3 specifies
  /// for both cases.
  fn use_or_complain(&mut self, name: &str, line: usize, engine: &mut DiagnosticEngine) {
    for scope in self.scopes.iter_mut().rev() {
      if let Some(symbol) = scope.get_mut(name) {
        symbol.used = true;
        return;
      }
    }
    engine.emit(Diagnostic::new(
      DiagnosticCode::VariableNotDeclared,
      line,
      format!("Variable '{}' not declared on line {}", name, line),
    ));
  }
}

impl Default for Resolver {
  fn default() -> Self {
    Self::new()
  }
}
