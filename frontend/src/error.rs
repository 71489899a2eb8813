use std::path::PathBuf;

/// The one hard `Result`-returning boundary in the `frontend` binary:
/// reading the source off disk or stdin. Everything past this point is
/// the soft, accumulating `Diagnostic` model — `compile_frontend` itself
/// never returns a `Result`.
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
  #[error("could not read '{path}': {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("could not read standard input: {0}")]
  Stdin(#[source] std::io::Error),
}
