use std::{fs, io::Read, path::PathBuf, process::ExitCode};

use clap::Parser as ClapParser;
use colored::*;
use error::FrontendError;
use frontend::compile_frontend;
use logger::{LogType, Logger};

mod error;

/// SimpleC front-end driver: scans, parses (with recovery), and
/// semantically analyzes a source file or stdin, printing the collated
/// diagnostic transcript.
#[derive(ClapParser, Debug)]
#[command(name = "frontend", about = "SimpleC compiler front-end")]
struct Cli {
  /// Source file to compile. Omit and pass --stdin to read from standard
  /// input instead.
  path: Option<PathBuf>,

  /// Read source from standard input instead of a file.
  #[arg(long)]
  stdin: bool,

  /// Disable colored diagnostic output.
  #[arg(long)]
  no_color: bool,
}

fn read_source(cli: &Cli) -> Result<String, FrontendError> {
  if cli.stdin {
    let mut buf = String::new();
    std::io::stdin()
      .read_to_string(&mut buf)
      .map_err(FrontendError::Stdin)?;
    return Ok(buf);
  }

  let path = cli.path.clone().expect("checked by main before calling read_source");
  fs::read_to_string(&path).map_err(|source| FrontendError::Io { path, source })
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  if cli.no_color {
    colored::control::set_override(false);
  }

  if cli.path.is_none() && !cli.stdin {
    eprintln!(
      "{}",
      "error: either a file path or --stdin is required".red().bold()
    );
    return ExitCode::from(64);
  }

  let source = match read_source(&cli) {
    Ok(source) => source,
    Err(err) => {
      eprintln!("{} {}", "error:".red().bold(), err);
      return ExitCode::from(66);
    },
  };

  Logger::log(LogType::Info("scanning…"), 0);
  Logger::log(LogType::Info("parsing…"), 0);
  Logger::log(LogType::Info("analyzing…"), 0);

  let output = compile_frontend(&source);

  if output.diagnostics.is_empty() {
    println!("{}", "compilation successful, no diagnostics".green().bold());
    return ExitCode::SUCCESS;
  }

  for diagnostic in &output.diagnostics {
    println!("{}", diagnostic.render());
  }

  let error_count = output
    .diagnostics
    .iter()
    .filter(|d| matches!(d.severity, diagnostic::diagnostic_code::Severity::Error))
    .count();
  let warning_count = output.diagnostics.len() - error_count;

  println!();
  if error_count > 0 {
    println!(
      "{}: could not compile due to {} previous {}{}",
      "error".red().bold(),
      error_count,
      if error_count == 1 { "error" } else { "errors" },
      if warning_count > 0 {
        format!(
          "; {} {} emitted",
          warning_count,
          if warning_count == 1 { "warning" } else { "warnings" }
        )
      } else {
        String::new()
      }
    );
    ExitCode::from(65)
  } else {
    println!(
      "{}: {} {} emitted",
      "warning".yellow().bold(),
      warning_count,
      if warning_count == 1 { "warning" } else { "warnings" }
    );
    ExitCode::SUCCESS
  }
}
