//! Interactive fallback for paths not given on the command line.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub const SOURCE_PROMPT: &str = "Enter the path to the source (Azure Data Studio) JSON file: ";
pub const TARGET_PROMPT: &str = "Enter the path to the target (VS Code) JSON file: ";

/// Print `label`, read one line and return it as a path.
pub fn prompt_path<R: BufRead, W: Write>(
  label: &str,
  input: &mut R,
  output: &mut W,
) -> io::Result<PathBuf> {
  write!(output, "{label}")?;
  output.flush()?;

  let mut line = String::new();
  if input.read_line(&mut line)? == 0 {
    return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no path entered"));
  }

  let path = line.trim();
  if path.is_empty() {
    return Err(io::Error::new(io::ErrorKind::InvalidInput, "no path entered"));
  }
  Ok(PathBuf::from(path))
}

/// Use `given` when present, otherwise ask on stdin.
pub fn path_or_prompt(given: Option<PathBuf>, label: &str) -> io::Result<PathBuf> {
  match given {
    Some(path) => Ok(path),
    None => prompt_path(label, &mut io::stdin().lock(), &mut io::stdout()),
  }
}
