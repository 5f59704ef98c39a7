// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use std::path::PathBuf;

use snafu::Snafu;

/// A build-context source extraction error.
///
/// The `Display` strings of the tokenizer and path-safety variants are a
/// stable contract; callers and tests may match on them as substrings.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
  #[snafu(display(
    "absolute source path not supported: {}", path
  ))]
  AbsoluteSource {
    path: String
  },

  #[snafu(display(
    "source path escapes context: {}", path
  ))]
  SourceEscapesContext {
    path: String
  },

  #[snafu(display(
    "source not found: {}", path
  ))]
  SourceNotFound {
    path: String
  },

  #[snafu(display("unclosed quote"))]
  UnclosedQuote,

  #[snafu(display("not json array"))]
  NotJsonArray,

  #[snafu(display("expected quoted string in array"))]
  ExpectedQuotedString,

  #[snafu(display(
    "invalid wildcard pattern '{}': {}", pattern, source
  ))]
  BadPattern {
    pattern: String,
    source: glob::PatternError
  },

  #[snafu(display(
    "could not read '{}': {}", path.display(), source
  ))]
  ContextIo {
    path: PathBuf,
    source: std::io::Error
  },

  #[snafu(display(
    "could not read Dockerfile: {}", source
  ))]
  ReadError {
    source: std::io::Error
  },

  #[snafu(display(
    "path '{}' is not inside build context '{}'", path.display(), context.display()
  ))]
  PathOutsideContext {
    path: PathBuf,
    context: PathBuf
  }
}

/// A source extraction Result.
pub type Result<T, E = Error> = std::result::Result<T, E>;
