// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::tokenizer::tokenize_instruction;

/// The two instruction kinds that can reference files in the build context.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InstructionKind {
  Copy,
  Add
}

impl InstructionKind {
  fn from_keyword(word: &str) -> Option<InstructionKind> {
    if word.eq_ignore_ascii_case("COPY") {
      Some(InstructionKind::Copy)
    } else if word.eq_ignore_ascii_case("ADD") {
      Some(InstructionKind::Add)
    } else {
      None
    }
  }

  /// `ADD` may name a remote URL as its source; `COPY` may not, so a URL-ish
  /// `COPY` source is still treated as a context path.
  pub fn may_skip_urls(self) -> bool {
    self == InstructionKind::Add
  }
}

/// Determines whether a source token refers to a remote resource rather than
/// a file in the build context.
pub fn is_url(token: &str) -> bool {
  lazy_static! {
    static ref URL: Regex = Regex::new("^https?://").unwrap();
  }

  URL.is_match(token)
}

/// A `COPY` or `ADD` instruction reduced to the parts relevant for build
/// context upload: its kind, its flag-stripped source tokens, and its
/// destination.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SourceInstruction {
  pub kind: InstructionKind,
  pub sources: Vec<String>,
  pub destination: String
}

impl SourceInstruction {
  /// Classifies a single logical line, returning its source instruction if
  /// it has any host-filesystem sources.
  ///
  /// Returns `None` for anything that contributes nothing: comments, other
  /// instructions, instructions too short to hold a source and a
  /// destination, stage-to-stage copies (`--from=...`), and lines whose
  /// arguments fail to tokenize. Tokenizer failures are tolerated rather
  /// than escalated so that unusual syntax elsewhere in a Dockerfile cannot
  /// abort source extraction.
  pub fn from_line(line: &str) -> Option<SourceInstruction> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
      return None;
    }

    let split = line.find(|c: char| c.is_whitespace())?;
    let kind = InstructionKind::from_keyword(&line[..split])?;
    let args = line[split..].trim_start();

    let mut tokens = match tokenize_instruction(args) {
      Ok(tokens) => tokens,
      Err(err) => {
        debug!(%err, line, "skipping untokenizable instruction");
        return None;
      }
    };

    // at minimum one source and a destination
    if tokens.len() < 2 {
      return None;
    }

    let destination = tokens.pop()?;

    let mut sources = Vec::new();
    for token in tokens {
      if token.starts_with("--") {
        if token.to_ascii_lowercase().starts_with("--from=") {
          // a stage-to-stage copy has no host-filesystem sources at all
          debug!(line, "skipping stage copy");
          return None;
        }

        // note: any other `--` token is assumed to be a flag and dropped
        // without validation against a known flag set, masking typos like
        // `--chwon=...`
        continue;
      }

      sources.push(token);
    }

    if sources.is_empty() {
      return None;
    }

    Some(SourceInstruction {
      kind, sources, destination
    })
  }
}
