// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use crate::error::*;

/// Splits an instruction's argument string into an ordered list of tokens.
///
/// Arguments beginning with `[` are treated as exec form: a minimal
/// JSON-ish array of single- or double-quoted strings. Anything else is
/// treated as shell form and split on runs of spaces and tabs, honoring
/// quoted tokens.
///
/// Quote handling is deliberately simple: a quoted token or array entry runs
/// to the next occurrence of the same quote character, with no interpretation
/// of escape sequences.
///
/// ```
/// use dockerfile_sources::tokenize_instruction;
///
/// assert_eq!(
///   tokenize_instruction(r#"["a", "b", "/app/"]"#).unwrap(),
///   vec!["a", "b", "/app/"]
/// );
/// ```
pub fn tokenize_instruction(args: &str) -> Result<Vec<String>> {
  if args.trim_start().starts_with('[') {
    return tokenize_exec_array(args);
  }

  let mut tokens = Vec::new();
  let mut rest = args;

  loop {
    rest = rest.trim_start_matches(|c| c == ' ' || c == '\t');
    if rest.is_empty() {
      break;
    }

    let first = rest.as_bytes()[0];
    if first == b'"' || first == b'\'' {
      let end = match rest[1..].find(first as char) {
        Some(end) => end,
        None => return UnclosedQuote.fail()
      };

      tokens.push(rest[1..=end].to_string());
      rest = &rest[end + 2..];
      continue;
    }

    let end = rest
      .find(|c| c == ' ' || c == '\t')
      .unwrap_or_else(|| rest.len());

    tokens.push(rest[..end].to_string());
    rest = &rest[end..];
  }

  Ok(tokens)
}

/// Reads a bracketed, comma-separated list of quoted strings.
///
/// This is not a full JSON parser: single quotes are accepted alongside
/// double quotes, and input past the closing `]` is ignored.
fn tokenize_exec_array(args: &str) -> Result<Vec<String>> {
  let mut rest = args.trim();
  if !rest.starts_with('[') {
    return NotJsonArray.fail();
  }
  rest = rest[1..].trim_start();

  let mut tokens = Vec::new();

  loop {
    rest = rest.trim_start_matches(|c| c == ' ' || c == '\t' || c == ',');
    if rest.is_empty() || rest.starts_with(']') {
      break;
    }

    let quote = rest.as_bytes()[0];
    if quote != b'"' && quote != b'\'' {
      return ExpectedQuotedString.fail();
    }

    let end = match rest[1..].find(quote as char) {
      Some(end) => end,
      None => return UnclosedQuote.fail()
    };

    tokens.push(rest[1..=end].to_string());
    rest = &rest[end + 2..];
  }

  Ok(tokens)
}
