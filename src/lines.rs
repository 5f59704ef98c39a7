// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

/// Splits off the next physical line, accepting `\n`, `\r`, and `\r\n`
/// endings, and returns it along with the remaining input.
fn next_physical_line(s: &str) -> Option<(&str, &str)> {
  let idx = s.find(|c| c == '\n' || c == '\r')?;
  let line = &s[..idx];
  let mut rest = &s[idx + 1..];

  // merge two-character line endings
  if rest.starts_with('\n') || rest.starts_with('\r') {
    rest = &rest[1..];
  }

  Some((line, rest))
}

/// Joins backslash-continued physical lines into logical instruction lines.
///
/// Each returned line is trimmed of surrounding whitespace; blank lines are
/// dropped. Comment lines are *not* filtered here, they are kept verbatim for
/// the scanner to classify. A line whose trimmed form ends in a backslash is
/// joined with the following physical line's trimmed content, separated by a
/// single space, until a line no longer ends in a backslash or the input is
/// exhausted.
///
/// ```
/// use dockerfile_sources::logical_lines;
///
/// assert_eq!(
///   logical_lines("COPY a \\\n  b /dest/\n"),
///   vec!["COPY a b /dest/"]
/// );
/// ```
pub fn logical_lines(content: &str) -> Vec<String> {
  let mut lines = Vec::new();
  let mut rest = content;

  while !rest.is_empty() {
    // a final chunk with no line ending is still a physical line
    let (first, tail) = match next_physical_line(rest) {
      Some((first, tail)) => (first, tail),
      None => (rest, "")
    };
    rest = tail;

    let mut line = first.trim_end().to_string();
    while line.ends_with('\\') {
      line.pop();
      line.truncate(line.trim_end().len());

      match next_physical_line(rest) {
        Some((next, tail)) => {
          line.push(' ');
          line.push_str(next.trim());
          rest = tail;
        },
        None => {
          line.push(' ');
          line.push_str(rest.trim());
          rest = "";
          break;
        }
      }
    }

    let line = line.trim();
    if !line.is_empty() {
      lines.push(line.to_string());
    }
  }

  lines
}
