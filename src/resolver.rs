// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use snafu::{ensure, ResultExt};
use tracing::trace;

use crate::error::*;
use crate::paths::lexical_clean;

/// Expands a single source token into the concrete files it denotes inside
/// the build context.
///
/// The token is lexically cleaned before any filesystem access: absolute
/// tokens and tokens that would resolve outside `context_dir` are rejected
/// up front, even if nothing exists at the target. A token containing `*` is
/// expanded as a glob pattern and may legitimately match nothing; a literal
/// token must exist. Directories, matched or named directly, expand to every
/// regular file beneath them.
pub fn resolve_source(context_dir: &Path, source: &str) -> Result<Vec<PathBuf>> {
  let cleaned = lexical_clean(Path::new(source));
  ensure!(!cleaned.is_absolute(), AbsoluteSource { path: source });

  let candidate = lexical_clean(&context_dir.join(&cleaned));
  let contained = match candidate.strip_prefix(context_dir) {
    Ok(rel) => !rel.starts_with(".."),
    Err(_) => false
  };
  ensure!(contained, SourceEscapesContext { path: source });

  if source.contains('*') {
    return expand_pattern(&candidate);
  }

  let meta = match fs::metadata(&candidate) {
    Ok(meta) => meta,
    Err(ref err) if err.kind() == io::ErrorKind::NotFound => {
      return SourceNotFound { path: source }.fail();
    },
    Err(err) => {
      return Err(err).context(ContextIo { path: candidate });
    }
  };

  if meta.is_dir() {
    walk_files(&candidate)
  } else {
    trace!(path = %candidate.display(), "resolved source file");
    Ok(vec![candidate])
  }
}

/// Expands a glob pattern inside the context, recursing into any matched
/// directories. Matches that disappear or become unreadable between the glob
/// and the stat are skipped rather than failing the parse.
fn expand_pattern(pattern: &Path) -> Result<Vec<PathBuf>> {
  let pattern_str = pattern.to_string_lossy();
  let matches = glob::glob(&pattern_str).context(BadPattern {
    pattern: pattern_str.to_string()
  })?;

  let mut files = Vec::new();
  for entry in matches {
    let path = match entry {
      Ok(path) => path,
      Err(_) => continue
    };

    let meta = match fs::metadata(&path) {
      Ok(meta) => meta,
      Err(_) => continue
    };

    if meta.is_dir() {
      files.extend(walk_files(&path)?);
    } else {
      files.push(path);
    }
  }

  trace!(pattern = %pattern_str, count = files.len(), "expanded wildcard");
  Ok(files)
}

/// Recursively enumerates the regular files beneath a directory, in sorted
/// order per directory level. Symlinked directories are not followed; the
/// link itself is returned as a file.
fn walk_files(dir: &Path) -> Result<Vec<PathBuf>> {
  let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)
    .context(ContextIo { path: dir })?
    .collect::<io::Result<_>>()
    .context(ContextIo { path: dir })?;

  entries.sort_by_key(|e| e.file_name());

  let mut files = Vec::new();
  for entry in entries {
    let path = entry.path();
    let file_type = entry.file_type().context(ContextIo { path: &path })?;

    if file_type.is_dir() {
      files.extend(walk_files(&path)?);
    } else {
      files.push(path);
    }
  }

  Ok(files)
}
