// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use std::collections::HashSet;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use snafu::ResultExt;
use tracing::debug;

use crate::error::*;
use crate::instruction::{is_url, SourceInstruction};
use crate::lines::logical_lines;
use crate::paths::relative_upload_key;
use crate::resolver::resolve_source;

/// An insertion-ordered set of resolved paths: a path is appended on first
/// sight and silently ignored on any later sighting.
#[derive(Debug, Default)]
struct SourceSet {
  seen: HashSet<PathBuf>,
  paths: Vec<PathBuf>
}

impl SourceSet {
  fn insert(&mut self, path: PathBuf) {
    if self.seen.insert(path.clone()) {
      self.paths.push(path);
    }
  }

  fn into_paths(self) -> Vec<PathBuf> {
    self.paths
  }
}

/// A build context rooted at a fixed directory.
///
/// All local `COPY`/`ADD` sources of a Dockerfile resolve relative to the
/// root, and every resolved path is guaranteed to stay beneath it.
///
/// ```no_run
/// use dockerfile_sources::BuildContext;
///
/// let context = BuildContext::new("/work/project");
/// let files = context.local_sources(r#"
///   FROM python:3.11
///   COPY requirements.txt /app/
///   COPY code/ /app/code/
/// "#)?;
///
/// for file in &files {
///   println!("{} -> {}", file.display(), context.upload_key(file)?);
/// }
/// # Ok::<(), dockerfile_sources::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BuildContext {
  root: PathBuf
}

impl BuildContext {
  /// Creates a build context rooted at the given directory. The root should
  /// be an absolute path to an existing directory; it is not validated here,
  /// a bad root simply fails source resolution later.
  pub fn new<P: Into<PathBuf>>(root: P) -> BuildContext {
    BuildContext { root: root.into() }
  }

  /// The context root directory.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Extracts every local file the given Dockerfile content will need, in
  /// first-reference order and without duplicates.
  ///
  /// Instructions other than `COPY`/`ADD`, comments, stage copies, and
  /// malformed instructions contribute nothing; an `ADD` of a remote URL
  /// contributes nothing. The first resolution failure aborts the whole
  /// parse: no partial file list is ever returned.
  pub fn local_sources(&self, dockerfile: &str) -> Result<Vec<PathBuf>> {
    let mut set = SourceSet::default();

    for line in logical_lines(dockerfile) {
      let instruction = match SourceInstruction::from_line(&line) {
        Some(instruction) => instruction,
        None => continue
      };

      let remote = instruction.kind.may_skip_urls()
        && instruction.sources.first().map_or(false, |s| is_url(s));
      if remote {
        debug!(line = %line, "skipping remote source");
        continue;
      }

      for source in &instruction.sources {
        for path in resolve_source(&self.root, source)? {
          set.insert(path);
        }
      }
    }

    Ok(set.into_paths())
  }

  /// As [`BuildContext::local_sources`], reading the Dockerfile content from
  /// a reader first.
  pub fn local_sources_from_reader<R>(&self, reader: R) -> Result<Vec<PathBuf>>
  where
    R: Read
  {
    let mut buf = String::new();
    let mut buf_reader = BufReader::new(reader);
    buf_reader.read_to_string(&mut buf).context(ReadError)?;

    self.local_sources(&buf)
  }

  /// Resolves a single source token against this context. See
  /// [`crate::resolve_source`].
  pub fn resolve_source(&self, source: &str) -> Result<Vec<PathBuf>> {
    resolve_source(&self.root, source)
  }

  /// Computes the forward-slash upload key for a resolved path. See
  /// [`crate::relative_upload_key`].
  pub fn upload_key(&self, path: &Path) -> Result<String> {
    relative_upload_key(&self.root, path)
  }
}
