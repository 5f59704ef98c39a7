// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use std::path::{Component, Path, PathBuf};

use crate::error::*;

/// Lexically normalizes a path: `.` segments are removed and `..` segments
/// consume a preceding normal segment where one exists. Leading `..`
/// segments on a relative path are kept, and `..` directly under the root is
/// dropped. No filesystem access is performed; an empty result becomes `.`.
pub(crate) fn lexical_clean(path: &Path) -> PathBuf {
  let mut parts: Vec<Component> = Vec::new();

  for component in path.components() {
    match component {
      Component::Prefix(_) | Component::RootDir => parts.push(component),
      Component::CurDir => (),
      Component::ParentDir => match parts.last() {
        Some(Component::Normal(_)) => {
          parts.pop();
        },
        Some(Component::RootDir) | Some(Component::Prefix(_)) => (),
        _ => parts.push(component)
      },
      Component::Normal(_) => parts.push(component)
    }
  }

  if parts.is_empty() {
    return PathBuf::from(".");
  }

  parts.iter().collect()
}

/// Maps an absolute path under the context root to its root-relative form
/// with forward-slash separators, suitable as a host-independent upload key.
///
/// Fails if `path` does not lie under `context_dir`; paths produced by
/// source resolution always do.
pub fn relative_upload_key(context_dir: &Path, path: &Path) -> Result<String> {
  let rel = path.strip_prefix(context_dir).map_err(|_| {
    Error::PathOutsideContext {
      path: path.to_path_buf(),
      context: context_dir.to_path_buf()
    }
  })?;

  let parts: Vec<String> = rel
    .components()
    .map(|c| c.as_os_str().to_string_lossy().into_owned())
    .collect();

  Ok(parts.join("/"))
}
