// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an empty build context in a temporary directory.
pub fn context() -> TempDir {
  TempDir::new().expect("failed to create temporary build context")
}

/// Writes a file (and any missing parent directories) into the context,
/// returning its absolute path.
pub fn write_file(root: &Path, name: &str, content: &str) -> PathBuf {
  let path = root.join(name);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).expect("failed to create parent directories");
  }
  fs::write(&path, content).expect("failed to write fixture file");
  path
}
