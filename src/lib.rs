// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

#![forbid(unsafe_code)]

//! # Dockerfile build-context source extraction
//!
//! A pure Rust library that determines which local files a Dockerfile's
//! `COPY` and `ADD` instructions reference within a build context, so that
//! tooling can upload exactly those files to a remote builder instead of the
//! entire context tree.
//!
//! The scanner understands shell-form and exec-form instruction arguments,
//! backslash line continuations, instruction flags (`--chown=...`),
//! stage-to-stage copies (`--from=...`), remote `ADD` URLs, and wildcard and
//! directory sources, and it rejects any source that is absolute or would
//! resolve outside the context root.
//!
//! ## Quick start
//!
//! ```no_run
//! use dockerfile_sources::BuildContext;
//!
//! let context = BuildContext::new("/work/project");
//!
//! let files = context.local_sources(r#"
//!   FROM python:3.11-slim
//!   COPY requirements.txt /app/
//!   COPY *.py /app/
//!   ADD https://example.com/data.tar.gz /data/
//! "#)?;
//!
//! // `files` holds the absolute paths of requirements.txt and each .py
//! // file; the remote ADD source is someone else's problem
//! # Ok::<(), dockerfile_sources::Error>(())
//! ```

mod error;
mod lines;
mod tokenizer;
mod instruction;
mod resolver;
mod paths;
mod context;

pub use error::*;
pub use lines::*;
pub use tokenizer::*;
pub use instruction::*;
pub use resolver::*;
pub use paths::*;
pub use context::*;

#[cfg(test)] mod test_util;
