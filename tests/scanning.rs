// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

extern crate dockerfile_sources;

use std::path::PathBuf;

use indoc::indoc;
use pretty_assertions::assert_eq;

use dockerfile_sources::*;

mod common;
use common::*;

#[test]
fn scan_basic() -> Result<(), Error> {
  let ctx = context();
  let app = write_file(ctx.path(), "app.py", "print('hello')");
  let req = write_file(ctx.path(), "requirements.txt", "flask");

  let sources = BuildContext::new(ctx.path()).local_sources(indoc!(r#"
    FROM ubuntu:20.04
    RUN echo "test"
    COPY app.py requirements.txt /app/
  "#))?;

  assert_eq!(sources, vec![app, req]);

  Ok(())
}

#[test]
fn scan_no_copy_or_add() -> Result<(), Error> {
  let ctx = context();
  write_file(ctx.path(), "app.py", "");

  let sources = BuildContext::new(ctx.path()).local_sources(indoc!(r#"
    FROM ubuntu:20.04
    RUN echo "test"
    CMD ["python", "app.py"]
  "#))?;

  assert_eq!(sources, Vec::<PathBuf>::new());

  Ok(())
}

#[test]
fn scan_is_deterministic() -> Result<(), Error> {
  let ctx = context();
  write_file(ctx.path(), "a.py", "");
  write_file(ctx.path(), "b.py", "");
  write_file(ctx.path(), "lib/util.py", "");

  let dockerfile = indoc!(r#"
    FROM python:3.11
    COPY *.py /app/
    COPY lib /app/lib/
  "#);

  let context = BuildContext::new(ctx.path());
  assert_eq!(
    context.local_sources(dockerfile)?,
    context.local_sources(dockerfile)?
  );

  Ok(())
}

#[test]
fn scan_deduplicates_at_first_position() -> Result<(), Error> {
  let ctx = context();
  let a = write_file(ctx.path(), "a.txt", "a");
  let b = write_file(ctx.path(), "b.txt", "b");

  let sources = BuildContext::new(ctx.path()).local_sources(indoc!(r#"
    FROM scratch
    COPY a.txt b.txt /app/
    COPY b.txt a.txt /other/
  "#))?;

  assert_eq!(sources, vec![a, b]);

  Ok(())
}

#[test]
fn scan_line_continuations_and_comments() -> Result<(), Error> {
  let ctx = context();
  let a = write_file(ctx.path(), "a.txt", "");
  let b = write_file(ctx.path(), "b.txt", "");
  write_file(ctx.path(), "ignored.txt", "");

  let sources = BuildContext::new(ctx.path()).local_sources(
    "FROM scratch\r\n# COPY ignored.txt /app/\r\ncopy a.txt \\\r\n  b.txt \\\r\n  /app/\r\n"
  )?;

  assert_eq!(sources, vec![a, b]);

  Ok(())
}

#[test]
fn scan_exec_form() -> Result<(), Error> {
  let ctx = context();
  let a = write_file(ctx.path(), "a", "");
  let b = write_file(ctx.path(), "b", "");

  let sources = BuildContext::new(ctx.path())
    .local_sources(r#"COPY ["a","b","/app/"]"#)?;

  assert_eq!(sources, vec![a, b]);

  Ok(())
}

#[test]
fn scan_wildcard() -> Result<(), Error> {
  let ctx = context();
  let a = write_file(ctx.path(), "a.py", "");
  let b = write_file(ctx.path(), "b.py", "");
  write_file(ctx.path(), "c.txt", "");

  let sources = BuildContext::new(ctx.path())
    .local_sources("COPY *.py /app/")?;

  assert_eq!(sources, vec![a, b]);

  Ok(())
}

#[test]
fn scan_directory_source() -> Result<(), Error> {
  let ctx = context();
  let main = write_file(ctx.path(), "code/main.py", "pass");
  let util = write_file(ctx.path(), "code/pkg/util.py", "pass");

  let sources = BuildContext::new(ctx.path())
    .local_sources("COPY code /app/code/")?;

  assert_eq!(sources, vec![main, util]);

  Ok(())
}

#[test]
fn scan_chown_flag_keeps_sources() -> Result<(), Error> {
  let ctx = context();
  let app = write_file(ctx.path(), "app.py", "");

  let sources = BuildContext::new(ctx.path())
    .local_sources("COPY --chown=user:group app.py /app/")?;

  assert_eq!(sources, vec![app]);

  Ok(())
}

#[test]
fn scan_from_flag_discards_instruction() -> Result<(), Error> {
  let ctx = context();
  // the named source exists on disk, but a stage copy never touches it
  write_file(ctx.path(), "tool", "");

  let sources = BuildContext::new(ctx.path())
    .local_sources("COPY --from=builder tool /bin/")?;

  assert_eq!(sources, Vec::<PathBuf>::new());

  Ok(())
}

#[test]
fn scan_add_url_skipped() -> Result<(), Error> {
  let ctx = context();
  let local = write_file(ctx.path(), "local.txt", "x");

  let sources = BuildContext::new(ctx.path()).local_sources(indoc!(r#"
    ADD https://x/file.tar.gz /tmp/
    COPY local.txt /app/
  "#))?;

  assert_eq!(sources, vec![local]);

  Ok(())
}

#[test]
fn scan_copy_url_is_a_context_path() {
  let ctx = context();

  // COPY does not know about URLs, so the token resolves (and fails) as an
  // ordinary context path
  let err = BuildContext::new(ctx.path())
    .local_sources("COPY https://x/file.tar.gz /tmp/")
    .unwrap_err();

  assert_eq!(
    err.to_string(),
    "source not found: https://x/file.tar.gz"
  );
}

#[test]
fn scan_absolute_source_fails() {
  let ctx = context();

  let err = BuildContext::new(ctx.path())
    .local_sources("COPY /abs/path /app/")
    .unwrap_err();

  assert_eq!(
    err.to_string(),
    "absolute source path not supported: /abs/path"
  );
}

#[test]
fn scan_escaping_source_fails() {
  let ctx = context();

  let err = BuildContext::new(ctx.path())
    .local_sources("COPY ../outside.txt /app/")
    .unwrap_err();

  assert_eq!(
    err.to_string(),
    "source path escapes context: ../outside.txt"
  );
}

#[test]
fn scan_missing_source_fails_with_no_partial_result() {
  let ctx = context();
  write_file(ctx.path(), "exists.txt", "");

  let err = BuildContext::new(ctx.path())
    .local_sources(indoc!(r#"
      COPY exists.txt /app/
      COPY missing.txt /app/
    "#))
    .unwrap_err();

  assert_eq!(err.to_string(), "source not found: missing.txt");
}

#[test]
fn scan_tolerates_malformed_instructions() -> Result<(), Error> {
  let ctx = context();
  let app = write_file(ctx.path(), "app.py", "");

  // the unclosed quote only skips its own instruction
  let sources = BuildContext::new(ctx.path()).local_sources(indoc!(r#"
    COPY "unclosed /app/
    COPY app.py /app/
  "#))?;

  assert_eq!(sources, vec![app]);

  Ok(())
}

#[test]
fn scan_from_reader() -> Result<(), Error> {
  let ctx = context();
  let app = write_file(ctx.path(), "app.py", "");

  let sources = BuildContext::new(ctx.path())
    .local_sources_from_reader("COPY app.py /app/".as_bytes())?;

  assert_eq!(sources, vec![app]);

  Ok(())
}

#[test]
fn upload_keys_for_scanned_sources() -> Result<(), Error> {
  let ctx = context();
  write_file(ctx.path(), "requirements.txt", "flask");
  write_file(ctx.path(), "code/app.py", "print('hello')");

  let context = BuildContext::new(ctx.path());
  let sources = context.local_sources(indoc!(r#"
    FROM ubuntu:20.04
    COPY requirements.txt /app/
    COPY code/app.py /app/code/
  "#))?;

  let keys = sources
    .iter()
    .map(|p| context.upload_key(p))
    .collect::<Result<Vec<_>, _>>()?;

  assert_eq!(keys, vec!["requirements.txt", "code/app.py"]);

  Ok(())
}
