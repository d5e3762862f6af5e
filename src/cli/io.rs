//! JSON line I/O for the CLI
//!
//! - Input: one JSON document per line
//! - Output: one JSON object per line
//! - UTF-8 only; a line that does not decode is handed back as malformed

use std::io::{BufRead, Write};
use std::string::FromUtf8Error;

use serde_json::{json, Value};

use crate::schema::{Document, Violation};

use super::errors::{CliError, CliResult};

/// One non-blank input line: its 1-based number and its text, or the
/// decode error if the bytes are not UTF-8.
pub type InputLine = (usize, Result<String, FromUtf8Error>);

/// Reads non-blank lines, paired with their 1-based line number.
///
/// Only a failure to read the stream is an `Err`; undecodable lines are
/// yielded so the caller can report them and keep going.
pub fn read_lines<R: BufRead>(reader: R) -> impl Iterator<Item = CliResult<InputLine>> {
    reader
        .split(b'\n')
        .enumerate()
        .filter_map(|(i, line)| match line {
            Ok(mut bytes) => {
                if bytes.last() == Some(&b'\r') {
                    bytes.pop();
                }
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return None;
                }
                Some(Ok((i + 1, String::from_utf8(bytes))))
            }
            Err(e) => Some(Err(CliError::from(e))),
        })
}

/// Write an accepted document
pub fn write_accepted<W: Write>(out: &mut W, collection: &str, data: Document) -> CliResult<()> {
    write_json(
        out,
        &json!({
            "status": "ok",
            "collection": collection,
            "data": data
        }),
    )
}

/// Write a rejected document with its violations
pub fn write_rejected<W: Write>(
    out: &mut W,
    code: &str,
    collection: &str,
    line: usize,
    violations: &[Violation],
) -> CliResult<()> {
    write_json(
        out,
        &json!({
            "status": "error",
            "code": code,
            "collection": collection,
            "line": line,
            "violations": violations
        }),
    )
}

/// Write an error response that has no violations
pub fn write_error<W: Write>(out: &mut W, code: &str, line: usize, message: &str) -> CliResult<()> {
    write_json(
        out,
        &json!({
            "status": "error",
            "code": code,
            "line": line,
            "message": message
        }),
    )
}

/// Write one JSON value followed by a newline
pub fn write_json<W: Write>(out: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}
