//! Extraction of JSON payloads embedded in generated `.js` report files.
//!
//! The report toolchain writes each payload as a single JavaScript statement,
//! `var <identifier>=<JSON literal>;`, one per line. Several statements share a
//! file, so payloads are located by identifier rather than by position.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{json_decode_error, ReportError, ReportResult};

const DECLARATION_KEYWORD: &str = "var";

/// A `var <identifier>=<literal>` statement split into its parts.
///
/// `literal` still carries the statement terminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assignment<'a> {
    pub identifier: &'a str,
    pub literal: &'a str,
}

/// Summary of one assignment found in a report file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableInfo {
    pub identifier: String,
    /// Zero-based line index.
    pub line: usize,
    pub literal_len: usize,
}

/// Splits a `var <identifier>=` line. Returns `None` for anything else.
pub fn parse_assignment(line: &str) -> Option<Assignment<'_>> {
    let line = line.trim_start_matches('\u{feff}').trim_start();
    let rest = line.strip_prefix(DECLARATION_KEYWORD)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let ident_len = identifier_len(rest);
    if ident_len == 0 {
        return None;
    }
    let (identifier, rest) = rest.split_at(ident_len);
    let literal = rest.trim_start().strip_prefix('=')?;
    if literal.starts_with('=') {
        return None;
    }
    Some(Assignment {
        identifier,
        literal,
    })
}

/// Strips the statement terminator, resolves JavaScript-only escapes and
/// decodes the literal as JSON.
pub fn decode_literal(raw: &str) -> ReportResult<Value> {
    let trimmed = raw.trim_end();
    let body = trimmed
        .strip_suffix(';')
        .ok_or_else(|| ReportError::malformed("statement is not terminated by ';'", raw))?;
    let normalized = normalize_escapes(body);
    serde_json::from_str(&normalized).map_err(|err| json_decode_error(&normalized, &err))
}

/// Finds the assignment to `identifier` in `path` and decodes its payload.
pub fn extract_variable(path: &Path, identifier: &str) -> ReportResult<Value> {
    let mut misframed = None;
    for (index, line) in read_lines(path)?.enumerate() {
        let line = line.map_err(|err| read_error(path, err))?;
        if let Some(assignment) = parse_assignment(&line) {
            if assignment.identifier == identifier {
                debug!(
                    path = %path.display(),
                    identifier,
                    line = index,
                    bytes = assignment.literal.len(),
                    "decoding assignment"
                );
                return decode_literal(assignment.literal);
            }
            continue;
        }
        if misframed.is_none() && names_assignment_target(&line, identifier) {
            misframed = Some(line);
        }
    }
    match misframed {
        Some(line) => Err(ReportError::malformed(
            format!("'{identifier}' is assigned without a 'var {identifier}=' declaration"),
            &line,
        )),
        None => Err(ReportError::not_found(
            path,
            format!("no 'var {identifier}=' assignment"),
        )),
    }
}

/// Reads the zero-based line `line_offset` of `path`, which must start with
/// exactly `prefix` (for example `var areaJSON=`), and decodes the rest.
pub fn extract_line(path: &Path, prefix: &str, line_offset: usize) -> ReportResult<Value> {
    let line = read_lines(path)?
        .nth(line_offset)
        .ok_or_else(|| ReportError::not_found(path, format!("line {line_offset} does not exist")))?
        .map_err(|err| read_error(path, err))?;
    let literal = line
        .trim_start_matches('\u{feff}')
        .strip_prefix(prefix)
        .ok_or_else(|| {
            ReportError::malformed(format!("line {line_offset} does not start with '{prefix}'"), &line)
        })?;
    debug!(path = %path.display(), prefix, line = line_offset, "decoding positional assignment");
    decode_literal(literal)
}

/// Lists every assignment in `path`.
pub fn list_variables(path: &Path) -> ReportResult<Vec<VariableInfo>> {
    let mut variables = Vec::new();
    for (index, line) in read_lines(path)?.enumerate() {
        let line = line.map_err(|err| read_error(path, err))?;
        if let Some(assignment) = parse_assignment(&line) {
            variables.push(VariableInfo {
                identifier: assignment.identifier.to_string(),
                line: index,
                literal_len: assignment.literal.trim_end().len(),
            });
        }
    }
    Ok(variables)
}

/// Formats `value` the way the toolchain writes it, newline included.
pub fn to_assignment_line(identifier: &str, value: &Value) -> String {
    format!("{DECLARATION_KEYWORD} {identifier}={value};\n")
}

fn read_lines(path: &Path) -> ReportResult<io::Lines<BufReader<File>>> {
    let file = File::open(path).map_err(|err| ReportError::not_found(path, err.to_string()))?;
    Ok(BufReader::new(file).lines())
}

fn read_error(path: &Path, err: io::Error) -> ReportError {
    match err.kind() {
        io::ErrorKind::InvalidData => ReportError::MalformedReport {
            message: format!("{} is not valid UTF-8", path.display()),
            src: String::new(),
            span: (0, 0).into(),
        },
        _ => ReportError::not_found(path, err.to_string()),
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn identifier_len(input: &str) -> usize {
    let mut chars = input.char_indices();
    match chars.next() {
        Some((_, c)) if is_identifier_start(c) => {}
        _ => return 0,
    }
    chars
        .find(|(_, c)| !is_identifier_continue(*c))
        .map_or(input.len(), |(idx, _)| idx)
}

/// True when the text before the first `=` ends with `identifier`, e.g.
/// `areaJSON={...}` or `let areaJSON = {...}`.
fn names_assignment_target(line: &str, identifier: &str) -> bool {
    let Some((head, _)) = line.split_once('=') else {
        return false;
    };
    let head = head.trim_end();
    let Some(before) = head.strip_suffix(identifier) else {
        return false;
    };
    !before.ends_with(is_identifier_continue)
}

/// Rewrites escapes that JavaScript accepts but JSON does not.
///
/// Only string contents are touched: `\xNN` becomes `\u00NN`, `\'` becomes
/// `'`, `\v` and `\0` become their `\u` forms.
fn normalize_escapes(input: &str) -> Cow<'_, str> {
    if !input.contains('\\') {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 16);
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    while let Some(c) = chars.next() {
        if !in_string {
            if c == '"' {
                in_string = true;
            }
            out.push(c);
            continue;
        }
        match c {
            '"' => {
                in_string = false;
                out.push(c);
            }
            '\\' => match chars.next() {
                Some('x') => {
                    let hex: String = chars.by_ref().take(2).collect();
                    out.push_str("\\u00");
                    out.push_str(&hex);
                }
                Some('\'') => out.push('\''),
                Some('v') => out.push_str("\\u000b"),
                Some('0') if !chars.peek().is_some_and(char::is_ascii_digit) => {
                    out.push_str("\\u0000")
                }
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod tests;
