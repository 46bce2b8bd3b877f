use std::path::PathBuf;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    #[error("report data not found at {}: {detail}", .path.display())]
    #[diagnostic(
        code("report.not_found"),
        help("pass the report directory that contains the 'resources' folder")
    )]
    ReportNotFound { path: PathBuf, detail: String },
    #[error("malformed report data: {message}")]
    #[diagnostic(code("report.malformed"))]
    MalformedReport {
        message: String,
        #[source_code]
        src: String,
        #[label("here")]
        span: SourceSpan,
    },
    #[error("missing field '{field}' in {section}")]
    #[diagnostic(code("report.missing_field"))]
    MissingField { section: String, field: String },
    #[error("{resource} has zero capacity")]
    #[diagnostic(code("report.division_by_zero"))]
    DivisionByZero { resource: String },
    #[error("failed to write report: {0}")]
    #[diagnostic(code("report.output"))]
    Output(#[from] std::io::Error),
}

impl ReportError {
    pub(crate) fn not_found(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::ReportNotFound {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Malformed error without a useful location; the whole line is the source.
    pub(crate) fn malformed(message: impl Into<String>, line: &str) -> Self {
        Self::MalformedReport {
            message: message.into(),
            src: excerpt(line, 0).0,
            span: (0, 0).into(),
        }
    }

    pub(crate) fn missing(section: &str, field: impl Into<String>) -> Self {
        Self::MissingField {
            section: section.to_string(),
            field: field.into(),
        }
    }
}

pub(crate) fn json_decode_error(input: &str, err: &serde_json::Error) -> ReportError {
    let offset = line_col_to_offset(input, err.line(), err.column());
    let (src, offset) = excerpt(input, offset);
    ReportError::MalformedReport {
        message: err.to_string(),
        src,
        span: (offset, 0).into(),
    }
}

// Report payloads are single lines of several megabytes; keep the diagnostic
// source to a window around the failing offset.
const EXCERPT_RADIUS: usize = 120;

fn excerpt(input: &str, offset: usize) -> (String, usize) {
    let offset = offset.min(input.len());
    let mut start = offset.saturating_sub(EXCERPT_RADIUS);
    while !input.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (offset + EXCERPT_RADIUS).min(input.len());
    while !input.is_char_boundary(end) {
        end += 1;
    }
    (input[start..end].to_string(), offset - start)
}

fn line_col_to_offset(input: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut offset = 0usize;
    for (idx, segment) in input.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            let col = column.saturating_sub(1).min(segment.len());
            return offset + col;
        }
        offset += segment.len();
    }
    input.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_point_at_the_failing_column() {
        let input = r#"{"total": [1, 2,, 3]}"#;
        let err = serde_json::from_str::<serde_json::Value>(input).unwrap_err();
        match json_decode_error(input, &err) {
            ReportError::MalformedReport { src, span, .. } => {
                assert_eq!(src, input);
                assert_eq!(&src[span.offset()..span.offset() + 1], ",");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn excerpt_is_bounded_for_long_lines() {
        let input = format!("{}x{}", "a".repeat(1_000), "b".repeat(1_000));
        let (src, offset) = excerpt(&input, 1_000);
        assert_eq!(src.len(), EXCERPT_RADIUS * 2);
        assert_eq!(&src[offset..offset + 1], "x");
    }
}
