use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::record::{AlignmentRecord, BlastHits, BLAST_COLUMNS};

/// Number of tab-separated fields in a tabular BLAST line.
pub const BLAST_FIELD_COUNT: usize = 12;

/// Tokens read as a missing value, the usual NA spellings of tabular tools.
const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: line {line} has {found} fields, expected {BLAST_FIELD_COUNT} tab-separated columns", source_name(.path.as_deref()))]
    FieldCount {
        path: Option<PathBuf>,
        line: usize,
        found: usize,
    },

    #[error("{}: line {line}: invalid {column} value '{value}'", source_name(.path.as_deref()))]
    InvalidValue {
        path: Option<PathBuf>,
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("{}: no alignment records found", source_name(.path.as_deref()))]
    Empty { path: Option<PathBuf> },
}

fn source_name(path: Option<&Path>) -> String {
    path.map_or_else(|| "<input>".to_string(), |p| p.display().to_string())
}

impl ParseError {
    fn with_path(self, p: &Path) -> Self {
        let p = Some(p.to_path_buf());
        match self {
            Self::FieldCount { line, found, .. } => Self::FieldCount { path: p, line, found },
            Self::InvalidValue {
                line,
                column,
                value,
                ..
            } => Self::InvalidValue {
                path: p,
                line,
                column,
                value,
            },
            Self::Empty { .. } => Self::Empty { path: p },
            io @ Self::Io { .. } => io,
        }
    }
}

/// Parse a tabular BLAST file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or the errors of
/// [`parse_blast_text`] tagged with the file path.
pub fn parse_blast_file(path: &Path) -> Result<BlastHits, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let hits = parse_blast_text(&content).map_err(|e| e.with_path(path))?;
    debug!(
        "Loaded {} alignment records from {}",
        hits.len(),
        path.display()
    );
    Ok(hits.with_source(path))
}

/// Parse tabular BLAST text with twelve tab-separated columns per line.
///
/// Blank lines and `#` comment lines are skipped.
///
/// # Errors
///
/// Returns `ParseError::FieldCount` if a line does not have exactly twelve
/// fields, `ParseError::InvalidValue` if a summarized float column
/// (`pident`, `evalue`, `bitscore`) does not parse, or `ParseError::Empty`
/// if no records are found. Unparseable integer columns become `None`.
pub fn parse_blast_text(text: &str) -> Result<BlastHits, ParseError> {
    let mut records = Vec::new();
    let mut comments = 0usize;

    for (i, line) in text.lines().enumerate() {
        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with('#') {
            comments += 1;
            continue;
        }

        records.push(parse_record(line, line_num)?);
    }

    if comments > 0 {
        debug!("Skipped {comments} comment lines");
    }

    if records.is_empty() {
        return Err(ParseError::Empty { path: None });
    }

    Ok(BlastHits::new(records))
}

fn parse_record(line: &str, line_num: usize) -> Result<AlignmentRecord, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != BLAST_FIELD_COUNT {
        return Err(ParseError::FieldCount {
            path: None,
            line: line_num,
            found: fields.len(),
        });
    }

    let int = |idx: usize| parse_int(fields[idx]);
    let float = |idx: usize| parse_float(fields[idx], idx, line_num);

    Ok(AlignmentRecord {
        query_id: fields[0].to_string(),
        subject_id: fields[1].to_string(),
        percent_identity: float(2)?,
        alignment_length: int(3),
        mismatches: int(4),
        gap_openings: int(5),
        query_start: int(6),
        query_end: int(7),
        subject_start: int(8),
        subject_end: int(9),
        evalue: float(10)?,
        bit_score: float(11)?,
    })
}

fn parse_int(field: &str) -> Option<u64> {
    field.trim().parse().ok()
}

fn parse_float(field: &str, column: usize, line_num: usize) -> Result<f64, ParseError> {
    let field_trimmed = field.trim();
    if MISSING_MARKERS.contains(&field_trimmed) {
        return Ok(f64::NAN);
    }
    field_trimmed
        .parse()
        .map_err(|_| invalid_value(field, column, line_num))
}

fn invalid_value(field: &str, column: usize, line_num: usize) -> ParseError {
    ParseError::InvalidValue {
        path: None,
        line: line_num,
        column: BLAST_COLUMNS[column],
        value: field.to_string(),
    }
}
