//! Encoding/format probing for raw upload bytes.
//!
//! CSV exports from the booking and accounting tools arrive in a mix
//! of UTF-8 (with or without BOM), Shift-JIS/CP932, EUC-JP and
//! ISO-2022-JP, with comma, tab or semicolon delimiters. The prober
//! tries each combination in a fixed order and stops at the first one
//! that yields a table with more than one column. A one-column parse
//! is a delimiter-detection failure, not a success.

use encoding_rs::{EUC_JP, Encoding, ISO_2022_JP, SHIFT_JIS, UTF_8};

use crate::error::{IngestError, ProbeAttempt, Result};

/// Encodings tried, in priority order.
const ENCODINGS: [&Encoding; 4] = [UTF_8, SHIFT_JIS, EUC_JP, ISO_2022_JP];

/// Delimiters tried per encoding, in priority order.
const DELIMITERS: [u8; 3] = [b',', b'\t', b';'];

/// A decoded, delimiter-split table before any column inference.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Name of the winning encoding (e.g. `"UTF-8"`, `"Shift_JIS"`).
    pub encoding: &'static str,
    /// The winning delimiter.
    pub delimiter: char,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// All values of one column, padded with `""` for short rows.
    #[must_use]
    pub fn column_values(&self, index: usize) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.get(index).map(String::as_str).unwrap_or(""))
            .collect()
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn first_raw_line(bytes: &[u8]) -> String {
    let line = bytes.split(|&b| b == b'\n').next().unwrap_or(&[]);
    String::from_utf8_lossy(line).trim_end_matches('\r').to_string()
}

fn parse_with(text: &str, delimiter: u8) -> std::result::Result<RawTableShape, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| format!("csv parse error: {e}"))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        rows.push(row);
    }
    if rows.is_empty() {
        return Err("no rows".to_string());
    }
    let headers = rows.remove(0);
    if headers.len() <= 1 {
        return Err("single column; wrong delimiter".to_string());
    }
    if headers.iter().all(String::is_empty) {
        return Err("empty header row".to_string());
    }
    Ok(RawTableShape { headers, rows })
}

struct RawTableShape {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Probes upload bytes for a decodable, delimited table.
///
/// Returns the first successful combination, or
/// [`IngestError::Unparsable`] listing every attempted combination and
/// its failure reason, plus the first raw line for diagnostics.
pub fn probe_table(bytes: &[u8]) -> Result<RawTable> {
    if bytes.is_empty() {
        return Err(IngestError::EmptyUpload);
    }
    let mut attempts = Vec::new();
    for encoding in ENCODINGS {
        // `decode` strips a recognized BOM and falls back to the given
        // encoding otherwise.
        let (text, used, had_errors) = encoding.decode(bytes);
        if had_errors {
            attempts.push(ProbeAttempt {
                encoding: encoding.name(),
                delimiter: '-',
                reason: "decode produced replacement characters".to_string(),
            });
            continue;
        }
        for delimiter in DELIMITERS {
            match parse_with(&text, delimiter) {
                Ok(shape) => {
                    tracing::debug!(
                        encoding = used.name(),
                        delimiter = %(delimiter as char),
                        columns = shape.headers.len(),
                        rows = shape.rows.len(),
                        "probe succeeded"
                    );
                    return Ok(RawTable {
                        encoding: used.name(),
                        delimiter: delimiter as char,
                        headers: shape.headers,
                        rows: shape.rows,
                    });
                }
                Err(reason) => attempts.push(ProbeAttempt {
                    encoding: encoding.name(),
                    delimiter: delimiter as char,
                    reason,
                }),
            }
        }
    }
    Err(IngestError::Unparsable {
        attempts,
        first_line: first_raw_line(bytes),
    })
}
