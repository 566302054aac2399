//! Complaint export parser with encoding auto-detection.
//!
//! Decodes the raw bytes, reads the comma-delimited rows with the `csv`
//! crate and normalizes each row into a [`ComplaintRecord`].

use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::{ComplaintRecord, Normalization, RowPolicy};

/// Header of the product column.
pub const PRODUCT_COLUMN: &str = "Product";
/// Header of the received-date column.
pub const DATE_RECEIVED_COLUMN: &str = "Date received";
/// Header of the company column.
pub const COMPANY_COLUMN: &str = "Company";

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Normalized records, in input order
    pub records: Vec<ComplaintRecord>,
    /// Detected encoding
    pub encoding: String,
    /// Column headers
    pub headers: Vec<String>,
    /// Rows dropped under [`RowPolicy::Skip`]
    pub skipped: usize,
}

/// Parsing knobs, see [`crate::transform::pipeline::ReportOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub normalization: Normalization,
    pub row_policy: RowPolicy,
}

/// Indexes of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequiredColumns {
    product: usize,
    date_received: usize,
    company: usize,
}

impl RequiredColumns {
    fn locate(headers: &[String]) -> CsvResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| CsvError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            product: find(PRODUCT_COLUMN)?,
            date_received: find(DATE_RECEIVED_COLUMN)?,
            company: find(COMPANY_COLUMN)?,
        })
    }
}

/// Below this chardet confidence a non-UTF-8 input is read as windows-1252.
const MIN_DETECTION_CONFIDENCE: f32 = 0.5;

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 is taken as is; anything else goes through chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let (charset, confidence, _) = chardet::detect(bytes);
    if confidence < MIN_DETECTION_CONFIDENCE {
        return "windows-1252".to_string();
    }

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the given encoding.
///
/// Invalid sequences become U+FFFD rather than failing the run.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        // WHATWG maps the latin-1 labels to windows-1252
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.into_owned(),
            // Unknown charset: best effort
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    }
}

/// Parse already-decoded CSV text into complaint records.
///
/// Returns the records, the header row and the number of skipped rows.
pub fn parse_str(
    content: &str,
    options: ParseOptions,
) -> CsvResult<(Vec<ComplaintRecord>, Vec<String>, usize)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    if headers.is_empty() {
        return Err(CsvError::EmptyInput);
    }
    let columns = RequiredColumns::locate(&headers)?;

    let mut records = Vec::new();
    let mut skipped = 0;

    for result in reader.records() {
        let row = result?;

        if row.len() != headers.len() {
            match options.row_policy {
                RowPolicy::Fail => {
                    return Err(CsvError::MalformedRow {
                        line: row.position().map_or(0, |p| p.line()),
                        expected: headers.len(),
                        found: row.len(),
                    });
                }
                RowPolicy::Skip => {
                    skipped += 1;
                    continue;
                }
            }
        }

        records.push(ComplaintRecord::from_raw(
            row.get(columns.product).unwrap_or_default(),
            row.get(columns.date_received).unwrap_or_default(),
            row.get(columns.company).unwrap_or_default(),
            options.normalization,
        ));
    }

    Ok((records, headers, skipped))
}

/// Parse CSV bytes with encoding auto-detection.
pub fn parse_bytes(bytes: &[u8], options: ParseOptions) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let (records, headers, skipped) = parse_str(&content, options)?;

    Ok(ParseResult {
        records,
        encoding,
        headers,
        skipped,
    })
}

/// Read and parse a complaint export from disk.
///
/// # Example
/// ```ignore
/// let result = parse_file("complaints.csv", ParseOptions::default())?;
/// println!("{} records ({})", result.records.len(), result.encoding);
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P, options: ParseOptions) -> CsvResult<ParseResult> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| CsvError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    parse_bytes(&bytes, options)
}
