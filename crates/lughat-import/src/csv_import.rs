//! Bulk dictionary import from comma separated text.

use csv::{ReaderBuilder, StringRecord, Trim};
use lughat_types::DictionaryEntry;

use crate::error::ImportError;

const REQUIRED_COLUMNS: [&str; 2] = ["word", "meaning"];

/// Entries read from one file
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub entries: Vec<DictionaryEntry>,
    /// Rows dropped for lacking a word or a meaning
    pub dropped: usize,
}

impl ImportOutcome {
    pub fn accepted(&self) -> usize {
        self.entries.len()
    }
}

/// Positions of the known columns in the header row
#[derive(Debug, Default)]
struct Columns {
    word: Option<usize>,
    meaning: Option<usize>,
    pronunciation: Option<usize>,
    region: Option<usize>,
    example: Option<usize>,
    dialects: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, ImportError> {
        let names: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &str| names.iter().position(|n| n == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| find(col).is_none())
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        Ok(Self {
            word: find("word"),
            meaning: find("meaning"),
            pronunciation: find("pronunciation"),
            region: find("region"),
            example: find("example"),
            dialects: find("dialects"),
        })
    }
}

fn cell(record: &StringRecord, column: Option<usize>) -> &str {
    column.and_then(|i| record.get(i)).unwrap_or("").trim()
}

fn optional_cell(record: &StringRecord, column: Option<usize>) -> Option<String> {
    Some(cell(record, column))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Split a dialect cell on commas; an empty result keeps one blank slot
fn split_dialects(raw: &str) -> Vec<String> {
    let dialects: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect();

    if dialects.is_empty() {
        vec![String::new()]
    } else {
        dialects
    }
}

fn to_entry(record: &StringRecord, columns: &Columns) -> DictionaryEntry {
    DictionaryEntry {
        word: cell(record, columns.word).to_string(),
        meaning: cell(record, columns.meaning).to_string(),
        pronunciation: optional_cell(record, columns.pronunciation),
        region: optional_cell(record, columns.region),
        example: optional_cell(record, columns.example),
        dialects: split_dialects(cell(record, columns.dialects)),
    }
}

/// Line of a quoted field that is still open at end of input.
///
/// Follows the reader's quoting rules: a quote opens a field only at its
/// start, and `""` inside a quoted field is an escaped quote.
fn unterminated_quote(content: &str) -> Option<usize> {
    let mut line = 1;
    let mut opened_at = None;
    let mut field_start = true;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
        }
        match opened_at {
            Some(_) if c == '"' => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                } else {
                    opened_at = None;
                }
            }
            Some(_) => {}
            None => match c {
                '"' if field_start => {
                    opened_at = Some(line);
                    field_start = false;
                }
                ',' | '\n' | '\r' => field_start = true,
                _ => field_start = false,
            },
        }
    }
    opened_at
}

/// Parse CSV text with a header row into dictionary entries.
///
/// Header names are matched case-insensitively after trimming; `word` and
/// `meaning` are required. Rows may be shorter or longer than the header.
/// Blank lines are skipped and rows missing a word or a meaning are dropped.
pub fn parse_dictionary_csv(content: &str) -> Result<ImportOutcome, ImportError> {
    let content = content.trim_start_matches('\u{feff}');
    if let Some(line) = unterminated_quote(content) {
        return Err(ImportError::Parse(format!("Quoted field unterminated (line {line})")));
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ImportError::Parse(e.to_string()))?
        .clone();
    let columns = Columns::from_headers(&headers)?;

    let mut entries = Vec::new();
    let mut dropped = 0;
    for record in reader.records() {
        let record = record.map_err(|e| ImportError::Parse(e.to_string()))?;
        let entry = to_entry(&record, &columns);
        if entry.is_valid() {
            entries.push(entry);
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        tracing::warn!("Dropped {} CSV rows without word or meaning", dropped);
    }
    if entries.is_empty() {
        return Err(ImportError::NoValidEntries);
    }

    tracing::debug!("Parsed {} dictionary entries from CSV", entries.len());
    Ok(ImportOutcome { entries, dropped })
}
