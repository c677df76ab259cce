/// Import failures; the display text is what the form shows
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("Please upload a CSV file")]
    NotCsv,

    #[error("CSV file is too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },

    #[error("Error reading CSV: {0}")]
    Read(String),

    #[error("CSV parsing errors: {0}")]
    Parse(String),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("No valid entries found in CSV. Ensure word and meaning columns are filled.")]
    NoValidEntries,
}
