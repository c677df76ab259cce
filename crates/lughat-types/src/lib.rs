pub mod language;
pub mod lenient;
pub mod types;

pub use language::{DictionaryEntry, Family, Geography, Language, Region, Status, non_empty};
pub use types::{Caller, ImportStatus, Notice};
