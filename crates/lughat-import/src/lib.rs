pub mod csv_import;
pub mod error;
pub mod session;
pub mod template;

pub use csv_import::{ImportOutcome, parse_dictionary_csv};
pub use error::ImportError;
pub use session::{ImportSession, ImportTicket};
pub use template::{DICTIONARY_TEMPLATE, TEMPLATE_FILE_NAME};
