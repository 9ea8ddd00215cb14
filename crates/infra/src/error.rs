use stockledger_inventory::InventoryError;
use thiserror::Error;

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Failure while writing or reading an inventory file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Header mismatch, wrong field count, or an unparsable CSV value.
    #[error("invalid CSV: {0}")]
    CsvFormat(String),

    #[error("failed to generate XML: {0}")]
    XmlGeneration(String),

    /// Malformed document, missing tag, or an unparsable XML value.
    #[error("failed to load XML: {0}")]
    XmlLoad(String),

    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    /// A loaded record broke an article rule (e.g. a negative quantity).
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl From<csv::Error> for PersistenceError {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => Self::Io(io),
            other => Self::CsvFormat(format!("{other:?}")),
        }
    }
}
