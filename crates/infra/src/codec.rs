//! Codec seam shared by the file formats.

use std::path::Path;

use stockledger_core::ArticleCode;
use stockledger_inventory::Inventory;

use crate::csv_codec::CsvCodec;
use crate::error::PersistenceResult;
use crate::xml_codec::XmlCodec;

/// A file format the inventory can be saved to and loaded from.
///
/// Implementations must:
/// - truncate/create the target on export and write articles in listing order
/// - on import, parse the whole file before touching the inventory, then
///   commit every record or none (each record gets a fresh code)
pub trait InventoryCodec {
    fn export(&self, inventory: &Inventory, path: &Path) -> PersistenceResult<()>;

    /// Load `path` into `inventory`, returning the codes assigned to the new articles.
    fn import(&self, inventory: &mut Inventory, path: &Path) -> PersistenceResult<Vec<ArticleCode>>;
}

/// Supported file formats.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    Csv,
    Xml,
}

impl Format {
    /// Guess the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if ext.eq_ignore_ascii_case("xml") {
            Some(Self::Xml)
        } else {
            None
        }
    }

    pub fn codec(self) -> &'static dyn InventoryCodec {
        match self {
            Format::Csv => &CsvCodec,
            Format::Xml => &XmlCodec,
        }
    }
}

impl core::fmt::Display for Format {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Format::Csv => f.write_str("CSV"),
            Format::Xml => f.write_str("XML"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("stock.csv")), Some(Format::Csv));
        assert_eq!(Format::from_path(Path::new("STOCK.XML")), Some(Format::Xml));
        assert_eq!(Format::from_path(Path::new("stock.json")), None);
        assert_eq!(Format::from_path(Path::new("stock")), None);
    }
}
