//! Infrastructure layer: file persistence for the inventory.
//!
//! Two codecs share the [`InventoryCodec`] seam: CSV (fixed header, quoted
//! fields) and XML (fixed tag schema). Both write the current inventory
//! snapshot and import by staging every record before committing any.

pub mod codec;
pub mod csv_codec;
pub mod error;
pub mod xml_codec;

pub use codec::{Format, InventoryCodec};
pub use csv_codec::{CSV_HEADER, CsvCodec};
pub use error::{PersistenceError, PersistenceResult};
pub use xml_codec::XmlCodec;
