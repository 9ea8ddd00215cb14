//! CSV persistence.
//!
//! Layout: the fixed [`CSV_HEADER`] line, then one line per article with every
//! field double-quoted, in the order description, purchase price, sale price,
//! quantity, max stock, safety stock.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use stockledger_core::ArticleCode;
use stockledger_inventory::{Article, ArticleDraft, Inventory};
use tracing::info;

use crate::codec::InventoryCodec;
use crate::error::{PersistenceError, PersistenceResult};

pub const CSV_HEADER: &str =
    "Descripcion,Precio compra,Precio venta,Numero unidades,Stock maximo,Stock seguridad";

/// Data lines are split on a closing quote followed by a comma.
const FIELD_SEPARATOR: &str = "\",";

/// On-disk column order. Differs from [`ArticleDraft::new`]'s argument order.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    description: &'a str,
    purchase_price: f64,
    sale_price: f64,
    quantity: i64,
    max_stock: i64,
    safety_stock: i64,
}

impl<'a> From<&'a Article> for CsvRow<'a> {
    fn from(article: &'a Article) -> Self {
        Self {
            description: article.description(),
            purchase_price: article.purchase_price(),
            sale_price: article.sale_price(),
            quantity: article.quantity(),
            max_stock: article.max_stock(),
            safety_stock: article.safety_stock(),
        }
    }
}

/// Line-based CSV codec.
///
/// Records are read one line at a time and quotes are stripped, so a
/// description holding a newline or a `"` does not survive a round trip: a
/// newline splits the record and the load fails, a quote is dropped.
#[derive(Debug, Default, Copy, Clone)]
pub struct CsvCodec;

impl InventoryCodec for CsvCodec {
    fn export(&self, inventory: &Inventory, path: &Path) -> PersistenceResult<()> {
        let mut out = BufWriter::new(File::create(path)?);
        writeln!(out, "{CSV_HEADER}")?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(out);
        for article in inventory.iter() {
            writer.serialize(CsvRow::from(article))?;
        }
        writer.flush()?;

        info!(path = %path.display(), articles = inventory.len(), "inventory exported to CSV");
        Ok(())
    }

    fn import(&self, inventory: &mut Inventory, path: &Path) -> PersistenceResult<Vec<ArticleCode>> {
        let drafts = read_drafts(BufReader::new(File::open(path)?))?;
        let codes = inventory.register_batch(drafts)?;

        info!(path = %path.display(), articles = codes.len(), "inventory imported from CSV");
        Ok(codes)
    }
}

/// Parse a whole CSV document into drafts without touching any inventory.
pub fn read_drafts<R: BufRead>(reader: R) -> PersistenceResult<Vec<ArticleDraft>> {
    let mut lines = reader.lines();

    let header = lines
        .next()
        .transpose()?
        .ok_or_else(|| PersistenceError::CsvFormat("missing header line".to_string()))?;
    if !header.trim().eq_ignore_ascii_case(CSV_HEADER) {
        return Err(PersistenceError::CsvFormat(format!(
            "unexpected header {:?}",
            header.trim()
        )));
    }

    let expected = CSV_HEADER.split(',').count();
    lines
        .enumerate()
        .map(|(idx, line)| parse_line(&line?, idx + 2, expected))
        .collect()
}

fn parse_line(line: &str, line_no: usize, expected: usize) -> PersistenceResult<ArticleDraft> {
    let mut fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    // Trailing empty fields do not count.
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    if fields.len() != expected {
        return Err(PersistenceError::CsvFormat(format!(
            "line {line_no}: expected {expected} fields, found {}: {line}",
            fields.len()
        )));
    }

    let values: Vec<String> = fields.iter().map(|f| f.replace('"', "")).collect();
    Ok(ArticleDraft {
        description: values[0].clone(),
        purchase_price: parse_field(&values[1], "purchase price", line_no)?,
        sale_price: parse_field(&values[2], "sale price", line_no)?,
        quantity: parse_field(&values[3], "quantity", line_no)?,
        max_stock: parse_field(&values[4], "max stock", line_no)?,
        safety_stock: parse_field(&values[5], "safety stock", line_no)?,
    })
}

fn parse_field<T>(raw: &str, name: &str, line_no: usize) -> PersistenceResult<T>
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    raw.trim().parse().map_err(|e| {
        PersistenceError::CsvFormat(format!("line {line_no}: invalid {name} {raw:?}: {e}"))
    })
}
