//! XML persistence.
//!
//! ```xml
//! <Almacen>
//!   <Articulo>
//!     <Descripcion>Widget</Descripcion>
//!     <PrecioCompra>10</PrecioCompra>
//!     <PrecioVenta>15</PrecioVenta>
//!     <NumeroUnidades>5</NumeroUnidades>
//!     <StockMaximo>20</StockMaximo>
//!     <StockSeguridad>2</StockSeguridad>
//!   </Articulo>
//! </Almacen>
//! ```

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Serialize;
use stockledger_core::ArticleCode;
use stockledger_inventory::{Article, ArticleDraft, Inventory};
use tracing::info;

use crate::codec::InventoryCodec;
use crate::error::{PersistenceError, PersistenceResult};

const XML_ROOT: &str = "Almacen";
const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const ARTICLE_TAG: &[u8] = b"Articulo";

/// Child tags of `Articulo`, indexed by [`Field`].
const FIELD_TAGS: [&str; 6] = [
    "Descripcion",
    "PrecioCompra",
    "PrecioVenta",
    "NumeroUnidades",
    "StockMaximo",
    "StockSeguridad",
];

#[derive(Debug, Copy, Clone)]
enum Field {
    Description = 0,
    PurchasePrice = 1,
    SalePrice = 2,
    Quantity = 3,
    MaxStock = 4,
    SafetyStock = 5,
}

#[derive(Debug, Default, Serialize)]
struct WarehouseDocument {
    #[serde(rename = "Articulo")]
    articles: Vec<ArticleElement>,
}

/// Child tags in schema order; serialization follows field order.
#[derive(Debug, Serialize)]
struct ArticleElement {
    #[serde(rename = "Descripcion")]
    description: String,
    #[serde(rename = "PrecioCompra")]
    purchase_price: f64,
    #[serde(rename = "PrecioVenta")]
    sale_price: f64,
    #[serde(rename = "NumeroUnidades")]
    quantity: i64,
    #[serde(rename = "StockMaximo")]
    max_stock: i64,
    #[serde(rename = "StockSeguridad")]
    safety_stock: i64,
}

impl From<&Article> for ArticleElement {
    fn from(article: &Article) -> Self {
        Self {
            description: article.description().to_string(),
            purchase_price: article.purchase_price(),
            sale_price: article.sale_price(),
            quantity: article.quantity(),
            max_stock: article.max_stock(),
            safety_stock: article.safety_stock(),
        }
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct XmlCodec;

impl InventoryCodec for XmlCodec {
    fn export(&self, inventory: &Inventory, path: &Path) -> PersistenceResult<()> {
        let document = WarehouseDocument {
            articles: inventory.iter().map(ArticleElement::from).collect(),
        };
        let body = render_document(&document)?;
        fs::write(path, body)?;

        info!(path = %path.display(), articles = inventory.len(), "inventory exported to XML");
        Ok(())
    }

    fn import(&self, inventory: &mut Inventory, path: &Path) -> PersistenceResult<Vec<ArticleCode>> {
        let text = fs::read_to_string(path)?;
        let drafts = read_drafts(&text)?;
        let codes = inventory.register_batch(drafts)?;

        info!(path = %path.display(), articles = codes.len(), "inventory imported from XML");
        Ok(codes)
    }
}

fn render_document(document: &WarehouseDocument) -> PersistenceResult<String> {
    let mut body = String::from(XML_DECLARATION);
    body.push('\n');

    let mut serializer = quick_xml::se::Serializer::with_root(&mut body, Some(XML_ROOT))
        .map_err(|e| PersistenceError::XmlGeneration(e.to_string()))?;
    serializer.indent(' ', 2);
    document
        .serialize(serializer)
        .map_err(|e| PersistenceError::XmlGeneration(e.to_string()))?;

    body.push('\n');
    Ok(body)
}

/// Parse an XML document into drafts, in document order, without touching
/// any inventory.
///
/// Each `Articulo` takes the first occurrence of every child tag, with all
/// nested text concatenated. Text is kept verbatim: descriptions are not
/// trimmed, numbers are.
pub fn read_drafts(text: &str) -> PersistenceResult<Vec<ArticleDraft>> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(false);

    let mut drafts = Vec::new();
    let mut depth = 0usize;
    // Depth of the open `Articulo`, and the child values collected so far.
    let mut article: Option<usize> = None;
    let mut values: [Option<String>; 6] = Default::default();
    // Field being captured and the depth of its element.
    let mut capture: Option<(usize, usize)> = None;
    let mut text_buf = String::new();
    let mut root_seen = false;

    loop {
        match reader.read_event().map_err(load_error)? {
            Event::Start(e) => {
                let name = e.name();
                if depth == 0 {
                    check_root(name.as_ref())?;
                    root_seen = true;
                }
                depth += 1;
                match article {
                    None if name.as_ref() == ARTICLE_TAG => {
                        article = Some(depth);
                        values = Default::default();
                    }
                    Some(_) if capture.is_none() => {
                        if let Some(idx) = field_index(name.as_ref()) {
                            if values[idx].is_none() {
                                capture = Some((idx, depth));
                                text_buf.clear();
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => {
                let name = e.name();
                if depth == 0 {
                    check_root(name.as_ref())?;
                    root_seen = true;
                }
                match article {
                    None if name.as_ref() == ARTICLE_TAG => {
                        drafts.push(build_draft(Default::default(), drafts.len() + 1)?);
                    }
                    Some(_) if capture.is_none() => {
                        if let Some(idx) = field_index(name.as_ref()) {
                            if values[idx].is_none() {
                                values[idx] = Some(String::new());
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(e) => {
                if capture.is_some() {
                    text_buf.push_str(&e.unescape().map_err(load_error)?);
                }
            }
            Event::CData(e) => {
                if capture.is_some() {
                    text_buf.push_str(std::str::from_utf8(&e).map_err(load_error)?);
                }
            }
            Event::End(_) => {
                if let Some((idx, field_depth)) = capture {
                    if field_depth == depth {
                        values[idx] = Some(std::mem::take(&mut text_buf));
                        capture = None;
                    }
                }
                if article == Some(depth) {
                    let collected = std::mem::take(&mut values);
                    drafts.push(build_draft(collected, drafts.len() + 1)?);
                    article = None;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(PersistenceError::XmlLoad(
            "unexpected end of document".to_string(),
        ));
    }
    if !root_seen {
        return Err(PersistenceError::XmlLoad(format!("missing <{XML_ROOT}> root")));
    }
    Ok(drafts)
}

fn field_index(name: &[u8]) -> Option<usize> {
    FIELD_TAGS.iter().position(|tag| tag.as_bytes() == name)
}

fn build_draft(values: [Option<String>; 6], position: usize) -> PersistenceResult<ArticleDraft> {
    Ok(ArticleDraft {
        description: text_of(&values, Field::Description, position)?.to_string(),
        purchase_price: parse_number(&values, Field::PurchasePrice, position)?,
        sale_price: parse_number(&values, Field::SalePrice, position)?,
        quantity: parse_number(&values, Field::Quantity, position)?,
        max_stock: parse_number(&values, Field::MaxStock, position)?,
        safety_stock: parse_number(&values, Field::SafetyStock, position)?,
    })
}

fn text_of<'a>(
    values: &'a [Option<String>; 6],
    field: Field,
    position: usize,
) -> PersistenceResult<&'a str> {
    values[field as usize].as_deref().ok_or_else(|| {
        let tag = FIELD_TAGS[field as usize];
        PersistenceError::XmlLoad(format!("Articulo #{position}: missing <{tag}>"))
    })
}

fn parse_number<T>(values: &[Option<String>; 6], field: Field, position: usize) -> PersistenceResult<T>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    let raw = text_of(values, field, position)?.trim();
    raw.parse().map_err(|e| {
        let tag = FIELD_TAGS[field as usize];
        PersistenceError::XmlLoad(format!("Articulo #{position}: invalid <{tag}> {raw:?}: {e}"))
    })
}

fn check_root(name: &[u8]) -> PersistenceResult<()> {
    if name == XML_ROOT.as_bytes() {
        Ok(())
    } else {
        Err(PersistenceError::XmlLoad(format!(
            "expected <{XML_ROOT}> root, found <{}>",
            String::from_utf8_lossy(name)
        )))
    }
}

fn load_error(err: impl core::fmt::Display) -> PersistenceError {
    PersistenceError::XmlLoad(err.to_string())
}
