//! The menu loop.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use stockledger_core::{ArticleCode, DomainError};
use stockledger_infra::Format;
use stockledger_inventory::{ArticleDraft, Inventory};
use tracing::warn;

use crate::console::{Console, ConsoleError};
use crate::menu::{Action, Menu};

const MENU: Menu = Menu::new("Warehouse", &Action::ALL);
const DONE: &str = "Operation completed";

/// Run the menu until the user exits or input ends.
///
/// Domain and file errors are reported on the console and the loop goes on;
/// only console I/O failures end the session with an error.
pub fn run<R: BufRead, W: Write>(
    inventory: &mut Inventory,
    console: &mut Console<R, W>,
) -> Result<(), ConsoleError> {
    loop {
        let outcome = MENU
            .choose(console)
            .and_then(|action| perform(action, inventory, console));
        match outcome {
            Ok(Some(message)) => console.say(message)?,
            Ok(None) => return Ok(()),
            Err(ConsoleError::EndOfInput) => return Ok(()),
            Err(ConsoleError::Io(e)) => return Err(ConsoleError::Io(e)),
            Err(e) => {
                warn!(error = %e, "command rejected");
                console.say(describe(e))?;
            }
        }
    }
}

/// User-facing text for a rejected command. Inventory rule violations are
/// prefixed with their category.
fn describe(error: ConsoleError) -> String {
    match error {
        ConsoleError::Inventory(e) => DomainError::from(e).to_string(),
        other => other.to_string(),
    }
}

/// Carry out one action. `Ok(None)` means the session should end.
fn perform<R: BufRead, W: Write>(
    action: Action,
    inventory: &mut Inventory,
    console: &mut Console<R, W>,
) -> Result<Option<String>, ConsoleError> {
    let message = match action {
        Action::Register => {
            let purchase_price = console.ask("Purchase price: ")?;
            let sale_price = console.ask("Sale price: ")?;
            let description = console.ask_text("Description: ")?;
            let quantity = console.ask("Quantity: ")?;
            let safety_stock = console.ask("Safety stock: ")?;
            let max_stock = console.ask("Max stock: ")?;
            let code = inventory.register(ArticleDraft::new(
                purchase_price,
                sale_price,
                description,
                quantity,
                safety_stock,
                max_stock,
            ))?;
            format!("{DONE} (code {code})")
        }
        Action::Increment => {
            let amount = console.ask("Amount: ")?;
            let code = ask_code(console)?;
            inventory.increment_quantity(code, amount)?;
            DONE.to_string()
        }
        Action::Decrement => {
            let amount = console.ask("Amount: ")?;
            let code = ask_code(console)?;
            inventory.decrement_quantity(code, amount)?;
            DONE.to_string()
        }
        Action::Show => {
            let code = ask_code(console)?;
            inventory.find(code)?.to_string()
        }
        Action::List => inventory.render(),
        Action::Remove => {
            let code = ask_code(console)?;
            inventory.remove(code)?.to_string()
        }
        Action::ExportCsv => export(Format::Csv, inventory, console)?,
        Action::ImportCsv => import(Format::Csv, inventory, console)?,
        Action::ExportXml => export(Format::Xml, inventory, console)?,
        Action::ImportXml => import(Format::Xml, inventory, console)?,
        Action::Exit => {
            console.say("Goodbye")?;
            return Ok(None);
        }
    };
    Ok(Some(message))
}

fn ask_code<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<ArticleCode, ConsoleError> {
    console.ask("Article code: ")
}

fn ask_path<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<PathBuf, ConsoleError> {
    Ok(PathBuf::from(console.ask_text("File name: ")?.trim()))
}

fn export<R: BufRead, W: Write>(
    format: Format,
    inventory: &Inventory,
    console: &mut Console<R, W>,
) -> Result<String, ConsoleError> {
    console.say("This option overwrites the file if it already exists")?;
    let path = ask_path(console)?;
    format.codec().export(inventory, &path)?;
    Ok(format!("{format} saved to {}", path.display()))
}

fn import<R: BufRead, W: Write>(
    format: Format,
    inventory: &mut Inventory,
    console: &mut Console<R, W>,
) -> Result<String, ConsoleError> {
    let path = ask_path(console)?;
    let codes = format.codec().import(inventory, &path)?;
    Ok(format!(
        "{format} imported from {} ({} articles)",
        path.display(),
        codes.len()
    ))
}
