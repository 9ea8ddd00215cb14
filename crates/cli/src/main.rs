use std::io;

use anyhow::Context;
use stockledger_cli::{Cli, Console};
use stockledger_infra::Format;
use stockledger_inventory::Inventory;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    stockledger_observability::init(cli.log_format);

    let mut inventory = Inventory::new();
    for path in &cli.imports {
        let format = Format::from_path(path).with_context(|| {
            format!("cannot tell the format of {} (expected .csv or .xml)", path.display())
        })?;
        let codes = format
            .codec()
            .import(&mut inventory, path)
            .with_context(|| format!("failed to import {}", path.display()))?;
        tracing::info!(path = %path.display(), %format, articles = codes.len(), "startup import");
    }

    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    stockledger_cli::run(&mut inventory, &mut console).context("menu session failed")?;
    Ok(())
}
