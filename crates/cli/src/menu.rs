//! Numbered option menu.

use std::io::{BufRead, Write};

use crate::console::{Console, ConsoleError};

/// What the user asked for, in menu order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Register,
    Increment,
    Decrement,
    Show,
    List,
    Remove,
    ExportCsv,
    ImportCsv,
    ExportXml,
    ImportXml,
    Exit,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::Register,
        Action::Increment,
        Action::Decrement,
        Action::Show,
        Action::List,
        Action::Remove,
        Action::ExportCsv,
        Action::ImportCsv,
        Action::ExportXml,
        Action::ImportXml,
        Action::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::Register => "Register article",
            Action::Increment => "Increment stock",
            Action::Decrement => "Decrement stock",
            Action::Show => "Show article",
            Action::List => "List inventory",
            Action::Remove => "Remove article",
            Action::ExportCsv => "Export CSV",
            Action::ImportCsv => "Import CSV",
            Action::ExportXml => "Export XML",
            Action::ImportXml => "Import XML",
            Action::Exit => "Exit",
        }
    }
}

pub struct Menu {
    title: &'static str,
    actions: &'static [Action],
}

impl Menu {
    pub const fn new(title: &'static str, actions: &'static [Action]) -> Self {
        Self { title, actions }
    }

    /// Print the options and read a choice, re-prompting until it is in range.
    pub fn choose<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<Action, ConsoleError> {
        console.say(self.title)?;
        console.say(format!("{}\n", "-".repeat(self.title.chars().count())))?;
        for (idx, action) in self.actions.iter().enumerate() {
            console.say(format!("{}. {}", idx + 1, action.label()))?;
        }

        let mut message = "\nChoose an option: ";
        loop {
            let choice: usize = console.ask(message)?;
            if (1..=self.actions.len()).contains(&choice) {
                return Ok(self.actions[choice - 1]);
            }
            message = "Invalid option, choose another: ";
        }
    }
}
