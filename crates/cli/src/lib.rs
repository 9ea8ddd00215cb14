//! Interactive front end for the inventory ledger.
//!
//! Prompts for primitives, calls into the inventory and the codecs, and prints
//! results or error messages. No business rules live here.

pub mod config;
pub mod console;
pub mod menu;
pub mod session;

pub use config::Cli;
pub use console::{Console, ConsoleError};
pub use session::run;
