use anyhow::Result;
use clap::Parser;

use expense_ledger::session::{Console, Session};
use expense_ledger::store::{JsonStore, DEFAULT_STORE_FILE};

/// The whole surface is the interactive session; there are no flags or
/// subcommands, only the standard help/version plumbing.
#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Interactive personal expense ledger for the terminal",
    long_about = "A single-user expense ledger. Records live in named ledgers \
                  inside one workbook file (expense.json in the working \
                  directory); everything is driven from an interactive menu."
)]
struct Cli {}

fn main() -> Result<()> {
    Cli::parse();

    let store = JsonStore::open(DEFAULT_STORE_FILE)?;
    let console = Console::stdio();

    let mut session = Session::new(&store, console);
    session.run()?;

    Ok(())
}
