use anyhow::Context;
use clap::{Parser, Subcommand};

use bookshelf_kernel::settings::Settings;

#[derive(Parser)]
#[command(name = "bookshelf", about = "Book catalog CRUD service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Load the layered configuration and print the effective settings
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => bookshelf_app::run().await,
        Command::CheckConfig => {
            let settings =
                Settings::load().with_context(|| "failed to load bookshelf settings")?;
            println!("{settings:#?}");
            Ok(())
        }
    }
}
