use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing_subscriber::EnvFilter;

use picker_application::{PickerSession, RequestState};
use picker_core::config::ClientConfig;
use picker_infrastructure::{
    ConfigService, FileKeyValueStore, SelectionStore, catalog_loader_for,
};
use picker_interaction::RelayClient;

mod command;
mod helper;
mod presenter;

use command::Command;
use helper::CliHelper;
use presenter::TerminalPresenter;

#[derive(Parser)]
#[command(name = "routine-picker")]
#[command(about = "Routine Picker - pick products and ask for a personalized routine", long_about = None)]
struct Cli {
    /// Config file (default: platform config dir / picker.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog file path or http(s) URL
    #[arg(long)]
    catalog: Option<String>,

    /// Chat relay endpoint
    #[arg(long)]
    relay: Option<String>,

    /// Selection store file
    #[arg(long)]
    store: Option<PathBuf>,
}

impl Cli {
    /// Flags win over file values.
    fn apply(self, mut config: ClientConfig) -> ClientConfig {
        if let Some(catalog) = self.catalog {
            config.catalog = catalog;
        }
        if let Some(relay) = self.relay {
            config.relay_endpoint = relay;
        }
        if let Some(store) = self.store {
            config.store_path = Some(store);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Quiet by default so log lines do not interleave with the prompt.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ConfigService::load(cli.config.as_deref())?;
    let config = cli.apply(config);
    let store_path = ConfigService::store_path(&config)?;

    // ===== Session Setup =====
    let store = Arc::new(FileKeyValueStore::new(store_path));
    let mut session = PickerSession::new(
        catalog_loader_for(&config.catalog),
        Arc::new(SelectionStore::new(store)),
        Arc::new(RelayClient::new(config.relay_endpoint.clone())),
        Arc::new(TerminalPresenter::new()),
    );

    println!("{}", "=== Routine Picker ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/categories' to list categories, '/help' for all commands, or 'quit' to exit."
            .bright_black()
    );
    println!();

    if let Err(e) = session.start().await {
        eprintln!("{}", format!("Starting without a catalog: {e}").yellow());
    }

    // ===== REPL Setup =====
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match Command::parse(trimmed) {
                    Ok(Command::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Ok(command) => run(&mut session, command).await,
                    Err(message) => println!("{}", message.yellow()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

async fn run(session: &mut PickerSession, command: Command) {
    let result = match command {
        Command::Categories => {
            let categories = session.categories();
            if categories.is_empty() {
                println!("{}", "No categories available".bright_black());
            }
            for category in categories {
                println!("  {}", category.bright_cyan());
            }
            Ok(())
        }
        Command::Category(category) => session.change_category(category.as_deref()).await,
        Command::Toggle(id) => session.toggle_product(id).await.map(|_| ()),
        Command::Remove(id) => session.remove_selected(id).await,
        Command::Details(id) => session.show_details(id).map(|_| ()),
        Command::Selected => {
            session.show_selection();
            Ok(())
        }
        Command::Clear => session.clear_selection().await,
        Command::Routine => match session.generate_routine().await {
            // Already shown inline in the chat thread.
            Err(e) if e.is_empty_selection() => Ok(()),
            other => other.map(report_failure),
        },
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Chat(text) => {
            if let Some(state) = session.submit_chat(&text).await {
                report_failure(state);
            }
            Ok(())
        }
        Command::Quit => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("{}", format!("Error: {e}").red());
    }
}

fn report_failure(state: RequestState) {
    if state == RequestState::Failed {
        println!("{}", "Send the message again to retry.".bright_black());
    }
}

fn print_help() {
    let rows = [
        ("/categories", "list catalog categories"),
        ("/category <name>", "show products of a category (no name clears)"),
        ("/toggle <id>", "select or deselect a product"),
        ("/remove <id>", "remove a product from the selection"),
        ("/details <id>", "show full product details"),
        ("/selected", "show the selected products"),
        ("/clear", "clear the selection"),
        ("/routine", "ask for a routine using the selected products"),
        ("<text>", "chat with the assistant"),
        ("quit", "exit"),
    ];
    for (command, description) in rows {
        println!("  {} {}", format!("{command:<18}").bright_cyan(), description.bright_black());
    }
}
