use std::sync::Mutex;

use colored::Colorize;
use picker_application::{ChatThread, EntryKind, Presenter};
use picker_core::view::{CatalogView, ProductDetails, SelectionView, NO_SELECTION_MESSAGE};

/// Prints regions to stdout.
///
/// Catalog and selection regions are reprinted whole. The chat thread only
/// prints entries that are new or whose placeholder has been resolved since
/// the last call.
pub struct TerminalPresenter {
    printed: Mutex<Vec<EntryKind>>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self {
            printed: Mutex::new(Vec::new()),
        }
    }
}

impl Presenter for TerminalPresenter {
    fn show_catalog(&self, view: &CatalogView) {
        if let Some(message) = view.message() {
            println!("{}", message.bright_black());
            return;
        }

        for card in view.cards() {
            let marker = if card.selected { "[x]" } else { "[ ]" };
            println!(
                "{} {} {} {}",
                marker.bright_green(),
                format!("#{}", card.id).bright_black(),
                card.name.bold(),
                format!("({})", card.brand).bright_black()
            );
        }
    }

    fn show_selection(&self, view: &SelectionView) {
        println!("{}", "Selected products:".bright_magenta());
        if view.is_empty() {
            println!("  {}", NO_SELECTION_MESSAGE.bright_black());
            return;
        }
        for entry in &view.entries {
            println!(
                "  {} {} {}",
                format!("#{}", entry.id).bright_black(),
                entry.name,
                format!("({})", entry.brand).bright_black()
            );
        }
    }

    fn show_details(&self, details: &ProductDetails) {
        println!();
        for (index, line) in details.to_string().lines().enumerate() {
            if index == 0 {
                println!("{}", line.bold());
            } else {
                println!("{}", line.bright_blue());
            }
        }
        println!();
    }

    fn show_thread(&self, thread: &ChatThread) {
        let mut printed = self.printed.lock().unwrap_or_else(|p| p.into_inner());

        for (index, entry) in thread.entries().iter().enumerate() {
            let fresh = match printed.get(index) {
                None => true,
                Some(previous) => *previous == EntryKind::Pending && entry.kind != EntryKind::Pending,
            };
            if !fresh {
                continue;
            }

            match entry.kind {
                // User input is already echoed by the prompt line.
                EntryKind::User => {}
                EntryKind::Pending => println!("{}", entry.text.bright_black()),
                EntryKind::Assistant => {
                    for line in entry.text.lines() {
                        println!("{}", line.bright_blue());
                    }
                }
                EntryKind::Error => println!("{}", entry.text.red()),
            }

            match printed.get_mut(index) {
                Some(slot) => *slot = entry.kind,
                None => printed.push(entry.kind),
            }
        }
    }

    fn show_error(&self, message: &str) {
        eprintln!("{}", message.red());
    }
}
