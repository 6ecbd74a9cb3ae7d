//! Inspect and prune stored summaries.

use crate::cli::output::{self, Styled};
use crate::cli::HistoryAction;
use crate::history::HistoryStore;
use anyhow::Result;

pub fn run(action: HistoryAction) -> Result<()> {
    let s = Styled::new();
    let store = HistoryStore::default_store();

    match action {
        HistoryAction::List => {
            let records = store.list()?;
            if records.is_empty() {
                println!("  no stored summaries");
                return Ok(());
            }
            for record in records {
                println!(
                    "  {} {} {}",
                    s.bold(&record.id.to_string()),
                    s.dim(&format!("[{} {}]", record.timestamp, record.style)),
                    snippet(&record.content, 60)
                );
            }
        }
        HistoryAction::Show { id } => match store.get(id)? {
            Some(record) => {
                println!("  {}", s.dim(&format!("{} | {}", record.timestamp, record.source_url)));
                println!("{}", output::render_summary(&record.content, &s));
            }
            None => {
                output::print_error(&s, &format!("no summary with id {id}"));
                std::process::exit(1);
            }
        },
        HistoryAction::Delete { id } => {
            if store.delete(id)? {
                println!("  {} deleted {id}", s.ok_sym());
            } else {
                output::print_error(&s, &format!("no summary with id {id}"));
                std::process::exit(1);
            }
        }
        HistoryAction::Clear => {
            store.clear()?;
            println!("  {} history cleared", s.ok_sym());
        }
    }

    Ok(())
}

/// First line of a summary, capped for list display.
fn snippet(content: &str, max_chars: usize) -> String {
    let first_line = content.lines().next().unwrap_or_default();
    match first_line.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}\u{2026}", &first_line[..idx]),
        None => first_line.to_string(),
    }
}
