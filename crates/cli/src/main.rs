//! `lending` seeds an in-memory library and runs a concurrent borrowing
//! session against it, printing a JSON summary to stdout.
//!
//! Environment:
//! - `LENDING_CATALOG`: path to a JSON array of items (built-in demo shelf otherwise)
//! - `LENDING_BORROWERS`: number of concurrent borrowers (default 8)
//! - `LENDING_OVERDUE_DAYS`: overdue threshold in days (default 7)
//! - `RUST_LOG`, `LENDING_LOG_FORMAT`: logging

use anyhow::Context;
use serde::Serialize;

use lending_catalog::{CatalogKey, Item, Library, LibraryConfig, Receipt, User, load_items};
use lending_core::SystemClock;

const CATALOG_ENV: &str = "LENDING_CATALOG";
const BORROWERS_ENV: &str = "LENDING_BORROWERS";
const DEFAULT_BORROWERS: usize = 8;

#[derive(Debug, Serialize)]
struct SessionSummary {
    borrowers: usize,
    overdue_after_days: u32,
    receipts: Vec<Receipt>,
    refused: Vec<String>,
    inventory_during: Vec<Item>,
    inventory_after: Vec<Item>,
}

fn demo_catalog() -> Vec<Item> {
    vec![
        Item::dvd("1", "7", "Pi"),
        Item::dvd("2", "7", "Pi"),
        Item::book("3", "4", "Introduction to Algorithms"),
        Item::vhs("4", "5", "WarGames"),
    ]
}

fn borrower_count() -> anyhow::Result<usize> {
    match std::env::var(BORROWERS_ENV) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("{BORROWERS_ENV} must be a non-negative integer, got {raw:?}")),
        Err(_) => Ok(DEFAULT_BORROWERS),
    }
}

fn main() -> anyhow::Result<()> {
    lending_observability::init();

    let config = LibraryConfig::from_env().context("invalid library configuration")?;
    let borrowers = borrower_count()?;

    let items = match std::env::var(CATALOG_ENV) {
        Ok(path) => load_items(&path).with_context(|| format!("loading catalog from {path}"))?,
        Err(_) => {
            tracing::warn!("{CATALOG_ENV} not set; using built-in demo catalog");
            demo_catalog()
        }
    };

    let library = Library::with_config(SystemClock, items, config);
    let keys: Vec<CatalogKey> = library.index().keys().cloned().collect();

    // Borrower n asks for title n % titles; several borrowers share each title.
    let results: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..borrowers)
            .filter_map(|n| keys.get(n % keys.len().max(1)).map(|key| (n, key)))
            .map(|(n, key)| {
                let library = &library;
                s.spawn(move || {
                    let user = User::new(format!("borrower-{n}"));
                    library.borrow(&key.title, key.item_type, &user)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join())
            .collect::<Result<Vec<_>, _>>()
    })
    .map_err(|_| anyhow::anyhow!("a borrower thread panicked"))?;

    let mut receipts = Vec::new();
    let mut refused = Vec::new();
    for result in results {
        match result {
            Ok(receipt) => receipts.push(receipt),
            Err(e) => refused.push(e.to_string()),
        }
    }

    tracing::info!(
        borrowed = receipts.len(),
        refused = refused.len(),
        "borrowing session finished"
    );

    let inventory_during = library.current_inventory();
    for receipt in &receipts {
        library.return_item(&receipt.item)?;
    }

    let summary = SessionSummary {
        borrowers,
        overdue_after_days: library.config().overdue_after_days,
        receipts,
        refused,
        inventory_during,
        inventory_after: library.current_inventory(),
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
