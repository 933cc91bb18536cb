pub mod cli;
pub mod core;
pub mod store;

use crate::cli::entry::{NewTransaction, TransactionChanges};
use crate::cli::export::ExportRequest;
use crate::core::analytics;
use crate::core::config::AppConfig;
use crate::core::currency::Currency;
use crate::core::filter::FilterUpdate;
use crate::core::state::TransactionsState;
use crate::store::DiskStore;
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Add(NewTransaction),
    Edit {
        id: String,
        changes: TransactionChanges,
    },
    Delete {
        id: String,
    },
    List(FilterUpdate),
    Summary,
    Chart(FilterUpdate),
    Export(ExportRequest),
}

/// Opens the transaction state stored under the configured data path.
pub fn open_state(config: &AppConfig) -> Result<TransactionsState> {
    let data_path = config.default_data_path()?;
    let store = DiskStore::open(&data_path)?;
    Ok(TransactionsState::load(Box::new(store)))
}

/// Runs `command` against the stored transactions.
///
/// `currency` overrides the configured display currency for this run.
pub fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    currency: Option<Currency>,
) -> Result<()> {
    info!("Finance Tracker starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let converter = config.converter();
    let display_currency = currency.unwrap_or(config.currency);
    let today = chrono::Local::now().date_naive();
    let mut state = open_state(&config)?;

    match command {
        AppCommand::Add(new) => {
            let added = cli::entry::add(&mut state, new, display_currency, today)?;
            println!("Added transaction {}", added.id);
        }
        AppCommand::Edit { id, changes } => {
            let edited = cli::entry::edit(&mut state, &id, changes, today)?;
            println!("Updated transaction {}", edited.id);
        }
        AppCommand::Delete { id } => {
            cli::entry::delete(&mut state, &id)?;
            println!("Deleted transaction {id}");
        }
        AppCommand::List(update) => {
            state.set_filter(update);
            println!(
                "{}",
                cli::list::render(
                    state.filtered_transactions(),
                    state.filter(),
                    &converter,
                    display_currency
                )
            );
        }
        AppCommand::Summary => {
            println!(
                "{}",
                cli::summary::render(state.transactions(), &converter, display_currency)
            );
        }
        AppCommand::Chart(update) => {
            state.set_filter(update);
            let chart =
                analytics::chart_data(state.filtered_transactions(), &converter, display_currency);
            println!("{}", chart.display_as_table());
        }
        AppCommand::Export(request) => {
            let dir = std::env::current_dir()?;
            let (path, count) = cli::export::run(
                state.transactions(),
                &request,
                &converter,
                display_currency,
                &dir,
            )?;
            println!("Exported {count} transactions to {}", path.display());
        }
    }

    Ok(())
}
