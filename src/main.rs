use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use fintrack::cli::entry::{NewTransaction, TransactionChanges};
use fintrack::cli::export::{ExportRequest, current_month};
use fintrack::core::currency::Currency;
use fintrack::core::filter::{FilterUpdate, TypeFilter};
use fintrack::core::log::init_logging;
use fintrack::core::report::{ExportFormat, ReportOptions};
use fintrack::core::transaction::TransactionType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Display currency for this run (USD or VND)
    #[arg(long, global = true)]
    currency: Option<Currency>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct FilterArgs {
    /// Only transactions on or after this date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Only transactions on or before this date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// income, expense or all
    #[arg(long = "type")]
    kind: Option<TypeFilter>,
}

impl From<FilterArgs> for FilterUpdate {
    fn from(args: FilterArgs) -> Self {
        FilterUpdate {
            start_date: args.from.map(Some),
            end_date: args.to.map(Some),
            kind: args.kind,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Record a new transaction
    Add {
        /// What the transaction was for (3-100 characters)
        #[arg(short, long)]
        description: String,
        /// Positive amount
        #[arg(short, long)]
        amount: f64,
        /// income or expense
        #[arg(short = 't', long = "type")]
        kind: TransactionType,
        #[arg(short = 'g', long)]
        category: String,
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Recording currency, defaults to the display currency
        #[arg(long = "in")]
        recorded_in: Option<Currency>,
    },
    /// Change fields of an existing transaction
    Edit {
        id: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<f64>,
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionType>,
        #[arg(short = 'g', long)]
        category: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Remove a transaction
    Delete { id: String },
    /// List transactions
    List(FilterArgs),
    /// Display income, expense and balance totals
    Summary,
    /// Display the daily income, expense and running balance
    Chart(FilterArgs),
    /// Export a transaction report
    Export {
        /// csv or json
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,
        /// Start of the report range, defaults to the first day of this month
        #[arg(long)]
        from: Option<NaiveDate>,
        /// End of the report range, defaults to the last day of this month
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Export every transaction regardless of date
        #[arg(long, conflicts_with_all = ["from", "to"])]
        all: bool,
        /// Output file, defaults to transactions_<from>_<to>.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        no_summary: bool,
        #[arg(long)]
        no_categories: bool,
    },
}

impl From<Commands> for fintrack::AppCommand {
    fn from(cmd: Commands) -> fintrack::AppCommand {
        match cmd {
            Commands::Add {
                description,
                amount,
                kind,
                category,
                date,
                recorded_in,
            } => fintrack::AppCommand::Add(NewTransaction {
                description,
                amount,
                kind,
                category,
                date,
                currency: recorded_in,
            }),
            Commands::Edit {
                id,
                description,
                amount,
                kind,
                category,
                date,
            } => fintrack::AppCommand::Edit {
                id,
                changes: TransactionChanges {
                    description,
                    amount,
                    kind,
                    category,
                    date,
                },
            },
            Commands::Delete { id } => fintrack::AppCommand::Delete { id },
            Commands::List(filter) => fintrack::AppCommand::List(filter.into()),
            Commands::Summary => fintrack::AppCommand::Summary,
            Commands::Chart(filter) => fintrack::AppCommand::Chart(filter.into()),
            Commands::Export {
                format,
                from,
                to,
                all,
                output,
                no_summary,
                no_categories,
            } => {
                let (start_date, end_date) = if all {
                    (None, None)
                } else if from.is_none() && to.is_none() {
                    let (first, last) = current_month(chrono::Local::now().date_naive());
                    (Some(first), Some(last))
                } else {
                    (from, to)
                };
                fintrack::AppCommand::Export(ExportRequest {
                    format,
                    options: ReportOptions {
                        start_date,
                        end_date,
                        include_summary: !no_summary,
                        include_categories: !no_categories,
                    },
                    output,
                })
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fintrack::cli::setup::setup(),
        Some(cmd) => fintrack::run_command(cmd.into(), cli.config_path.as_deref(), cli.currency),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
