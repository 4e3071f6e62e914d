use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dashboard::{recompute, DashboardContext, DEFAULT_CURRENCY_SYMBOL};
use shared::domain::{Dimension, ExperimentLog, FilterSelection};
use storage::LabStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod seed;

#[derive(Parser, Debug)]
#[command(about = "Maintain and inspect the lab inventory store")]
struct Cli {
    #[arg(long, global = true, default_value = "sqlite://lab_inventory.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the store and the experiment_logs table.
    Init,
    /// Append a deterministic demo dataset.
    Seed {
        #[arg(long, default_value_t = 30)]
        days: u32,
        #[arg(long, default_value = "2024-01-01")]
        start: NaiveDate,
    },
    /// Append a single experiment log.
    Add {
        researcher: String,
        chemical: String,
        instrument: String,
        quantity_ml: f64,
        total_cost: f64,
        date: NaiveDate,
    },
    /// Print the dashboard summaries for a filter selection.
    Summary {
        #[arg(long)]
        researcher: Vec<String>,
        #[arg(long)]
        chemical: Vec<String>,
        #[arg(long)]
        instrument: Vec<String>,
        #[arg(long, default_value = DEFAULT_CURRENCY_SYMBOL)]
        currency: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Init => {
            let store = LabStore::create(&cli.database_url).await?;
            store.close().await;
            println!("initialized {}", cli.database_url);
        }
        Command::Seed { days, start } => {
            let store = LabStore::create(&cli.database_url).await?;
            let rows = seed::demo_rows(start, days);
            for row in &rows {
                store.insert_experiment_log(row).await?;
            }
            store.close().await;
            info!(rows = rows.len(), days, "seeded demo dataset");
            println!("inserted {} rows", rows.len());
        }
        Command::Add {
            researcher,
            chemical,
            instrument,
            quantity_ml,
            total_cost,
            date,
        } => {
            let store = LabStore::create(&cli.database_url).await?;
            store
                .insert_experiment_log(&ExperimentLog {
                    researcher,
                    chemical,
                    instrument_used: instrument,
                    quantity_used_ml: quantity_ml,
                    total_cost,
                    date,
                })
                .await?;
            store.close().await;
            println!("inserted 1 row");
        }
        Command::Summary {
            researcher,
            chemical,
            instrument,
            currency,
        } => {
            let rows = storage::load_snapshot(&cli.database_url).await?;
            let ctx = DashboardContext::from_rows(rows, currency)?;
            let selection = FilterSelection::default()
                .with(Dimension::Researcher, researcher)
                .with(Dimension::Chemical, chemical)
                .with(Dimension::Instrument, instrument);
            let update = recompute(&ctx, &selection);
            println!("rows matched: {} of {}", update.row_count, ctx.table().len());
            println!("{}", update.summaries.total_cost);
            println!("{}", update.summaries.unique_instruments);
            println!("{}", update.summaries.busiest_day);
        }
    }

    Ok(())
}
