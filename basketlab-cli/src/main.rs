//! basketlab CLI: P&L curves, option ladders and record listings.
//!
//! Commands:
//! - `curve`: P&L curve of a saved basket file, as a table, JSON or CSV
//! - `chain`: record header and order ladder for one chain record
//! - `records`: list records, optionally for one date and session

mod render;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use basketlab_core::chain::{load_chain_dir, parse_date, SessionFilter};
use basketlab_core::pnl::SeriesMeta;
use basketlab_core::{BasketConfig, BasketFile};

const DEFAULT_LOG_FILTER: &str = "basketlab=info,basketlab_core=info";

#[derive(Parser)]
#[command(
    name = "basketlab",
    about = "basketlab: option basket P&L at settlement",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the P&L curve of a basket file.
    Curve {
        /// TOML basket: `reference_price` plus `[[legs]]`.
        #[arg(long)]
        basket: PathBuf,

        /// Reference price for the settlement grid. Overrides the basket file.
        #[arg(long, allow_negative_numbers = true)]
        reference: Option<i64>,

        /// TOML config with `[payoff]`, `[grid]` and `[ladder]` sections.
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show one record's header and the order ladder around its ATM strike.
    Chain {
        /// Directory with records.csv, snapshots.csv and quotes.csv.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Record number.
        #[arg(long)]
        number: u32,

        /// Expiry code. Defaults to the record's first expiry.
        #[arg(long)]
        expiry: Option<String>,

        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List chain records.
    Records {
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Trading date (YYYY-MM-DD or YYYY/MM/DD).
        #[arg(long)]
        date: Option<String>,

        /// Session label, or `all`.
        #[arg(long, default_value = "all")]
        session: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Curve {
            basket,
            reference,
            config,
            format,
        } => run_curve(&mut out, &basket, reference, config.as_deref(), format),
        Commands::Chain {
            data_dir,
            number,
            expiry,
            config,
        } => run_chain(&mut out, &data_dir, number, expiry.as_deref(), config.as_deref()),
        Commands::Records {
            data_dir,
            date,
            session,
        } => run_records(&mut out, &data_dir, date.as_deref(), &session),
    }
}

fn run_curve(
    out: &mut impl Write,
    basket_path: &Path,
    reference: Option<i64>,
    config_path: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let config = BasketConfig::load_or_default(config_path)?;
    let basket = BasketFile::load(basket_path)?;

    let reference_price = reference.or(basket.reference_price).ok_or_else(|| {
        anyhow!(
            "no reference price: pass --reference or set reference_price in {}",
            basket_path.display()
        )
    })?;

    let ledger = basket.into_ledger();
    info!(legs = ledger.len(), reference_price, "computing curve");

    let engine = config.engine();
    let curve = engine
        .curve(ledger.snapshot(), reference_price)
        .with_context(|| format!("basket {}", basket_path.display()))?;

    match format {
        OutputFormat::Table => {
            render::curve_table(out, ledger.snapshot(), &curve, &engine.params)?
        }
        OutputFormat::Json => {
            let series = curve
                .series(SeriesMeta::default())
                .context("settlement grid is empty")?;
            serde_json::to_writer_pretty(&mut *out, &series)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => render::curve_csv(out, &curve)?,
    }
    Ok(())
}

fn run_chain(
    out: &mut impl Write,
    data_dir: &Path,
    number: u32,
    expiry: Option<&str>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = BasketConfig::load_or_default(config_path)?;
    let data = load_chain_dir(data_dir)?;

    let Some(record) = data.book.get(number) else {
        let range = match (data.book.first(), data.book.records().last()) {
            (Some(a), Some(b)) => format!("{}..={}", a.number, b.number),
            _ => "none".into(),
        };
        bail!("record {number} not found (available: {range})");
    };

    let expiries = data.book.expiries(number);
    let expiry = match expiry {
        Some(e) if expiries.contains(&e) => e,
        Some(e) => bail!(
            "record {number} has no snapshot for expiry {e} (available: {})",
            expiries.join(", ")
        ),
        None => *expiries
            .first()
            .with_context(|| format!("record {number} has no expiry snapshots"))?,
    };
    debug!(number, expiry, "chain lookup");

    let snapshot = data.book.snapshot(number, expiry);
    render::record_header(out, record, expiry, snapshot)?;

    match snapshot.and_then(|s| s.atm_price) {
        Some(atm) => {
            let rows = data
                .board
                .ladder(record.date, &record.session, expiry, atm, config.ladder);
            render::ladder_table(out, &rows)?;
        }
        None => writeln!(out, "no ATM strike for this record; ladder unavailable")?,
    }
    Ok(())
}

fn run_records(
    out: &mut impl Write,
    data_dir: &Path,
    date: Option<&str>,
    session: &str,
) -> Result<()> {
    let data = load_chain_dir(data_dir)?;
    let filter = SessionFilter::parse(session);

    let date = date
        .map(|d| parse_date(d).with_context(|| format!("invalid date '{d}'")))
        .transpose()?;

    let records: Vec<_> = data
        .book
        .records()
        .iter()
        .filter(|r| date.map_or(true, |d| r.date == d))
        .filter(|r| filter.matches(&r.session))
        .collect();

    if records.is_empty() {
        writeln!(out, "No records match.")?;
        return Ok(());
    }
    render::records_table(out, &records, &data.book)?;
    Ok(())
}
