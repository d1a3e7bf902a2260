use std::{
    fs::File,
    io::{self, BufWriter},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand, ValueEnum};
use time::OffsetDateTime;

use budget_insights::{
    CategoryFilter, DEFAULT_TIMEZONE, Dataset, Error, Report, ReportConfig, TransactionFilter,
    TypeFilter, default_export_file_name, export_csv, filter_transactions, init_logging,
};

/// Dashboard figures and CSV exports for a budget snapshot.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the balance, monthly totals, top categories and recent transactions.
    Summary(SummaryArgs),
    /// Write the transactions matching a filter as CSV.
    Export(ExportArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Args, Debug)]
struct SummaryArgs {
    /// File path to a JSON snapshot with `transactions` and `categories`.
    #[arg(long)]
    data: PathBuf,

    /// File path to a JSON file with report settings. Flags given on the
    /// command line take precedence over it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// How the report is printed.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// The year of the monthly totals, defaults to the current year.
    #[arg(long)]
    year: Option<i32>,

    /// The number of days in the balance trend [default: 30].
    #[arg(long)]
    days: Option<u16>,

    /// The number of categories in the spending breakdown [default: 6].
    #[arg(long)]
    top: Option<usize>,

    /// The number of recent transactions to list [default: 5].
    #[arg(long)]
    recent: Option<usize>,

    /// Canonical timezone name used to decide what today is [default: Etc/UTC].
    #[arg(long, env = "BUDGET_TIMEZONE")]
    timezone: Option<String>,

    /// The symbol placed before amounts in the text report [default: $].
    #[arg(long, env = "BUDGET_CURRENCY_SYMBOL")]
    currency_symbol: Option<String>,
}

#[derive(clap::Args, Debug)]
struct ExportArgs {
    /// File path to a JSON snapshot with `transactions` and `categories`.
    #[arg(long)]
    data: PathBuf,

    /// Keep only "income" or "expense" transactions.
    #[arg(long = "type", default_value = "all")]
    kind: TypeFilter,

    /// Keep only transactions with this category ID.
    #[arg(long, default_value = "all")]
    category: CategoryFilter,

    /// Keep only transactions whose description contains this text.
    #[arg(long)]
    search: Option<String>,

    /// File or directory to write the CSV to, defaults to stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Canonical timezone name used to date the export file name.
    #[arg(long, env = "BUDGET_TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    timezone: String,
}

fn main() -> ExitCode {
    init_logging();

    let args = Args::parse();

    let result = match args.command {
        Command::Summary(summary_args) => print_summary(summary_args),
        Command::Export(export_args) => write_export(export_args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn print_summary(args: SummaryArgs) -> Result<(), Error> {
    let config = report_config(&args)?;
    let today = config.today(OffsetDateTime::now_utc())?;
    let dataset = Dataset::load(&args.data)?;
    let report = Report::build(&dataset, &config, today)?;

    let output = match args.format {
        OutputFormat::Text => report.render_text(&config.currency_symbol)?,
        OutputFormat::Json => report.to_json()?,
    };
    println!("{output}");

    Ok(())
}

/// Settings from the config file if given, then overridden by any flags.
fn report_config(args: &SummaryArgs) -> Result<ReportConfig, Error> {
    let mut config = match &args.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };

    if let Some(timezone) = &args.timezone {
        config.timezone = timezone.clone();
    }
    if let Some(days) = args.days {
        config.trailing_days = days;
    }
    if let Some(top) = args.top {
        config.top_categories = top;
    }
    if let Some(recent) = args.recent {
        config.recent_count = recent;
    }
    if args.year.is_some() {
        config.year = args.year;
    }
    if let Some(currency_symbol) = &args.currency_symbol {
        config.currency_symbol = currency_symbol.clone();
    }

    Ok(config)
}

fn write_export(args: ExportArgs) -> Result<(), Error> {
    let dataset = Dataset::load(&args.data)?;
    let resolved = dataset.resolve();
    let filter = TransactionFilter {
        kind: args.kind,
        category: args.category,
        search_text: args.search,
    };
    let filtered = filter_transactions(&resolved, &filter);

    match args.output {
        None => export_csv(&filtered, io::stdout().lock()),
        Some(output) => {
            let output_path = if output.is_dir() {
                let config = ReportConfig {
                    timezone: args.timezone,
                    ..Default::default()
                };
                let today = config.today(OffsetDateTime::now_utc())?;
                output.join(default_export_file_name(today))
            } else {
                output
            };

            let file = create_output_file(&output_path)?;
            export_csv(&filtered, BufWriter::new(file))?;
            tracing::info!(
                "Wrote {} transactions to {}",
                filtered.len(),
                output_path.display()
            );

            Ok(())
        }
    }
}

fn create_output_file(path: &Path) -> Result<File, Error> {
    File::create(path).map_err(|error| Error::CsvExport(format!("{}: {error}", path.display())))
}
