use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use receiptdesk_observability::LogFormat;
use receiptdesk_printing::{
    HtmlFileSink, PrintConfig, PrintDocument, PrintJob, PrintResult, PrintSink,
};
use receiptdesk_sales::{Order, OrderBrowser};
use serde_json::json;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "receiptdesk",
    about = "Lay out and print delivery receipts, four to an A4 sheet",
    version
)]
struct Cli {
    /// Log output format (logs go to stderr).
    #[arg(long, global = true, value_enum, default_value_t = LogFormatChoice::Json)]
    log_format: LogFormatChoice,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render orders into a printable HTML document.
    Print(PrintArgs),
    /// Show how orders split into pages and sheets without rendering.
    Layout(SourceArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// JSON file holding an array of orders, newest first.
    orders: PathBuf,

    /// Print only these receipt numbers (repeatable). Defaults to every order.
    #[arg(long = "select", value_name = "RECEIPT")]
    select: Vec<String>,

    /// JSON print configuration; `RECEIPTDESK_*` variables are applied on top.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct PrintArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Write the document here instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Do not open the print dialog when the document loads.
    #[arg(long)]
    no_auto_print: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormatChoice {
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

/// Writes the document to standard output.
struct StdoutSink;

impl PrintSink for StdoutSink {
    fn submit(&mut self, document: &PrintDocument) -> PrintResult<()> {
        let mut out = std::io::stdout().lock();
        out.write_all(document.html.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let Cli {
        log_format,
        command,
    } = Cli::parse();
    receiptdesk_observability::init(log_format.into());

    match command {
        Commands::Print(args) => execute_print(args),
        Commands::Layout(args) => execute_layout(args),
    }
}

fn execute_print(args: PrintArgs) -> Result<()> {
    let mut config = load_config(args.source.config.as_deref())?;
    if args.no_auto_print {
        config.auto_print = false;
    }
    let orders = load_selection(&args.source)?;
    let job = PrintJob::new(config);

    let document = match &args.output {
        Some(path) => {
            let mut sink = HtmlFileSink::new(path);
            job.run(&orders, &mut sink)
                .with_context(|| format!("failed to print to {}", path.display()))?
        }
        None => job.run(&orders, &mut StdoutSink)?,
    };

    info!(
        orders = orders.len(),
        pages = document.page_count,
        sheets = document.sheet_count,
        "print run finished"
    );
    Ok(())
}

fn execute_layout(args: SourceArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let orders = load_selection(&args)?;
    let sheets = PrintJob::new(config).render_all_pages(&orders)?;

    let mut out = std::io::stdout().lock();
    for (sheet_no, sheet) in sheets.iter().enumerate() {
        for (slot_no, page) in sheet.slots().iter().enumerate() {
            let Some(page) = page else { continue };
            let range = page.item_range();
            let line = json!({
                "sheet": sheet_no + 1,
                "slot": slot_no + 1,
                "receipt": page.order().receipt_number(),
                "first_item": page.start_index() + 1,
                "items": range.len(),
                "continuation": page.is_continuation(),
                "last_page": page.is_last_page(),
            });
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PrintConfig> {
    let base = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => PrintConfig::default(),
    };
    Ok(base.with_overrides(|key| std::env::var(key).ok()))
}

fn load_orders(path: &Path) -> Result<Vec<Order>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read orders {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid orders file {}", path.display()))
}

/// Orders to print, in file order. With `--select`, only the named receipts;
/// naming a receipt that is not in the file is an error.
fn load_selection(args: &SourceArgs) -> Result<Vec<Order>> {
    let orders = load_orders(&args.orders)?;
    if args.select.is_empty() {
        return Ok(orders);
    }

    for wanted in &args.select {
        if !orders.iter().any(|o| o.receipt_number() == wanted) {
            bail!("receipt {wanted} not found in {}", args.orders.display());
        }
    }

    let mut browser = OrderBrowser::new(orders.len());
    let ids: Vec<_> = orders
        .iter()
        .filter(|o| args.select.iter().any(|r| r == o.receipt_number()))
        .map(Order::id_typed)
        .collect();
    browser.receive(1, orders, None);
    for id in ids {
        browser.toggle_select(id);
    }

    Ok(browser.selection_for_print()?)
}
