use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use quote_pdf::{QuoteOptions, QuoteRecord};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

mod logger;

#[derive(Parser)]
#[command(name = "cotiz", about = "Quote (cotización) PDF tools", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct QuoteArgs {
    /// Quote JSON file (same shape as the backend payload)
    #[arg(short, long)]
    quote: PathBuf,

    /// CSV file with line items (columns: product_id, name, quantity, unit_price);
    /// replaces the items in the quote file
    #[arg(long)]
    items: Option<PathBuf>,

    /// Options JSON file (see `init-config`)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum line items per page
    #[arg(long)]
    max_items_per_page: Option<NonZeroUsize>,

    /// Output paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a quote to PDF
    Export {
        #[command(flatten)]
        quote: QuoteArgs,

        /// Output PDF file (defaults to the configured file name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Letterhead image for the first page
        #[arg(long)]
        header: Option<PathBuf>,

        /// Footer image for every page
        #[arg(long)]
        footer: Option<PathBuf>,
    },

    /// Show pagination and totals without rendering
    Inspect {
        #[command(flatten)]
        quote: QuoteArgs,
    },

    /// Search a product listing by name
    Search {
        /// Product listing JSON exported from the backend
        #[arg(long)]
        catalog: PathBuf,

        /// Part of the product name
        term: String,
    },

    /// Write the default options to a JSON file
    InitConfig {
        /// Where to write the options
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    Letter,
    Legal,
}

impl From<PaperArg> for quote_pdf::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

async fn load_options(args: &QuoteArgs) -> Result<QuoteOptions> {
    let mut options = match &args.config {
        Some(path) => QuoteOptions::load(path)
            .await
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => QuoteOptions::default(),
    };

    if let Some(max) = args.max_items_per_page {
        options.geometry.max_items_per_page = max;
    }
    if let Some(paper) = args.paper {
        options.geometry.paper_size = paper.into();
    }

    Ok(options)
}

async fn load_record(args: &QuoteArgs) -> Result<QuoteRecord> {
    let mut input = quote_pdf::load_quote_input(&args.quote)
        .await
        .with_context(|| format!("reading quote {}", args.quote.display()))?;

    if let Some(items) = &args.items {
        input.items = quote_pdf::load_items_from_csv(items)
            .await
            .with_context(|| format!("reading items {}", items.display()))?;
    }

    Ok(quote_pdf::assemble(input)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::CliLogger::new(cli.verbose).init()?;

    match cli.command {
        Commands::Export {
            quote,
            output,
            header,
            footer,
        } => {
            let mut options = load_options(&quote).await?;
            if let Some(header) = header {
                options.header_image = header;
            }
            if let Some(footer) = footer {
                options.footer_image = footer;
            }

            let record = load_record(&quote).await?;
            let output =
                output.unwrap_or_else(|| quote_pdf::default_output_path(Path::new("."), &options));

            let report = quote_pdf::export_quote(&record, &options, &output).await?;
            println!(
                "Generated quote for {} ({} items, {} pages) → {}",
                record.client(),
                record.items().len(),
                report.pages,
                report.path.display()
            );
        }

        Commands::Inspect { quote } => {
            let options = load_options(&quote).await?;
            options.validate()?;
            let record = load_record(&quote).await?;

            let summary = quote_pdf::summarize(&record, &options.geometry);
            let symbol = &options.currency_symbol;
            println!("Quote for {} ({})", record.client(), record.date());
            println!("  Items: {}", summary.item_count);
            println!("  Pages: {}", summary.pages);
            for (i, count) in summary.items_per_page.iter().enumerate() {
                println!("    page {}: {} items", i + 1, count);
            }
            for line in quote_pdf::summary_lines(&record, symbol) {
                println!("  {}", line);
            }
        }

        Commands::Search { catalog, term } => {
            let products = quote_pdf::load_catalog(&catalog).await?;
            let hits = quote_pdf::search(&products, &term);
            if hits.is_empty() {
                println!("No products match {:?}", term);
            }
            for product in hits {
                println!("  #{} {} - {}", product.id, product.name, product.price);
            }
        }

        Commands::InitConfig { path } => {
            QuoteOptions::default().save(&path).await?;
            println!("Default options written → {}", path.display());
        }
    }

    Ok(())
}
