use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use klv_quote::QuoteVariant;

mod commands;

#[derive(Parser)]
#[command(name = "klv")]
#[command(
    about = "Key-levels workbook tooling: gap math, script cells, fundamentals, Pine",
    long_about = None
)]
struct Cli {
    /// Layered config paths in merge order. Defaults apply when omitted.
    #[arg(long = "config", global = true)]
    config_paths: Vec<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the gap percentage against previous close (JSON)
    Gap {
        #[arg(long)]
        prev_close: f64,

        /// Today's regular-session open; omit before the opening print
        #[arg(long)]
        open: Option<f64>,

        /// Last traded price
        #[arg(long)]
        last: f64,

        /// Evaluation instant (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// Decode escaped script text (stdin, --text or --input)
    Decode {
        /// sentinel (TradeStation) | doubled (TradingView)
        #[arg(long)]
        variant: QuoteVariant,

        #[command(flatten)]
        source: commands::TextSource,

        /// Print the HTML-escaped form instead of raw source
        #[arg(long, default_value_t = false)]
        html: bool,
    },

    /// Encode raw script source for storage in a cell
    Encode {
        #[arg(long)]
        variant: QuoteVariant,

        #[command(flatten)]
        source: commands::TextSource,
    },

    /// Decode one workbook cell and show it
    ShowCell {
        /// Directory of <sheet>.csv files
        #[arg(long)]
        workbook: String,

        #[arg(long)]
        variant: QuoteVariant,

        /// Defaults to sheets.coding_sheet
        #[arg(long)]
        sheet: Option<String>,

        /// Defaults to the configured cell for the variant
        #[arg(long)]
        cell: Option<String>,
    },

    /// Copy non-blank rows per the transfer config
    Transfer {
        /// Source workbook directory
        #[arg(long)]
        workbook: String,

        /// Destination workbook directory; defaults to the source workbook
        #[arg(long = "dest-workbook")]
        dest_workbook: Option<String>,
    },

    /// Fetch short float + institutional ownership for one symbol
    Fundamentals {
        #[arg(long, value_enum)]
        provider: commands::fundamentals::Provider,

        #[arg(long)]
        symbol: String,

        /// Also write the row into this workbook directory
        #[arg(long, requires_all = ["sheet", "cell"])]
        workbook: Option<String>,

        #[arg(long, requires = "workbook")]
        sheet: Option<String>,

        /// Left cell of the two-cell row
        #[arg(long, requires = "workbook")]
        cell: Option<String>,
    },

    /// Generate Pine Script
    Pine {
        #[command(subcommand)]
        cmd: PineCmd,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[derive(Subcommand)]
enum PineCmd {
    /// Standalone gap label indicator
    Gap {
        #[arg(long)]
        title: Option<String>,
    },

    /// Key-levels overlay built from a workbook block
    Levels {
        #[arg(long)]
        workbook: String,

        /// Defaults to sheets.coding_sheet
        #[arg(long)]
        sheet: Option<String>,

        /// Defaults to sheets.levels_range
        #[arg(long)]
        range: Option<String>,

        #[arg(long)]
        title: Option<String>,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn main() -> Result<()> {
    // Load .env.local if present (dev convenience); absent file is fine.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Gap {
            prev_close,
            open,
            last,
            at,
        } => commands::gap::run(prev_close, open, last, at.unwrap_or_else(Utc::now)),

        Commands::Decode {
            variant,
            source,
            html,
        } => commands::quote::decode(variant, &source, html),

        Commands::Encode { variant, source } => commands::quote::encode(variant, &source),

        Commands::ShowCell {
            workbook,
            variant,
            sheet,
            cell,
        } => {
            let cfg = commands::load_app_config(&cli.config_paths)?;
            commands::quote::show_cell(&cfg, &workbook, variant, sheet, cell)
        }

        Commands::Transfer {
            workbook,
            dest_workbook,
        } => {
            let cfg = commands::load_app_config(&cli.config_paths)?;
            commands::sheet::transfer(&cfg, &workbook, dest_workbook.as_deref())
        }

        Commands::Fundamentals {
            provider,
            symbol,
            workbook,
            sheet,
            cell,
        } => {
            let cfg = commands::load_app_config(&cli.config_paths)?;
            let target = match (workbook, sheet, cell) {
                (Some(w), Some(s), Some(c)) => Some(commands::fundamentals::RowTarget {
                    workbook: w,
                    sheet: s,
                    cell: c,
                }),
                _ => None,
            };
            commands::fundamentals::run(&cfg, provider, &symbol, target)
        }

        Commands::Pine { cmd } => {
            let cfg = commands::load_app_config(&cli.config_paths)?;
            match cmd {
                PineCmd::Gap { title } => commands::pine::gap(&cfg, title),
                PineCmd::Levels {
                    workbook,
                    sheet,
                    range,
                    title,
                } => commands::pine::levels(&cfg, &workbook, sheet, range, title),
            }
        }

        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = klv_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
            Ok(())
        }
    }
}
