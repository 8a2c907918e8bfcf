//! texfrag CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::FragmentFlags;

#[derive(Parser)]
#[command(name = "texfrag")]
#[command(version)]
#[command(about = "Publish plots, tables and values as LaTeX fragments", long_about = None)]
struct Cli {
    /// Configuration file (default: texfrag.yml in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default texfrag.yml and create the publishing folders
    Init {
        /// Directory to initialize (defaults to the current directory)
        dir: Option<PathBuf>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Publish an existing image as a figure
    Figure {
        /// Image file to copy into the graphics folder
        image: PathBuf,

        /// Fragment name (defaults to the image file stem)
        #[arg(long)]
        name: Option<String>,

        /// Graphics width, e.g. 0.6\textwidth
        #[arg(long)]
        width: Option<String>,

        #[command(flatten)]
        flags: FragmentFlags,
    },

    /// Publish a tabular as a table
    Table {
        /// File with ready-made tabular markup
        #[arg(long, conflicts_with = "data", required_unless_present = "data")]
        markup: Option<PathBuf>,

        /// YAML or JSON file with columns, optional index and rows
        #[arg(long)]
        data: Option<PathBuf>,

        /// Fragment name
        #[arg(long)]
        name: String,

        /// Decimal places for float cells in --data tables
        #[arg(long, default_value_t = 2)]
        precision: usize,

        /// Escape LaTeX special characters in --data cells
        #[arg(long)]
        escape: bool,

        #[command(flatten)]
        flags: FragmentFlags,
    },

    /// Publish a scalar value
    Value {
        /// Text, integer or float
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Fragment name
        #[arg(long)]
        name: String,

        /// Round a float to this many decimals
        #[arg(long, conflicts_with = "format")]
        round: Option<usize>,

        /// Format spec for a float, e.g. .3f, ,.2f, .1%, .2e
        #[arg(long)]
        format: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so that --json output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "texfrag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { dir, force } => commands::init::execute(commands::init::InitArgs {
            dir,
            config: cli.config,
            force,
        }),
        Commands::Figure {
            image,
            name,
            width,
            flags,
        } => commands::figure::execute(commands::figure::FigureArgs {
            image,
            name,
            width,
            flags,
            config: cli.config,
        }),
        Commands::Table {
            markup,
            data,
            name,
            precision,
            escape,
            flags,
        } => commands::table::execute(commands::table::TableArgs {
            markup,
            data,
            name,
            precision,
            escape,
            flags,
            config: cli.config,
        }),
        Commands::Value {
            value,
            name,
            round,
            format,
            json,
        } => commands::value::execute(commands::value::ValueArgs {
            value,
            name,
            round,
            format,
            json,
            config: cli.config,
        }),
    }
}
