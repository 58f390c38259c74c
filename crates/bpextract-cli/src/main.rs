mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bpextract",
    version,
    about = "Extract blood pressure readings from Aktiia PDF reports to CSV"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract readings from a report PDF into a CSV file
    Extract {
        /// Path to the input PDF file
        input_pdf: PathBuf,

        /// Path for the output CSV file
        output_csv: PathBuf,

        /// Configuration file (YAML or JSON). Defaults to the first one found
        /// in the working directory or the user config directory.
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print a detailed status report when done
        #[arg(long)]
        status: bool,

        /// Disable the progress bar
        #[arg(long)]
        no_progress: bool,

        /// Also scan the first (summary) page
        #[arg(long)]
        include_first_page: bool,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a configuration file with default values
    Init {
        /// Where to write it (.yaml, .yml or .json)
        #[arg(short, long, value_name = "FILE")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show {
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = ShowFormat::Yaml)]
        format: ShowFormat,
    },
    /// Print where the configuration is looked up
    Path,
}

#[derive(Clone, Copy, ValueEnum)]
enum ShowFormat {
    Yaml,
    Json,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Extract {
            input_pdf,
            output_csv,
            config,
            status,
            no_progress,
            include_first_page,
        } => commands::extract::run(commands::extract::ExtractArgs {
            input_pdf,
            output_csv,
            config,
            show_status: status,
            no_progress,
            include_first_page,
        }),
        Commands::Config { action } => match action {
            ConfigAction::Init { path, force } => commands::config::init(path, force),
            ConfigAction::Show { config, format } => {
                let json = matches!(format, ShowFormat::Json);
                commands::config::show(config, json)
            }
            ConfigAction::Path => commands::config::path(),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
