use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use access_log_analyzer::commands;
use access_log_analyzer::commands::analyze::AnalysisConfig;

#[derive(Parser)]
#[command(name = "access-log")]
#[command(about = "Web server access log analysis tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug diagnostics to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze access logs with optional date filtering
    Analyze {
        /// Path to one or more log files to analyze
        #[arg(required = true, value_name = "LOG_FILE")]
        log_files: Vec<String>,

        /// Number of top results to show for IPs and URIs
        #[arg(short = 'n', long, default_value_t = 5, allow_negative_numbers = true)]
        top: i64,

        /// Filter logs FROM this date/time (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS). Inclusive.
        #[arg(long)]
        start_date: Option<String>,

        /// Filter logs UP TO this date/time (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS). Inclusive.
        #[arg(long)]
        end_date: Option<String>,

        /// Also write the report to this file
        #[arg(short, long)]
        output: Option<String>,

        /// Output format: json or csv (auto-detected from file extension if not specified)
        #[arg(long, value_parser = ["json", "csv"])]
        format: Option<String>,

        /// Show a progress bar per file
        #[arg(long)]
        progress: bool,
    },

    /// Generate shell completion scripts
    GenerateCompletion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            log_files,
            top,
            start_date,
            end_date,
            output,
            format,
            progress,
        } => {
            let config = AnalysisConfig {
                show_progress: progress,
                ..AnalysisConfig::from_args(top, start_date.as_deref(), end_date.as_deref())
            };
            commands::analyze::run(&log_files, &config, output.as_deref(), format.as_deref())
        }
        Commands::GenerateCompletion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "access-log", &mut std::io::stdout());
            Ok(())
        }
    }
}
