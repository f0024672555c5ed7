use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use hosting_rules::config::{ConfigInput, ConfigResolver, RuleKind};
use hosting_rules::observability::logging::init_logging;
use hosting_rules::routing::{active_engine, RuleTable};

#[derive(Parser)]
#[command(name = "hosting-rules")]
#[command(
    about = "Resolve hosting configuration and test request paths against its rules",
    long_about = None
)]
struct Cli {
    /// Configuration file or inline JSON (default: superstatic.json, firebase.json)
    #[arg(short, long)]
    config: Option<String>,

    /// Directory configuration files are looked up in
    #[arg(short, long)]
    base_dir: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration as JSON
    Resolve,
    /// Print capture-syntax warnings for regex rules
    Check {
        /// Exit with failure when any warning is found
        #[arg(long)]
        strict: bool,
    },
    /// Show which rules apply to a request path
    Match {
        path: String,
    },
    /// Print the active regex engine
    Engine,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let mut resolver = ConfigResolver::new();
    if let Some(dir) = cli.base_dir {
        resolver = resolver.with_base_dir(dir);
    }
    let input = ConfigInput::from(cli.config);

    match cli.command {
        Commands::Resolve => {
            let config = resolver.resolve(input).into_configuration();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Check { strict } => {
            let (_, diagnostics) = resolver.resolve_with_diagnostics(input);
            for diagnostic in &diagnostics {
                println!("{}", diagnostic);
            }
            tracing::info!(warnings = diagnostics.len(), "Check complete");
            if strict && !diagnostics.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Match { path } => {
            let config = resolver.resolve(input).into_configuration();
            let table = RuleTable::new(&config);

            for kind in [RuleKind::Rewrite, RuleKind::Redirect] {
                match table.first_match(kind, &path)? {
                    Some((index, rule)) => println!(
                        "{}[{}]: {}",
                        kind.key(),
                        index,
                        serde_json::to_string(rule)?
                    ),
                    None => println!("{}: no match", kind.key()),
                }
            }
            for (index, rule) in table.all_matches(RuleKind::Header, &path)? {
                println!("headers[{}]: {}", index, serde_json::to_string(rule)?);
            }
        }
        Commands::Engine => {
            println!("{}", active_engine().name());
        }
    }

    Ok(ExitCode::SUCCESS)
}
