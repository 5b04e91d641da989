use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reposcribe::cli::commands::{apply, config as config_cmd, generate_docs, lint};
use reposcribe::config::ConfigLoader;

#[derive(Parser)]
#[command(name = "reposcribe")]
#[command(
    version,
    about = "Best-practice templates and AI-assisted documentation sites for git repositories"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a documentation site from a repository
    GenerateDocs {
        #[arg(help = "Path to the repository to document")]
        repo: PathBuf,
        #[arg(long, short, help = "Output directory for the generated site")]
        output: Option<PathBuf>,
        #[arg(
            long,
            help = "Enhance sections with AI (format: provider/model-name)"
        )]
        use_ai: Option<String>,
        #[arg(long = "dry-run", help = "Generate in memory, don't write files")]
        dry_run: bool,
    },

    /// Apply a best practice to a repository
    Apply {
        #[arg(help = "Best practice alias (see --list)")]
        practice: Option<String>,
        #[arg(long, short, default_value = ".", help = "Target repository path")]
        repo: PathBuf,
        #[arg(long, short, help = "Output directory for site-generating practices")]
        output: Option<PathBuf>,
        #[arg(
            long,
            help = "Customize templates with AI (format: provider/model-name)"
        )]
        use_ai: Option<String>,
        #[arg(long = "dry-run", help = "Show what would be written, don't write")]
        dry_run: bool,
        #[arg(long, help = "List available practice aliases")]
        list: bool,
    },

    /// Lint markdown files for MDX compatibility
    Lint {
        #[arg(help = "Markdown file or directory to lint")]
        path: PathBuf,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show,
    /// Show configuration file paths
    Path,
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mReposcribe encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }

        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::GenerateDocs {
            repo,
            output,
            use_ai,
            dry_run,
        } => {
            let config = ConfigLoader::load()?;
            let rt = Runtime::new()?;
            rt.block_on(generate_docs::run(
                generate_docs::GenerateDocsOptions {
                    repo,
                    output,
                    use_ai,
                    dry_run,
                },
                &config,
            ))?;
        }
        Commands::Apply {
            practice,
            repo,
            output,
            use_ai,
            dry_run,
            list,
        } => {
            if list {
                apply::list();
                return Ok(());
            }
            let Some(practice) = practice else {
                anyhow::bail!("a practice alias is required (try --list)");
            };
            let config = ConfigLoader::load()?;
            let rt = Runtime::new()?;
            rt.block_on(apply::run(
                apply::ApplyOptions {
                    practice,
                    repo,
                    output,
                    use_ai,
                    dry_run,
                },
                &config,
            ))?;
        }
        Commands::Lint { path } => {
            let summary = lint::run(&path)?;
            if summary.error_count > 0 {
                anyhow::bail!("{} lint error(s) found", summary.error_count);
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => config_cmd::show()?,
            ConfigAction::Path => config_cmd::path()?,
        },
    }

    Ok(())
}
