use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use auto_release::cli::{self, Command, WorkflowContext};
use auto_release::config;
use auto_release::git::GitCli;
use auto_release::ui::{Reporter, TerminalConfirm};

#[derive(clap::Parser)]
#[command(
    name = "auto-release",
    version,
    about = "Bump versions, write changelogs and tag releases from conventional commits"
)]
struct Args {
    #[arg(help = "Command to run: version, changelog or tag")]
    command: Option<String>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            debug!(error = %e, "unrecognized arguments");
            println!("{}", cli::USAGE);
            return ExitCode::SUCCESS;
        }
    };
    let reporter = Reporter::new(args.dry_run);

    let Some(command) = args.command.as_deref().and_then(Command::from_arg) else {
        println!("{}", cli::USAGE);
        return ExitCode::SUCCESS;
    };

    match run(command, &args, &reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            reporter.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, args: &Args, reporter: &Reporter) -> Result<()> {
    let root = std::env::current_dir().context("Failed to determine working directory")?;
    let config = config::load_config(args.config.as_deref(), &root)
        .context("Failed to load configuration")?;
    let git = GitCli::new(&root);

    let ctx = WorkflowContext {
        root: &root,
        config: &config,
        reporter,
        dry_run: args.dry_run,
    };

    match command {
        Command::Version => {
            cli::run_version_workflow(&ctx, &git).context("Failed to update version")?;
        }
        Command::Changelog => {
            let today = chrono::Utc::now().date_naive();
            cli::run_changelog_workflow(&ctx, &git, today, config.running_in_ci())
                .context("Failed to update changelog")?;
        }
        Command::Tag => {
            cli::run_tag_workflow(&ctx, &git, &TerminalConfirm)
                .context("Failed to create release tag")?;
        }
    }

    Ok(())
}
