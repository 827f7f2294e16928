use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use card_release::build::CommandBuilder;
use card_release::cli::ReleaseWorkflow;
use card_release::config;
use card_release::git::{GitCli, RepoInfo};
use card_release::github::GitHubReleases;
use card_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "card-release",
    version,
    about = "Bump the card version, build, commit, tag and publish a release"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Project root (defaults to the enclosing git repository)")]
    root: Option<PathBuf>,

    #[arg(short, long, help = "Print debug output")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    ui::display_banner();

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(args: Args) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    let repository = RepoInfo::discover(args.root.as_deref().unwrap_or(cwd.as_path())).ok();
    let project_root = args
        .root
        .or_else(|| repository.as_ref().and_then(RepoInfo::root))
        .unwrap_or(cwd);
    log::debug!("project root: {}", project_root.display());

    let config = config::load_config(args.config.as_deref(), &project_root)?;

    let builder = CommandBuilder::from_config(&config.build, &project_root);
    let vcs = GitCli::new(&project_root, config.git.remote.clone());
    let inferred_slug = repository
        .as_ref()
        .and_then(|repo| repo.github_slug(&config.git.remote));
    let publisher = GitHubReleases::new(config.release.clone(), inferred_slug);

    let stdin = io::stdin();
    let mut workflow = ReleaseWorkflow::new(&config, &project_root, stdin.lock(), &builder, &vcs);
    if let Some(repository) = &repository {
        workflow = workflow.with_repository(repository);
    }
    if config.release.enabled {
        workflow = workflow.with_publisher(&publisher);
    }

    let result = workflow.run()?;
    println!();
    ui::display_success(&format!("Version {} has been released!", result.version));
    Ok(())
}
