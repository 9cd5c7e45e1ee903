use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gitpp::{
    execute, ConfigStore, Credentials, GitHubClient, ListFilter, OperatingMode, Options,
    TableRenderer,
};

#[derive(Parser)]
#[command(name = "gitpp")]
#[command(about = "gitpp, helps to make your GitHub repositories public/private")]
#[command(version)]
struct Cli {
    /// GitHub username
    #[arg(short, long)]
    username: Option<String>,

    /// GitHub personal access token
    #[arg(short, long)]
    token: Option<String>,

    /// Repository name(s), bare or owner/name, comma separated
    #[arg(short, long = "repo", value_delimiter = ',')]
    repo: Vec<String>,

    /// Make the repositories public
    #[arg(long, visible_alias = "pub")]
    public: bool,

    /// Make the repositories private
    #[arg(long, visible_alias = "pvt")]
    private: bool,

    /// List all your repositories
    #[arg(short, long)]
    list: bool,

    /// Property to sort the listing by [created, updated, pushed, full_name]
    #[arg(short, long, default_value = "updated")]
    sort: String,

    /// Limit the listing to a visibility [all, public, private]
    #[arg(short = 'v', long = "vis", default_value = "all")]
    vis: String,

    /// List repositories of the given affiliation [owner, collaborator, organization_member]
    #[arg(short = 'a', long = "affil", default_value = "owner")]
    affil: String,

    /// Configuration file path (defaults to XDG config location)
    #[arg(short, long)]
    config: Option<String>,

    /// Verbose logging
    #[arg(long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            repo_names: Vec::new(),
            make_private: self.private,
            make_public: self.public,
            list_requested: self.list,
            filter: ListFilter {
                sort: self.sort.clone(),
                visibility: self.vis.clone(),
                affiliation: self.affil.clone(),
            },
        }
        .with_repo_names(&self.repo)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("error: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        // gitpp errors already carry their cause in the message
        Err(e) => match e.downcast_ref::<gitpp::Error>() {
            Some(err) => {
                eprintln!("error: {}", err);
                ExitCode::from(err.exit_code())
            }
            None => {
                eprintln!("error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

/// Resolve the config file location from `--config` or the default path
fn config_store(config_path: Option<&str>) -> Result<ConfigStore> {
    match config_path {
        Some(path) => {
            let expanded = shellexpand::full(path)
                .with_context(|| format!("Failed to expand config path: {}", path))?;
            Ok(ConfigStore::new(PathBuf::from(expanded.into_owned())))
        }
        None => Ok(ConfigStore::open_default()?),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let store = config_store(cli.config.as_deref())?;
    // Flag credentials still work when the file can't be created
    if let Err(e) = store.ensure_exists() {
        warn!("{}", e);
    }
    debug!("Config file: {:?}", store.path());

    let credentials =
        Credentials::resolve(cli.username.as_deref(), cli.token.as_deref(), &store)?;
    info!("Acting as GitHub user: {}", credentials.username);

    let options = cli.options();
    let mode = OperatingMode::resolve(&options).map_err(gitpp::Error::from)?;
    debug!("Resolved mode: {:?}", mode);

    let client = GitHubClient::new(&credentials)?;
    let renderer = TableRenderer::new(!cli.no_color);
    let mut stdout = std::io::stdout().lock();

    let summary = execute(
        mode,
        &options,
        client.username(),
        &client,
        &renderer,
        &mut stdout,
    )
    .await?;
    debug!("Updated {} repositories", summary.updated.len());

    Ok(())
}
