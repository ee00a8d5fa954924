// src/main.rs

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::fmt::{self, Write as _};
use std::io;
use std::path::PathBuf;
use tracing::info;
use yarp::config::DEFAULT_CONFIG_FILE;
use yarp::{PacmanConfig, Repository, Settings, SigLevel};

#[derive(Parser)]
#[command(name = "yarp")]
#[command(author, version, about = "Resolve and inspect pacman configuration", long_about = None)]
struct Cli {
    /// Configuration file to resolve
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Override the installation root (RootDir)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Override the database location (DBPath)
    #[arg(short = 'b', long, global = true)]
    dbpath: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved global options and repositories
    Dump {
        /// Emit JSON instead of pacman.conf-style text
        #[arg(long)]
        json: bool,
    },
    /// List repositories with their servers and signature levels
    Repos,
    /// Decode a signature level expression
    Siglevel {
        /// Keywords, e.g. `Required DatabaseOptional`
        #[arg(required = true)]
        expression: Vec<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings {
        config_file: cli.config,
        verbose: cli.verbose,
        root_dir: cli.root,
        db_path: cli.dbpath,
    };

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(settings.log_filter())),
        )
        .init();

    match cli.command {
        Some(Commands::Dump { json }) => {
            let config = settings.load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", render_config(&config)?);
            }
            Ok(())
        }
        Some(Commands::Repos) => {
            let config = settings.load()?;
            if config.repos.is_empty() {
                println!("No repositories configured in {}", settings.config_file.display());
            }
            for repo in &config.repos {
                print!("{}", render_repo_summary(repo)?);
            }
            Ok(())
        }
        Some(Commands::Siglevel { expression }) => {
            let level = SigLevel::decode(&expression.join(" "));
            info!("Decoded signature level: {:#x}", level.bits());
            println!("{}", level);
            println!("  Bits: {:#010x}", level.bits());
            for name in level.flag_names() {
                println!("  {}", name);
            }
            Ok(())
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "yarp", &mut io::stdout());
            Ok(())
        }
        None => Err(anyhow::anyhow!("no operation specified (use -h for help)")),
    }
}

/// Render the configuration in pacman.conf syntax
fn render_config(config: &PacmanConfig) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "[options]")?;
    writeln!(out, "RootDir = {}", config.root_dir.display())?;
    writeln!(out, "DBPath = {}", config.db_path.display())?;
    write_list(&mut out, "CacheDir", &config.cache_dirs)?;
    write_list(&mut out, "HookDir", &config.hook_dirs)?;
    writeln!(out, "GPGDir = {}", config.gpg_dir.display())?;
    writeln!(out, "LogFile = {}", config.log_file.display())?;
    write_words(&mut out, "HoldPkg", &config.hold_pkg)?;
    write_words(&mut out, "IgnorePkg", &config.ignore_pkg)?;
    write_words(&mut out, "IgnoreGroup", &config.ignore_group)?;
    write_words(&mut out, "Architecture", &config.architecture)?;
    if !config.xfer_command.is_empty() {
        writeln!(out, "XferCommand = {}", config.xfer_command)?;
    }
    write_words(&mut out, "NoUpgrade", &config.no_upgrade)?;
    write_words(&mut out, "NoExtract", &config.no_extract)?;
    write_words(&mut out, "CleanMethod", &config.clean_method)?;
    writeln!(out, "SigLevel = {}", config.sig_level)?;
    writeln!(out, "LocalFileSigLevel = {}", config.local_file_sig_level)?;
    writeln!(out, "RemoteFileSigLevel = {}", config.remote_file_sig_level)?;
    if let Some(user) = &config.download_user {
        writeln!(out, "DownloadUser = {}", user)?;
    }
    writeln!(out, "UseDelta = {}", config.use_delta)?;
    writeln!(out, "ParallelDownloads = {}", config.parallel_downloads)?;

    let flags = [
        ("UseSyslog", config.use_syslog),
        ("Color", config.color),
        ("TotalDownload", config.total_download),
        ("CheckSpace", config.check_space),
        ("VerbosePkgLists", config.verbose_pkg_lists),
        ("DisableDownloadTimeout", config.disable_download_timeout),
        ("DisableSandbox", config.disable_sandbox),
        ("ILoveCandy", config.chomp),
    ];
    for (name, set) in flags {
        if set {
            writeln!(out, "{}", name)?;
        }
    }

    for repo in &config.repos {
        writeln!(out, "\n[{}]", repo.name)?;
        writeln!(out, "SigLevel = {}", repo.sig_level)?;
        write_words(&mut out, "Usage", &repo.usage)?;
        write_list(&mut out, "Server", &repo.servers)?;
    }

    Ok(out)
}

fn render_repo_summary(repo: &Repository) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", repo.name)?;
    writeln!(out, "  SigLevel: {}", repo.sig_level)?;
    writeln!(out, "  Usage: {:#x}", repo.usage_flags().bits())?;
    if repo.servers.is_empty() {
        writeln!(out, "  Servers: none")?;
    }
    for server in &repo.servers {
        writeln!(out, "  Server: {}", server)?;
    }
    Ok(out)
}

/// One `key = value` line per entry
fn write_list(out: &mut String, key: &str, values: &[String]) -> fmt::Result {
    for value in values {
        writeln!(out, "{} = {}", key, value)?;
    }
    Ok(())
}

/// A single `key = a b c` line, skipped when empty
fn write_words(out: &mut String, key: &str, values: &[String]) -> fmt::Result {
    if !values.is_empty() {
        writeln!(out, "{} = {}", key, values.join(" "))?;
    }
    Ok(())
}
