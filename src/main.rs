//! cloudflare-ddns - keep a Cloudflare A record on the current public address.

use clap::{Parser, Subcommand};
use cloudflare_ddns::config::{Config, Overrides, Settings};
use cloudflare_ddns::{reconcile_with, AddressSource, RecordDirectory, Reconciler};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cloudflare-ddns")]
#[command(about = "Keep a Cloudflare A record in sync with this host's public IPv4 address")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Cloudflare API token
    #[arg(short = 'a', long = "apitoken", env = "apitoken", hide_env_values = true, global = true)]
    api_token: Option<String>,

    /// Cloudflare zone ID
    #[arg(short = 'z', long = "zoneid", env = "zoneid", global = true)]
    zone_id: Option<String>,

    /// Domain to update in the zone
    #[arg(short = 'd', long = "domain", env = "domain", global = true)]
    domain: Option<String>,

    /// Proxy through Cloudflare
    #[arg(short = 'p', long = "proxy", env = "proxy", global = true)]
    proxy: bool,

    /// Plain-text public address echo service
    #[arg(long, global = true)]
    address_service: Option<String>,

    /// Cloudflare API base URL
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the record once (default)
    Update,

    /// Show the public address and the record without changing anything
    Status,

    /// Check that the record resolves uniquely and is readable with the token
    Validate,

    /// Reconcile periodically until interrupted
    Daemon {
        /// Check interval in seconds (default: config file, else 300)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Write an example config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn get_config_path(cli_path: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli_path {
        return path;
    }

    // Default locations
    let candidates = [
        dirs::config_dir().map(|p| p.join("cloudflare-ddns/config.toml")),
        Some(PathBuf::from("/etc/cloudflare-ddns/config.toml")),
        Some(PathBuf::from("config.toml")),
    ];

    for candidate in candidates.into_iter().flatten() {
        if candidate.exists() {
            return candidate;
        }
    }

    // Return default even if it doesn't exist
    Config::default_path().unwrap_or_else(|_| PathBuf::from("config.toml"))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cloudflare_ddns={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = get_config_path(cli.config);

    let overrides = Overrides {
        api_token: cli.api_token,
        zone_id: cli.zone_id,
        record_name: cli.domain,
        proxied: cli.proxy,
        address_service: cli.address_service,
        api_base_url: cli.api_base_url,
        timeout_secs: cli.timeout,
    };

    match cli.command.unwrap_or(Commands::Update) {
        Commands::Update => cmd_update(load_settings(&config_path, overrides)?).await?,
        Commands::Status => cmd_status(load_settings(&config_path, overrides)?).await?,
        Commands::Validate => cmd_validate(load_settings(&config_path, overrides)?).await?,
        Commands::Daemon { interval } => {
            let settings = load_settings(&config_path, overrides)?;
            let interval = interval
                .map(Duration::from_secs)
                .unwrap_or(settings.check_interval);
            cmd_daemon(settings, interval).await?
        }
        Commands::Init { force } => cmd_init(config_path, force)?,
    }

    Ok(())
}

fn load_settings(path: &Path, overrides: Overrides) -> anyhow::Result<Settings> {
    Ok(Config::load_from(path)?.resolve(overrides)?)
}

async fn cmd_update(settings: Settings) -> anyhow::Result<()> {
    let outcome = reconcile_with(&settings).await;

    println!("{}: {}", settings.target.record_name, outcome);

    if outcome.is_failure() {
        std::process::exit(outcome.exit_code());
    }
    Ok(())
}

async fn cmd_status(settings: Settings) -> anyhow::Result<()> {
    let resolver = settings.resolver()?;
    let client = settings.client()?;
    let target = &settings.target;

    println!("cloudflare-ddns Status");
    println!("======================\n");

    let current = match resolver.resolve().await {
        Ok(addr) => {
            println!("Current Public IP: {}", addr);
            Some(addr.to_string())
        }
        Err(e) => {
            println!("Failed to detect IP: {}", e);
            None
        }
    };

    print!("Record {} (zone {}): ", target.record_name, target.zone_id);

    match RecordDirectory::new(&client)
        .find_record(&target.zone_id, &target.record_name)
        .await
    {
        Ok(record) => {
            println!(
                "{} [id {}, proxied: {}]",
                record.content,
                record.id,
                record
                    .proxied
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "unknown".to_string())
            );
            if let Some(current) = current {
                if current == record.content {
                    println!("\nIn sync.");
                } else {
                    println!("\nOut of date; run `cloudflare-ddns update`.");
                }
            }
        }
        Err(e) => println!("error: {}", e),
    }

    Ok(())
}

async fn cmd_validate(settings: Settings) -> anyhow::Result<()> {
    let client = settings.client()?;
    let target = &settings.target;
    let directory = RecordDirectory::new(&client);

    println!("Validating configuration...\n");
    print!("  {} (zone {}): ", target.record_name, target.zone_id);

    let checked = match directory
        .find_record(&target.zone_id, &target.record_name)
        .await
    {
        Ok(record) => directory.get_record(&target.zone_id, &record.id).await,
        Err(e) => Err(e),
    };

    match checked {
        Ok(record) => {
            println!("OK (record {})", record.id);
            Ok(())
        }
        Err(e) => {
            println!("FAILED - {}", e);
            std::process::exit(1);
        }
    }
}

async fn cmd_daemon(settings: Settings, interval: Duration) -> anyhow::Result<()> {
    let resolver = settings.resolver()?;
    let client = settings.client()?;
    let reconciler = Reconciler::new(&resolver, &client);

    println!(
        "Starting cloudflare-ddns daemon for {} (interval: {}s)",
        settings.target.record_name,
        interval.as_secs()
    );

    loop {
        let outcome = reconciler.reconcile(&settings.target).await;
        let line = format!(
            "[{}] {}: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S"),
            settings.target.record_name,
            outcome
        );
        if outcome.is_failure() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("Shutting down");
                return Ok(());
            }
            _ = tokio::time::sleep(interval) => {}
        }
    }
}

fn cmd_init(path: PathBuf, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Config::example().save_to(&path)?;
    println!("Wrote example configuration to {}", path.display());
    Ok(())
}
